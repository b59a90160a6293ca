//! Shared LLM access for the FAQ bot: an OpenAI-compatible REST client,
//! env-driven model configs and a profile holder for chat and embeddings.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;

pub use error_handler::{AiLlmError, ConfigError};
pub use service_profiles::LlmServiceProfiles;
