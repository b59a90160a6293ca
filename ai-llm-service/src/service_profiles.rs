//! Shared LLM service with two profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Builds one HTTP client per profile up front; if both profiles share the
//!   same endpoint, key and timeout, the clients are still independent so each
//!   carries its own model name.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::LlmServiceProfiles;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ai_llm_service::AiLlmError> {
//!     let svc = Arc::new(LlmServiceProfiles::from_env()?);
//!
//!     let txt = svc.generate("Hello world", None).await?;
//!     println!("CHAT: {}", txt);
//!
//!     let emb = svc.embed("Ferris").await?;
//!     println!("Embedding dim = {}", emb.len());
//!     Ok(())
//! }
//! ```

use tracing::debug;

use crate::{
    config::{
        default_config::{config_openai_chat, config_openai_embedding},
        llm_model_config::LlmModelConfig,
    },
    error_handler::AiLlmError,
    services::open_ai_service::OpenAiService,
};

/// Shared service holding the **chat** and **embedding** profiles.
#[derive(Debug)]
pub struct LlmServiceProfiles {
    chat_cfg: LlmModelConfig,
    embedding_cfg: LlmModelConfig,
    chat: OpenAiService,
    embedding: OpenAiService,
}

impl LlmServiceProfiles {
    /// Creates a new service from explicit profiles.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if either client cannot be constructed.
    pub fn new(chat: LlmModelConfig, embedding: LlmModelConfig) -> Result<Self, AiLlmError> {
        Ok(Self {
            chat: OpenAiService::new(chat.clone())?,
            embedding: OpenAiService::new(embedding.clone())?,
            chat_cfg: chat,
            embedding_cfg: embedding,
        })
    }

    /// Creates the service from `OPENAI_*` / `LLM_*` environment variables.
    ///
    /// Fails fast when `OPENAI_API_KEY` is absent.
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::new(config_openai_chat()?, config_openai_embedding()?)
    }

    /// Generates text using the **chat** profile.
    ///
    /// # Arguments
    /// - `prompt`: input text prompt.
    /// - `system`: optional system instruction.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        debug!(model = %self.chat_cfg.model, "generate");
        self.chat.generate(prompt, system).await
    }

    /// Computes one embedding using the **embedding** profile.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        self.embedding.embeddings(input).await
    }

    /// Computes embeddings for several inputs in a single request.
    pub async fn embed_batch(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>, AiLlmError> {
        self.embedding.embeddings_batch(inputs).await
    }

    /// Returns references to the current profiles `(chat, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.chat_cfg, &self.embedding_cfg)
    }
}
