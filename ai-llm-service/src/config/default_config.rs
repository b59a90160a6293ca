//! Default LLM configs loaded from environment variables.
//!
//! Two roles are supported, both served by an OpenAI-compatible API:
//!
//! - **Chat** → completion model used to compose answers (deterministic)
//! - **Embedding** → embedding generator for the FAQ index
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`          = API key (mandatory)
//! - `OPENAI_URL`              = API base URL (default `https://api.openai.com`)
//! - `OPENAI_CHAT_MODEL`       = chat model (default `gpt-4o-mini`)
//! - `OPENAI_EMBEDDING_MODEL`  = embedding model (default `text-embedding-3-small`)
//! - `LLM_MAX_TOKENS`          = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS`        = request timeout (u64, default 60)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, env_opt_u32, env_opt_u64, env_or, must_env, validate_http_endpoint},
};

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Resolves the OpenAI endpoint from `OPENAI_URL`, validating the scheme.
fn openai_endpoint() -> Result<String, AiLlmError> {
    let url = env_or("OPENAI_URL", DEFAULT_OPENAI_URL);
    validate_http_endpoint("OPENAI_URL", &url)?;
    Ok(url)
}

/// Constructs a config for the **chat** model.
///
/// # Env
/// - `OPENAI_API_KEY` (required)
/// - `OPENAI_CHAT_MODEL`, `LLM_MAX_TOKENS`, `LLM_TIMEOUT_SECS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.0)`
pub fn config_openai_chat() -> Result<LlmModelConfig, AiLlmError> {
    Ok(LlmModelConfig {
        model: env_or("OPENAI_CHAT_MODEL", DEFAULT_CHAT_MODEL),
        endpoint: openai_endpoint()?,
        api_key: Some(must_env("OPENAI_API_KEY")?),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(0.0),
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

/// Constructs a config for the **embedding** model.
///
/// # Env
/// - `OPENAI_API_KEY` (required)
/// - `OPENAI_EMBEDDING_MODEL`, `LLM_TIMEOUT_SECS` (optional)
pub fn config_openai_embedding() -> Result<LlmModelConfig, AiLlmError> {
    Ok(LlmModelConfig {
        model: env_or("OPENAI_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
        endpoint: openai_endpoint()?,
        api_key: Some(must_env("OPENAI_API_KEY")?),
        max_tokens: None,
        temperature: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}
