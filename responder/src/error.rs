//! Typed error for the responder crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResponderError {
    /// Retrieval failures: absent index, embedding errors, corrupt rows.
    #[error(transparent)]
    Index(#[from] faq_index::IndexError),

    /// Chat completion failures.
    #[error("LLM error: {0}")]
    Llm(String),
}

impl From<ai_llm_service::AiLlmError> for ResponderError {
    fn from(err: ai_llm_service::AiLlmError) -> Self {
        ResponderError::Llm(err.to_string())
    }
}
