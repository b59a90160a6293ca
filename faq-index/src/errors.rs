//! Unified error types for the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for faq-index operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index directory does not exist.
    #[error("FAQ index not found at {}", .0.display())]
    NotFound(PathBuf),

    /// Bootstrap produced no index although one is required.
    #[error("FAQ index unavailable at {} and an index is required", .0.display())]
    Unavailable(PathBuf),

    /// The index directory exists but is missing a required file or holds
    /// inconsistent data.
    #[error("FAQ index at {} is unusable: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing / serialization errors.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Mismatch in vector dimensionality.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Embedding provider failure.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Archive download failure (transport or HTTP status).
    #[error("download error: {0}")]
    Download(String),

    /// Archive could not be read or extracted.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<ai_llm_service::AiLlmError> for IndexError {
    fn from(err: ai_llm_service::AiLlmError) -> Self {
        IndexError::Embedding(err.to_string())
    }
}
