//! Embedding abstraction.

use std::{future::Future, pin::Pin};

use crate::errors::IndexError;

/// Boxed future returned by [`EmbeddingsProvider`] methods.
pub type EmbedFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, IndexError>> + Send + 'a>>;

/// Provider interface for embedding generation.
///
/// Async because real providers perform HTTP requests. Implement this trait
/// to plug in another backend (or a deterministic stub in tests).
pub trait EmbeddingsProvider: Send + Sync {
    /// Model identifier recorded in the index manifest.
    fn model_name(&self) -> &str;

    /// Embeds a single text.
    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a, Vec<f32>>;

    /// Embeds several texts, preserving order.
    ///
    /// The default calls [`EmbeddingsProvider::embed`] sequentially.
    fn embed_batch<'a>(&'a self, texts: &'a [String]) -> EmbedFuture<'a, Vec<Vec<f32>>> {
        Box::pin(async move {
            let mut out = Vec::with_capacity(texts.len());
            for t in texts {
                out.push(self.embed(t).await?);
            }
            Ok(out)
        })
    }
}

pub mod openai;
