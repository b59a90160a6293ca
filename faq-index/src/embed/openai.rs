//! OpenAI embedding provider backed by the shared [`LlmServiceProfiles`].

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;

use crate::embed::{EmbedFuture, EmbeddingsProvider};

/// Embeds through the `embedding` profile of the shared LLM service.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    svc: Arc<LlmServiceProfiles>,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        let model = svc.profiles().1.model.clone();
        Self { svc, model }
    }
}

impl EmbeddingsProvider for OpenAiEmbedder {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a, Vec<f32>> {
        Box::pin(async move { Ok(self.svc.embed(text).await?) })
    }

    fn embed_batch<'a>(&'a self, texts: &'a [String]) -> EmbedFuture<'a, Vec<Vec<f32>>> {
        Box::pin(async move {
            let inputs: Vec<&str> = texts.iter().map(String::as_str).collect();
            Ok(self.svc.embed_batch(&inputs).await?)
        })
    }
}
