//! Chat model abstraction and its OpenAI-backed implementation.

use std::{future::Future, pin::Pin, sync::Arc};

use ai_llm_service::LlmServiceProfiles;

use crate::error::ResponderError;

pub type ChatFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ResponderError>> + Send + 'a>>;

/// Single-turn completion: prompt in, raw text out.
pub trait ChatModel: Send + Sync {
    fn complete<'a>(&'a self, prompt: &'a str) -> ChatFuture<'a>;
}

/// Uses the `chat` profile of the shared LLM service (temperature 0 by default).
#[derive(Clone)]
pub struct OpenAiChat {
    svc: Arc<LlmServiceProfiles>,
}

impl OpenAiChat {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl ChatModel for OpenAiChat {
    fn complete<'a>(&'a self, prompt: &'a str) -> ChatFuture<'a> {
        Box::pin(async move { Ok(self.svc.generate(prompt, None).await?) })
    }
}
