//! Answer composition: retrieve FAQ entries, pick an instruction, fill the
//! prompt template and ask the chat model.

mod error;
pub mod llm;
pub mod prompt;

pub use error::ResponderError;
pub use llm::{ChatModel, OpenAiChat};
pub use prompt::Instruction;

use std::sync::Arc;

use faq_index::{EmbeddingsProvider, FaqIndex, RetrievalResult};
use tracing::{debug, info};

/// Prompt ready to be sent, with the inputs that produced it.
#[derive(Debug, Clone)]
pub struct ComposedPrompt {
    pub prompt: String,
    pub instruction: Instruction,
    pub faq: Vec<RetrievalResult>,
}

/// Stateless answerer shared by all requests.
pub struct FaqResponder {
    index: FaqIndex,
    embedder: Arc<dyn EmbeddingsProvider>,
    chat: Arc<dyn ChatModel>,
    top_k: usize,
}

impl FaqResponder {
    pub fn new(
        index: FaqIndex,
        embedder: Arc<dyn EmbeddingsProvider>,
        chat: Arc<dyn ChatModel>,
    ) -> Self {
        let top_k = index.config().top_k;
        Self {
            index,
            embedder,
            chat,
            top_k,
        }
    }

    /// Retrieves context and builds the prompt without calling the model.
    ///
    /// # Errors
    /// Propagates retrieval errors (absent index, embedding failures).
    pub async fn compose(&self, question: &str) -> Result<ComposedPrompt, ResponderError> {
        let faq = self
            .index
            .retrieve(question, self.top_k, self.embedder.as_ref())
            .await?;
        let instruction = prompt::choose_instruction(&faq);
        let faq_result = prompt::format_faq_results(&faq);

        debug!(
            hits = faq.len(),
            best = faq.first().map(|r| r.relevance_score),
            ?instruction,
            "prompt composed"
        );

        Ok(ComposedPrompt {
            prompt: prompt::render(question, &faq_result, instruction),
            instruction,
            faq,
        })
    }

    /// Full pipeline; returns the model's text verbatim.
    pub async fn answer(&self, question: &str) -> Result<String, ResponderError> {
        let composed = self.compose(question).await?;
        let answer = self.chat.complete(&composed.prompt).await?;
        info!(
            instruction = ?composed.instruction,
            answer_len = answer.len(),
            "answer generated"
        );
        Ok(answer)
    }
}
