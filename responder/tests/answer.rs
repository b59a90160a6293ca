use std::sync::{Arc, Mutex};

use faq_index::{FaqEntry, FaqIndex, IndexConfig, IndexError, progress::NoopProgress};
use faq_testkit::{FixedEmbedder, TopicEmbedder, entry, sample_entries};
use responder::{
    ChatModel, FaqResponder, Instruction, ResponderError,
    llm::ChatFuture,
};

/// Records every prompt and replies with a fixed string.
#[derive(Default)]
struct RecordingChat {
    prompts: Mutex<Vec<String>>,
}

impl RecordingChat {
    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ChatModel for RecordingChat {
    fn complete<'a>(&'a self, prompt: &'a str) -> ChatFuture<'a> {
        Box::pin(async move {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("The deadline is March 1.".to_string())
        })
    }
}

struct DownChat;

impl ChatModel for DownChat {
    fn complete<'a>(&'a self, _prompt: &'a str) -> ChatFuture<'a> {
        Box::pin(async move { Err(ResponderError::Llm("connection refused".into())) })
    }
}

async fn index_with(dir: &std::path::Path, entries: &[FaqEntry]) -> FaqIndex {
    let index = FaqIndex::new(IndexConfig::new_default(dir.join("faq_db"))).unwrap();
    index
        .build_from_entries(entries, &TopicEmbedder::default(), &NoopProgress)
        .await
        .unwrap();
    index
}

#[tokio::test]
async fn relevant_question_gets_grounded_prompt() {
    let tmp = tempfile::tempdir().unwrap();
    let index = index_with(tmp.path(), &sample_entries()).await;
    let chat = Arc::new(RecordingChat::default());
    let responder = FaqResponder::new(index, Arc::new(TopicEmbedder::default()), chat.clone());

    let answer = responder.answer("When is the deadline?").await.unwrap();
    assert_eq!(answer, "The deadline is March 1.");

    let prompts = chat.prompts();
    assert_eq!(prompts.len(), 1);
    let p = &prompts[0];
    assert!(p.contains("Question:\nWhen is the deadline?\n"));
    assert!(p.contains("Relevance score: 1.00\nQ: What is the deadline?\nA: March 1."));
    assert!(p.contains(Instruction::Grounded.text()));
    assert!(!p.contains(Instruction::Fallback.text()));
    assert_eq!(p.matches("Relevance score:").count(), 3);
}

#[tokio::test]
async fn unrelated_question_gets_fallback_instruction() {
    let tmp = tempfile::tempdir().unwrap();
    let index = index_with(tmp.path(), &sample_entries()).await;
    let responder = FaqResponder::new(index, Arc::new(TopicEmbedder::default()), Arc::new(DownChat));

    let composed = responder.compose("What's the weather today?").await.unwrap();
    assert_eq!(composed.instruction, Instruction::Fallback);
    assert_eq!(composed.faq.len(), 3);
    assert!(composed.faq.iter().all(|r| r.relevance_score < 0.5));
    assert!(composed.prompt.contains(Instruction::Fallback.text()));
}

#[tokio::test]
async fn empty_index_falls_back_with_empty_faq_block() {
    let tmp = tempfile::tempdir().unwrap();
    let index = index_with(tmp.path(), &[]).await;
    let responder = FaqResponder::new(index, Arc::new(TopicEmbedder::default()), Arc::new(DownChat));

    let composed = responder.compose("When is the deadline?").await.unwrap();
    assert!(composed.faq.is_empty());
    assert_eq!(composed.instruction, Instruction::Fallback);
    assert!(
        composed
            .prompt
            .contains("Below are relevant information from the website FAQ.\n\n\n")
    );
}

#[tokio::test]
async fn missing_index_fails_before_calling_the_model() {
    let tmp = tempfile::tempdir().unwrap();
    let index = FaqIndex::new(IndexConfig::new_default(tmp.path().join("absent"))).unwrap();
    let chat = Arc::new(RecordingChat::default());
    let responder = FaqResponder::new(index, Arc::new(TopicEmbedder::default()), chat.clone());

    let err = responder.answer("When is the deadline?").await.unwrap_err();
    assert!(matches!(err, ResponderError::Index(IndexError::NotFound(_))));
    assert!(err.to_string().contains("FAQ index not found"), "{err}");
    assert!(chat.prompts().is_empty());
}

#[tokio::test]
async fn model_failure_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let index = index_with(tmp.path(), &sample_entries()).await;
    let responder = FaqResponder::new(index, Arc::new(TopicEmbedder::default()), Arc::new(DownChat));

    let err = responder.answer("When is the deadline?").await.unwrap_err();
    assert_eq!(err.to_string(), "LLM error: connection refused");
}

#[tokio::test]
async fn moderate_cosine_match_still_falls_back() {
    let tmp = tempfile::tempdir().unwrap();
    let embedder = Arc::new(FixedEmbedder {
        indexed: vec![1.0, 0.0],
        query: vec![0.6, 0.8],
    });
    let index = FaqIndex::new(IndexConfig::new_default(tmp.path().join("faq_db"))).unwrap();
    index
        .build_from_entries(&[entry("What is the deadline?", "March 1.")], embedder.as_ref(), &NoopProgress)
        .await
        .unwrap();
    let responder = FaqResponder::new(index, embedder, Arc::new(DownChat));

    let composed = responder.compose("When is the deadline?").await.unwrap();
    assert_eq!(composed.faq[0].relevance_score, 0.43);
    assert_eq!(composed.instruction, Instruction::Fallback);
    assert!(composed.prompt.contains("Relevance score: 0.43\n"));
}
