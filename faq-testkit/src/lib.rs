//! Test fixtures shared by the workspace: deterministic embedders that need
//! no network, and a small FAQ sample.

use std::sync::atomic::{AtomicUsize, Ordering};

use faq_index::{EmbeddingsProvider, FaqEntry, IndexError, embed::EmbedFuture};

/// Keywords, one vector dimension each.
pub const TOPICS: &[&str] = &["deadline", "exam", "grade", "competition", "points", "weather"];

/// Bag-of-topics embedder: counts keyword occurrences per dimension.
#[derive(Default)]
pub struct TopicEmbedder {
    calls: AtomicUsize,
}

impl TopicEmbedder {
    pub fn vector(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        TOPICS
            .iter()
            .map(|t| lower.matches(t).count() as f32)
            .collect()
    }

    /// Number of `embed` calls so far (batch calls count per text).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EmbeddingsProvider for TopicEmbedder {
    fn model_name(&self) -> &str {
        "topic-stub"
    }

    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a, Vec<f32>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Self::vector(text))
        })
    }
}

/// Returns `indexed` for stored documents (`"Q: ..."`) and `query` for
/// everything else, to pin exact vectors on both sides of a search.
pub struct FixedEmbedder {
    pub indexed: Vec<f32>,
    pub query: Vec<f32>,
}

impl EmbeddingsProvider for FixedEmbedder {
    fn model_name(&self) -> &str {
        "fixed-stub"
    }

    fn embed<'a>(&'a self, text: &'a str) -> EmbedFuture<'a, Vec<f32>> {
        Box::pin(async move {
            Ok(if text.starts_with("Q: ") {
                self.indexed.clone()
            } else {
                self.query.clone()
            })
        })
    }
}

/// Always fails, standing in for an unreachable provider.
pub struct FailingEmbedder;

impl EmbeddingsProvider for FailingEmbedder {
    fn model_name(&self) -> &str {
        "failing"
    }

    fn embed<'a>(&'a self, _text: &'a str) -> EmbedFuture<'a, Vec<f32>> {
        Box::pin(async move { Err(IndexError::Embedding("provider unreachable".into())) })
    }
}

pub fn entry(q: &str, a: &str) -> FaqEntry {
    FaqEntry {
        question: q.into(),
        answer: a.into(),
    }
}

pub fn sample_entries() -> Vec<FaqEntry> {
    vec![
        entry("What is the deadline?", "March 1."),
        entry("How is the final grade computed?", "Exam 60%, project 40%."),
        entry("Can I join the same competition to earn more points?", "No, each competition counts once."),
        entry("When is the exam?", "Week 13."),
    ]
}
