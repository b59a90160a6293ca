//! Core data models used by the library.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DistanceKind;

/// One question/answer pair from the seed dataset.
///
/// Unknown fields in the dataset are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    /// Text that gets embedded and stored for this entry.
    pub fn indexed_text(&self) -> String {
        format!("Q: {}\nA: {}", self.question, self.answer)
    }
}

/// A row of the on-disk index: the entry, its combined text and its vector.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexedEntry {
    /// Position of the entry in the source dataset.
    pub id: usize,
    pub text: String,
    pub question: String,
    pub answer: String,
    pub embedding: Vec<f32>,
}

/// Metadata stored next to the rows.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexManifest {
    pub embedding_model: String,
    /// Dimensionality shared by every row (0 for an empty index).
    pub dim: usize,
    pub count: usize,
    pub distance: DistanceKind,
    pub created_at: DateTime<Utc>,
}

/// A single retrieval hit.
///
/// `relevance_score` is in `[0, 1]` and rounded to two decimals.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RetrievalResult {
    pub relevance_score: f32,
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_text_combines_question_and_answer() {
        let e = FaqEntry {
            question: "What is the deadline?".into(),
            answer: "March 1.".into(),
        };
        assert_eq!(e.indexed_text(), "Q: What is the deadline?\nA: March 1.");
    }
}
