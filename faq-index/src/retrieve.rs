//! Similarity search over a loaded index.

use tracing::trace;

use crate::{
    embed::EmbeddingsProvider,
    errors::IndexError,
    record::RetrievalResult,
    similarity::{relevance, round2},
    store::LoadedIndex,
};

/// Embeds `question` and returns up to `k` rows by descending relevance.
///
/// Ties keep dataset order. An empty index returns an empty list without
/// calling the provider.
///
/// # Errors
/// Returns provider errors, or [`IndexError::VectorSizeMismatch`] when the
/// query vector does not match the index dimensionality.
pub async fn top_k(
    index: &LoadedIndex,
    question: &str,
    k: usize,
    provider: &dyn EmbeddingsProvider,
) -> Result<Vec<RetrievalResult>, IndexError> {
    if index.rows.is_empty() || k == 0 {
        trace!("retrieve::top_k nothing to search");
        return Ok(Vec::new());
    }

    let qv = provider.embed(question).await?;
    if qv.len() != index.manifest.dim {
        return Err(IndexError::VectorSizeMismatch {
            got: qv.len(),
            want: index.manifest.dim,
        });
    }

    let distance = index.manifest.distance;
    let mut scored: Vec<(f32, usize)> = index
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| (relevance(distance, &qv, &row.embedding), i))
        .collect();
    // stable: equal scores keep row order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(k);

    trace!(hits = scored.len(), "retrieve::top_k");
    Ok(scored
        .into_iter()
        .map(|(score, i)| {
            let row = &index.rows[i];
            RetrievalResult {
                relevance_score: round2(score),
                question: row.question.clone(),
                answer: row.answer.clone(),
            }
        })
        .collect())
}
