//! Embedding executor with concurrency and dimension checks.

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::{embed::EmbeddingsProvider, errors::IndexError, progress::Progress};

/// Embeds all `texts`, returning vectors in input order.
///
/// Texts are split into batches of `batch` inputs; at most `concurrency`
/// batches are in flight at once.
///
/// # Errors
/// Returns the first provider error, or [`IndexError::VectorSizeMismatch`] if
/// the provider returns vectors of differing dimensionality.
pub async fn embed_all(
    texts: &[String],
    provider: &dyn EmbeddingsProvider,
    batch: usize,
    concurrency: usize,
    progress: &dyn Progress,
) -> Result<Vec<Vec<f32>>, IndexError> {
    info!(
        total = texts.len(),
        batch, concurrency, "embed_pool::embed_all"
    );
    progress.set_total(texts.len() as u64);

    let chunks: Vec<(usize, &[String])> = texts.chunks(batch.max(1)).enumerate().collect();

    let mut results: Vec<(usize, Vec<Vec<f32>>)> = stream::iter(chunks)
        .map(|(i, chunk)| async move {
            let vs = provider.embed_batch(chunk).await?;
            if vs.len() != chunk.len() {
                return Err(IndexError::Embedding(format!(
                    "provider returned {} vectors for {} inputs",
                    vs.len(),
                    chunk.len()
                )));
            }
            progress.advance(chunk.len() as u64, "embedding");
            Ok::<_, IndexError>((i, vs))
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, IndexError>>()?;

    results.sort_by_key(|(i, _)| *i);
    let out: Vec<Vec<f32>> = results.into_iter().flat_map(|(_, vs)| vs).collect();

    if let Some(first) = out.first() {
        let want = first.len();
        if let Some(bad) = out.iter().find(|v| v.len() != want) {
            return Err(IndexError::VectorSizeMismatch {
                got: bad.len(),
                want,
            });
        }
    }

    debug!(vectors = out.len(), "embed_pool::embed_all done");
    Ok(out)
}
