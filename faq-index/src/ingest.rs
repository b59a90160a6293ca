//! Index build: dataset → documents → embeddings → on-disk index.

use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::{
    config::IndexConfig,
    dataset,
    embed::EmbeddingsProvider,
    embed_pool,
    errors::IndexError,
    progress::Progress,
    record::{FaqEntry, IndexManifest, IndexedEntry},
    store,
};

/// Converts entries into index rows (without vectors yet).
fn to_documents(entries: &[FaqEntry]) -> Vec<(usize, String)> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| (i, e.indexed_text()))
        .collect()
}

/// Embeds `entries` and writes a fresh index at `cfg.index_path`.
///
/// Returns the number of rows written.
pub async fn build_from_entries(
    cfg: &IndexConfig,
    entries: &[FaqEntry],
    provider: &dyn EmbeddingsProvider,
    progress: &dyn Progress,
) -> Result<usize, IndexError> {
    let docs = to_documents(entries);
    let texts: Vec<String> = docs.iter().map(|(_, t)| t.clone()).collect();

    let vectors = embed_pool::embed_all(
        &texts,
        provider,
        cfg.embed_batch,
        cfg.embed_concurrency,
        progress,
    )
    .await?;

    let dim = vectors.first().map(Vec::len).unwrap_or(0);
    let rows: Vec<IndexedEntry> = docs
        .into_iter()
        .zip(vectors)
        .map(|((id, text), embedding)| {
            let entry = &entries[id];
            IndexedEntry {
                id,
                text,
                question: entry.question.clone(),
                answer: entry.answer.clone(),
                embedding,
            }
        })
        .collect();

    let manifest = IndexManifest {
        embedding_model: provider.model_name().to_string(),
        dim,
        count: rows.len(),
        distance: cfg.distance,
        created_at: Utc::now(),
    };

    store::write(&cfg.index_path, &manifest, &rows)?;
    progress.finish("index written");

    info!(
        path = %cfg.index_path.display(),
        count = rows.len(),
        dim,
        model = %manifest.embedding_model,
        "Saved FAQ vectors to index"
    );
    Ok(rows.len())
}

/// Reads the dataset at `dataset_path` and builds the index from it.
pub async fn build_from_dataset(
    cfg: &IndexConfig,
    dataset_path: &Path,
    provider: &dyn EmbeddingsProvider,
    progress: &dyn Progress,
) -> Result<usize, IndexError> {
    let entries = dataset::load_faq_json(dataset_path)?;
    build_from_entries(cfg, &entries, provider, progress).await
}
