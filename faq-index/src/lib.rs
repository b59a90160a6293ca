//! FAQ vector index: dataset loading, build, bootstrap and retrieval.
//!
//! The index is a directory holding a JSON manifest and JSONL rows (see
//! [`store`]). It is read-only while serving; a rebuild replaces it wholesale.

pub mod bootstrap;
mod config;
pub mod dataset;
pub mod embed;
mod embed_pool;
mod errors;
mod ingest;
mod io_jsonl;
pub mod progress;
mod record;
mod retrieve;
mod similarity;
pub mod store;

pub use bootstrap::{IndexStatus, ensure_index, ensure_ready};
pub use config::{DistanceKind, IndexConfig};
pub use embed::EmbeddingsProvider;
pub use errors::IndexError;
pub use record::{FaqEntry, IndexManifest, IndexedEntry, RetrievalResult};

use std::path::Path;

use tracing::{debug, trace};

use crate::progress::Progress;

/// High-level facade over one index directory.
///
/// Holds only configuration; the directory is opened on every query so a
/// rebuilt index is picked up without restarting.
#[derive(Clone, Debug)]
pub struct FaqIndex {
    cfg: IndexConfig,
}

impl FaqIndex {
    /// # Errors
    /// Returns `IndexError::Config` for invalid settings.
    pub fn new(cfg: IndexConfig) -> Result<Self, IndexError> {
        cfg.validate()?;
        trace!("FaqIndex::new path={:?}", cfg.index_path);
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.cfg
    }

    /// Whether the index directory is present.
    pub fn exists(&self) -> bool {
        self.cfg.index_path.exists()
    }

    /// Returns up to `k` entries most similar to `question`, best first.
    ///
    /// # Errors
    /// - [`IndexError::NotFound`] if the index directory is absent.
    /// - Embedding, parse or dimensionality errors otherwise.
    pub async fn retrieve(
        &self,
        question: &str,
        k: usize,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Vec<RetrievalResult>, IndexError> {
        debug!(k, "FaqIndex::retrieve");
        let loaded = self.load().await?;
        retrieve::top_k(&loaded, question, k, provider).await
    }

    /// Reads the index directory on the blocking pool.
    pub async fn load(&self) -> Result<store::LoadedIndex, IndexError> {
        let path = self.cfg.index_path.clone();
        tokio::task::spawn_blocking(move || store::load(&path)).await?
    }

    /// Embeds `entries` and replaces the index with them.
    pub async fn build_from_entries(
        &self,
        entries: &[FaqEntry],
        provider: &dyn EmbeddingsProvider,
        progress: &dyn Progress,
    ) -> Result<usize, IndexError> {
        ingest::build_from_entries(&self.cfg, entries, provider, progress).await
    }

    /// Reads a JSON dataset and replaces the index with it.
    pub async fn build_from_dataset(
        &self,
        dataset_path: impl AsRef<Path>,
        provider: &dyn EmbeddingsProvider,
        progress: &dyn Progress,
    ) -> Result<usize, IndexError> {
        ingest::build_from_dataset(&self.cfg, dataset_path.as_ref(), provider, progress).await
    }

    /// Runs the startup bootstrap for this index.
    pub async fn ensure(&self, provider: &dyn EmbeddingsProvider) -> IndexStatus {
        bootstrap::ensure_index(&self.cfg, provider).await
    }
}
