//! Index location, bootstrap and retrieval configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::IndexError;

/// Default on-disk location of the index directory.
pub const DEFAULT_INDEX_PATH: &str = "chroma/faq_db";
/// Default location of the bundled seed dataset.
pub const DEFAULT_DATASET_PATH: &str = "data/faq.json";

/// Similarity function used to turn vectors into a relevance score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceKind {
    /// Squared euclidean distance between unit vectors, mapped to
    /// `1 - d² / sqrt(2)` and clamped to `[0, 1]`.
    #[default]
    L2,
    /// Cosine similarity, clamped to `[0, 1]`.
    Cosine,
}

impl std::str::FromStr for DistanceKind {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l2" | "euclid" => Ok(DistanceKind::L2),
            "cosine" => Ok(DistanceKind::Cosine),
            other => Err(IndexError::Config(format!("unknown distance: {other}"))),
        }
    }
}

/// Configuration for index bootstrap and retrieval.
#[derive(Clone, Debug)]
pub struct IndexConfig {
    /// Index directory (holds `manifest.json` and `entries.jsonl`).
    pub index_path: PathBuf,
    /// Seed dataset: a JSON array of `{question, answer}` objects.
    pub dataset_path: PathBuf,
    /// Optional zip archive with a prebuilt index.
    pub archive_url: Option<String>,
    /// Directory the archive is unpacked into; the archive is expected to
    /// recreate `index_path` under it.
    pub archive_root: PathBuf,
    /// Build from the dataset when no index is present.
    pub build_on_missing: bool,
    /// Refuse to serve when bootstrap ends without an index.
    pub required: bool,
    /// Number of entries returned per query.
    pub top_k: usize,
    /// Concurrent embedding requests during a build.
    pub embed_concurrency: usize,
    /// Inputs per embedding request during a build.
    pub embed_batch: usize,
    /// Similarity used for newly built indexes.
    pub distance: DistanceKind,
}

impl IndexConfig {
    /// Creates a default config for a given index directory.
    pub fn new_default(index_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            archive_url: None,
            archive_root: PathBuf::from("."),
            build_on_missing: true,
            required: false,
            top_k: 3,
            embed_concurrency: 8,
            embed_batch: 64,
            distance: DistanceKind::L2,
        }
    }

    /// Builds from `FAQ_*` environment variables with defaults.
    pub fn from_env() -> Result<Self, IndexError> {
        let mut cfg = Self::new_default(env("FAQ_INDEX_PATH", DEFAULT_INDEX_PATH));
        cfg.dataset_path = PathBuf::from(env("FAQ_DATASET_PATH", DEFAULT_DATASET_PATH));
        cfg.archive_url = std::env::var("FAQ_INDEX_ARCHIVE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        cfg.archive_root = PathBuf::from(env("FAQ_INDEX_ARCHIVE_ROOT", "."));
        cfg.build_on_missing = flag("FAQ_BUILD_ON_MISSING", true);
        cfg.required = flag("FAQ_INDEX_REQUIRED", false);
        cfg.top_k = parse("FAQ_TOP_K", 3usize);
        cfg.embed_concurrency = parse("FAQ_EMBED_CONCURRENCY", 8usize);
        cfg.embed_batch = parse("FAQ_EMBED_BATCH", 64usize);
        cfg.distance = env("FAQ_INDEX_DISTANCE", "l2").parse()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.index_path.as_os_str().is_empty() {
            return Err(IndexError::Config("index_path is empty".into()));
        }
        if self.top_k == 0 {
            return Err(IndexError::Config("top_k must be > 0".into()));
        }
        if self.embed_concurrency == 0 || self.embed_batch == 0 {
            return Err(IndexError::Config(
                "embed_concurrency and embed_batch must be > 0".into(),
            ));
        }
        if let Some(url) = &self.archive_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(IndexError::Config(format!(
                    "archive_url must be http(s): {url}"
                )));
            }
        }
        Ok(())
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| dflt.to_string())
}

fn flag(k: &str, dflt: bool) -> bool {
    match std::env::var(k) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => dflt,
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(dflt)
}
