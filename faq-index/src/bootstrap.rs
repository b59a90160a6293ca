//! Startup bootstrap: make sure a usable index directory exists.
//!
//! Order of attempts, each tried once:
//! 1. an existing index directory is used as-is;
//! 2. a prebuilt zip archive is downloaded and unpacked (if configured);
//! 3. the index is built from the bundled dataset (if enabled and present).
//!
//! Failures are logged and never abort [`ensure_index`]; [`ensure_ready`]
//! turns a missing index into an error when `IndexConfig::required` is set.

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{
    config::IndexConfig, embed::EmbeddingsProvider, errors::IndexError, ingest,
    progress::NoopProgress,
};

/// Upper bound on bytes written while unpacking one archive.
pub const MAX_EXTRACTED_BYTES: u64 = 512 * 1024 * 1024;

/// Outcome of [`ensure_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    /// The directory was already present.
    Existing,
    /// Unpacked from the configured archive.
    Downloaded,
    /// Built from the dataset; holds the number of rows.
    Built(usize),
    /// No index could be produced.
    Missing,
}

impl IndexStatus {
    pub fn is_ready(&self) -> bool {
        !matches!(self, IndexStatus::Missing)
    }
}

/// Runs the bootstrap steps described in the module docs.
pub async fn ensure_index(cfg: &IndexConfig, provider: &dyn EmbeddingsProvider) -> IndexStatus {
    if cfg.index_path.exists() {
        info!(path = %cfg.index_path.display(), "using existing FAQ index");
        return IndexStatus::Existing;
    }

    if let Some(url) = &cfg.archive_url {
        info!(path = %cfg.index_path.display(), %url, "FAQ index does not exist, downloading");
        match download_and_extract(url, &cfg.archive_root).await {
            Ok(files) if cfg.index_path.exists() => {
                info!(files, "extracted index archive");
                return IndexStatus::Downloaded;
            }
            Ok(files) => warn!(
                files,
                path = %cfg.index_path.display(),
                "archive extracted but did not contain the index directory"
            ),
            Err(e) => warn!(error = %e, "failed to download index archive"),
        }
    }

    if cfg.build_on_missing {
        if cfg.dataset_path.is_file() {
            match ingest::build_from_dataset(cfg, &cfg.dataset_path, provider, &NoopProgress).await
            {
                Ok(n) => return IndexStatus::Built(n),
                Err(e) => warn!(error = %e, "failed to build FAQ index from dataset"),
            }
        } else {
            warn!(path = %cfg.dataset_path.display(), "FAQ dataset not found, cannot build index");
        }
    }

    warn!(path = %cfg.index_path.display(), "no FAQ index available; queries will fail");
    IndexStatus::Missing
}

/// Runs [`ensure_index`] and fails if no index is available while
/// `cfg.required` is set.
///
/// # Errors
/// [`IndexError::Unavailable`] when the index is missing and required.
pub async fn ensure_ready(
    cfg: &IndexConfig,
    provider: &dyn EmbeddingsProvider,
) -> Result<IndexStatus, IndexError> {
    let status = ensure_index(cfg, provider).await;
    gate(status, cfg)
}

fn gate(status: IndexStatus, cfg: &IndexConfig) -> Result<IndexStatus, IndexError> {
    if !status.is_ready() && cfg.required {
        return Err(IndexError::Unavailable(cfg.index_path.clone()));
    }
    Ok(status)
}

/// Downloads a zip archive and unpacks it under `dest`.
///
/// Returns the number of files written.
pub async fn download_and_extract(url: &str, dest: &Path) -> Result<usize, IndexError> {
    let resp = reqwest::get(url)
        .await
        .map_err(|e| IndexError::Download(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(IndexError::Download(format!(
            "GET {url} returned status {status}"
        )));
    }
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| IndexError::Download(e.to_string()))?;
    info!(bytes = bytes.len(), "downloaded index archive");

    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || extract_zip(&bytes, &dest, MAX_EXTRACTED_BYTES)).await?
}

/// Unpacks an in-memory zip archive into `dest`.
///
/// Entries whose paths escape `dest` are rejected, and extraction stops once
/// `max_bytes` have been written.
pub fn extract_zip(bytes: &[u8], dest: &Path, max_bytes: u64) -> Result<usize, IndexError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    std::fs::create_dir_all(dest)?;

    let mut written: u64 = 0;
    let mut files = 0usize;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let rel: PathBuf = entry.enclosed_name().ok_or_else(|| {
            IndexError::Download(format!("unsafe path in archive: {}", entry.name()))
        })?;
        let out_path = dest.join(rel);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let remaining = max_bytes.saturating_sub(written);
        let mut out = std::fs::File::create(&out_path)?;
        let n = std::io::copy(&mut (&mut entry).take(remaining + 1), &mut out)?;
        if n > remaining {
            return Err(IndexError::Download(format!(
                "archive exceeds {max_bytes} extracted bytes"
            )));
        }
        written += n;
        files += 1;
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut w = zip::ZipWriter::new(&mut buf);
            let opts = zip::write::SimpleFileOptions::default();
            for (name, body) in files {
                w.start_file(*name, opts).unwrap();
                w.write_all(body.as_bytes()).unwrap();
            }
            w.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn gate_only_fails_missing_required_index() {
        let mut cfg = IndexConfig::new_default("faq_db");
        assert_eq!(gate(IndexStatus::Missing, &cfg).unwrap(), IndexStatus::Missing);

        cfg.required = true;
        assert!(matches!(
            gate(IndexStatus::Missing, &cfg),
            Err(IndexError::Unavailable(_))
        ));
        assert_eq!(gate(IndexStatus::Built(2), &cfg).unwrap(), IndexStatus::Built(2));
        assert_eq!(gate(IndexStatus::Existing, &cfg).unwrap(), IndexStatus::Existing);
    }

    #[test]
    fn extracts_nested_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let bytes = zip_bytes(&[("chroma/faq_db/manifest.json", "{}"), ("README", "hi")]);
        let n = extract_zip(&bytes, tmp.path(), MAX_EXTRACTED_BYTES).unwrap();
        assert_eq!(n, 2);
        assert!(tmp.path().join("chroma/faq_db/manifest.json").is_file());
    }

    #[test]
    fn rejects_path_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let bytes = zip_bytes(&[("../evil.txt", "x")]);
        let err = extract_zip(&bytes, &tmp.path().join("out"), MAX_EXTRACTED_BYTES).unwrap_err();
        assert!(err.to_string().contains("unsafe path"), "{err}");
        assert!(!tmp.path().join("evil.txt").exists());
    }

    #[test]
    fn enforces_size_cap() {
        let tmp = tempfile::tempdir().unwrap();
        let bytes = zip_bytes(&[("big.bin", &"a".repeat(100))]);
        assert!(extract_zip(&bytes, tmp.path(), 10).is_err());
    }

    #[test]
    fn garbage_is_an_archive_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            extract_zip(b"not a zip", tmp.path(), MAX_EXTRACTED_BYTES),
            Err(IndexError::Archive(_))
        ));
    }
}
