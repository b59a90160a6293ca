//! On-disk layout of the index directory.
//!
//! ```text
//! <index_path>/
//!   manifest.json   IndexManifest
//!   entries.jsonl   one IndexedEntry per line
//! ```
//!
//! Writes go to a sibling staging directory that is renamed into place, so
//! readers never observe a half-written index. The live directory is moved
//! aside rather than deleted until the new one is in place.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    errors::IndexError,
    io_jsonl,
    record::{IndexManifest, IndexedEntry},
};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const ENTRIES_FILE: &str = "entries.jsonl";

/// A fully loaded index.
#[derive(Clone, Debug)]
pub struct LoadedIndex {
    pub manifest: IndexManifest,
    pub rows: Vec<IndexedEntry>,
}

/// Loads manifest and rows from `dir`.
///
/// # Errors
/// - [`IndexError::NotFound`] if `dir` does not exist.
/// - [`IndexError::Corrupt`] if a file is missing or rows disagree with the manifest.
pub fn load(dir: &Path) -> Result<LoadedIndex, IndexError> {
    if !dir.is_dir() {
        return Err(IndexError::NotFound(dir.to_path_buf()));
    }

    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(corrupt(dir, format!("missing {MANIFEST_FILE}")));
    }
    let manifest: IndexManifest = serde_json::from_str(&std::fs::read_to_string(&manifest_path)?)
        .map_err(|e| corrupt(dir, format!("{MANIFEST_FILE}: {e}")))?;

    let entries_path = dir.join(ENTRIES_FILE);
    let rows = if entries_path.is_file() {
        io_jsonl::read_all_rows(&entries_path)?
    } else if manifest.count == 0 {
        Vec::new()
    } else {
        return Err(corrupt(dir, format!("missing {ENTRIES_FILE}")));
    };

    if rows.len() != manifest.count {
        return Err(corrupt(
            dir,
            format!("manifest count {} but {} rows", manifest.count, rows.len()),
        ));
    }
    if let Some(bad) = rows.iter().find(|r| r.embedding.len() != manifest.dim) {
        return Err(corrupt(
            dir,
            format!(
                "row {} has dim {}, manifest says {}",
                bad.id,
                bad.embedding.len(),
                manifest.dim
            ),
        ));
    }

    debug!(path = %dir.display(), rows = rows.len(), dim = manifest.dim, "index loaded");
    Ok(LoadedIndex { manifest, rows })
}

/// Replaces the index at `dir` wholesale.
pub fn write(dir: &Path, manifest: &IndexManifest, rows: &[IndexedEntry]) -> Result<(), IndexError> {
    let staging = sibling(dir, "staging");
    if staging.exists() {
        std::fs::remove_dir_all(&staging)?;
    }
    std::fs::create_dir_all(&staging)?;

    io_jsonl::write_rows(staging.join(ENTRIES_FILE), rows)?;
    std::fs::write(
        staging.join(MANIFEST_FILE),
        serde_json::to_vec_pretty(manifest)?,
    )?;

    swap_into_place(&staging, dir)?;

    info!(path = %dir.display(), rows = rows.len(), "index written");
    Ok(())
}

/// Moves `staging` to `dir`. A live `dir` is first renamed to
/// `<name>.previous` and restored if the second rename fails.
fn swap_into_place(staging: &Path, dir: &Path) -> Result<(), IndexError> {
    let previous = sibling(dir, "previous");
    if previous.exists() {
        std::fs::remove_dir_all(&previous)?;
    }

    let had_live = dir.exists();
    if had_live {
        std::fs::rename(dir, &previous)?;
    }

    if let Err(e) = std::fs::rename(staging, dir) {
        if had_live {
            if let Err(restore) = std::fs::rename(&previous, dir) {
                warn!(error = %restore, path = %dir.display(), "failed to restore previous index");
            }
        }
        return Err(e.into());
    }

    if had_live {
        if let Err(e) = std::fs::remove_dir_all(&previous) {
            warn!(error = %e, path = %previous.display(), "failed to remove previous index");
        }
    }
    Ok(())
}

/// `<parent>/<name>.<suffix>`, next to the live directory so renames stay
/// on one filesystem.
fn sibling(dir: &Path, suffix: &str) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index".to_string());
    dir.with_file_name(format!("{name}.{suffix}"))
}

fn corrupt(dir: &Path, reason: String) -> IndexError {
    IndexError::Corrupt {
        path: dir.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DistanceKind;

    fn manifest(dim: usize, count: usize) -> IndexManifest {
        IndexManifest {
            embedding_model: "stub".into(),
            dim,
            count,
            distance: DistanceKind::L2,
            created_at: chrono::Utc::now(),
        }
    }

    fn row(id: usize, v: Vec<f32>) -> IndexedEntry {
        IndexedEntry {
            id,
            text: format!("Q: q{id}\nA: a{id}"),
            question: format!("q{id}"),
            answer: format!("a{id}"),
            embedding: v,
        }
    }

    #[test]
    fn write_then_load_replaces_previous_index() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("faq_db");

        write(&dir, &manifest(2, 2), &[row(0, vec![1.0, 0.0]), row(1, vec![0.0, 1.0])]).unwrap();
        write(&dir, &manifest(2, 1), &[row(5, vec![1.0, 1.0])]).unwrap();

        let loaded = load(&dir).unwrap();
        assert_eq!(loaded.rows.len(), 1);
        assert_eq!(loaded.rows[0].id, 5);
        assert!(!sibling(&dir, "staging").exists());
        assert!(!sibling(&dir, "previous").exists());
    }

    #[test]
    fn failed_swap_restores_live_index() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("faq_db");
        write(&dir, &manifest(2, 1), &[row(3, vec![1.0, 0.0])]).unwrap();

        let missing_staging = tmp.path().join("never_written");
        assert!(swap_into_place(&missing_staging, &dir).is_err());

        let loaded = load(&dir).unwrap();
        assert_eq!(loaded.rows[0].id, 3);
        assert!(!sibling(&dir, "previous").exists());
    }

    #[test]
    fn stale_previous_directory_is_cleared() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("faq_db");
        std::fs::create_dir_all(sibling(&dir, "previous").join("junk")).unwrap();

        write(&dir, &manifest(2, 1), &[row(0, vec![1.0, 0.0])]).unwrap();
        write(&dir, &manifest(2, 1), &[row(1, vec![0.0, 1.0])]).unwrap();

        assert_eq!(load(&dir).unwrap().rows[0].id, 1);
        assert!(!sibling(&dir, "previous").exists());
    }

    #[test]
    fn missing_directory_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&tmp.path().join("absent")),
            Err(IndexError::NotFound(_))
        ));
    }

    #[test]
    fn directory_without_manifest_is_corrupt() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(load(tmp.path()), Err(IndexError::Corrupt { .. })));
    }

    #[test]
    fn count_mismatch_is_corrupt() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("faq_db");
        write(&dir, &manifest(2, 3), &[row(0, vec![1.0, 0.0])]).unwrap();
        let err = load(&dir).unwrap_err();
        assert!(err.to_string().contains("manifest count 3"), "{err}");
    }
}
