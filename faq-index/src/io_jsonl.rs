//! JSONL helpers for index rows.
//!
//! - [`read_all_rows`] → strict parsing into [`IndexedEntry`].
//! - [`write_rows`] → one JSON object per line.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::errors::IndexError;
use crate::record::IndexedEntry;

/// Reads index rows strictly.
///
/// - Ignores empty lines.
/// - Fails on the first malformed row, naming its line number.
///
/// # Errors
/// - [`IndexError::Io`] if the file cannot be read.
/// - [`IndexError::Corrupt`] if any line fails to deserialize.
pub fn read_all_rows(jsonl_path: impl AsRef<Path>) -> Result<Vec<IndexedEntry>, IndexError> {
    let path = jsonl_path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut out = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row: IndexedEntry = serde_json::from_str(&line).map_err(|e| IndexError::Corrupt {
            path: path.to_path_buf(),
            reason: format!("line {} parse error: {}", i + 1, e),
        })?;
        out.push(row);
    }

    debug!(path = %path.display(), rows = out.len(), "index rows loaded");
    Ok(out)
}

/// Writes rows as JSONL, truncating any existing file.
pub fn write_rows(jsonl_path: impl AsRef<Path>, rows: &[IndexedEntry]) -> Result<(), IndexError> {
    let mut w = BufWriter::new(File::create(jsonl_path.as_ref())?);
    for row in rows {
        serde_json::to_writer(&mut w, row)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_line_reports_position() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("entries.jsonl");
        std::fs::write(
            &p,
            "{\"id\":0,\"text\":\"t\",\"question\":\"q\",\"answer\":\"a\",\"embedding\":[1.0]}\n\nnot json\n",
        )
        .unwrap();

        let err = read_all_rows(&p).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("entries.jsonl");
        let row = IndexedEntry {
            id: 7,
            text: "Q: q\nA: a".into(),
            question: "q".into(),
            answer: "a".into(),
            embedding: vec![0.5, 0.5],
        };
        write_rows(&p, &[row]).unwrap();
        let mut raw = std::fs::read_to_string(&p).unwrap();
        raw.push_str("\n   \n");
        std::fs::write(&p, raw).unwrap();

        let rows = read_all_rows(&p).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 7);
        assert_eq!(rows[0].text, "Q: q\nA: a");
    }
}
