//! Seed dataset loader.

use std::path::Path;

use tracing::info;

use crate::{errors::IndexError, record::FaqEntry};

/// Reads the FAQ dataset: a JSON array of `{question, answer}` objects.
///
/// # Errors
/// - [`IndexError::Io`] if the file cannot be read.
/// - [`IndexError::Parse`] if the content is not an array of entries.
pub fn load_faq_json(path: impl AsRef<Path>) -> Result<Vec<FaqEntry>, IndexError> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading FAQ dataset");
    let raw = std::fs::read_to_string(path)?;
    let entries = parse_faq_json(&raw)?;
    info!(count = entries.len(), "FAQ dataset loaded");
    Ok(entries)
}

/// Parses dataset JSON already in memory.
pub fn parse_faq_json(raw: &str) -> Result<Vec<FaqEntry>, IndexError> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_and_ignores_extra_fields() {
        let raw = r#"[
            {"question": "What is the deadline?", "answer": "March 1.", "tag": "admin"},
            {"question": "What is the deadline?", "answer": "March 1."}
        ]"#;
        let entries = parse_faq_json(raw).unwrap();
        assert_eq!(entries.len(), 2);
        // duplicates are kept as-is
        assert_eq!(entries[0], entries[1]);
    }

    #[test]
    fn rejects_non_array() {
        assert!(matches!(
            parse_faq_json(r#"{"question": "q", "answer": "a"}"#),
            Err(IndexError::Parse(_))
        ));
    }

    #[test]
    fn rejects_missing_answer() {
        assert!(parse_faq_json(r#"[{"question": "q"}]"#).is_err());
    }
}
