//! Synchronous project file I/O. Save and load block the UI thread for
//! their (short) duration; errors are surfaced as status messages, never
//! fatal. `load` returns a fresh `Document` only on success, so the caller's
//! current document stays untouched when a file is unreadable or malformed.

use crate::document::Document;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("could not access file: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a valid project file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub(crate) fn save(path: &Path, doc: &Document) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "project saved");
    Ok(())
}

pub(crate) fn load(path: &Path) -> Result<Document, StorageError> {
    let json = fs::read_to_string(path)?;
    let doc: Document = serde_json::from_str(&json)?;
    info!(path = %path.display(), elements = doc.elements.len(), "project loaded");
    Ok(doc)
}

/// Writes the generated page text as-is (UTF-8).
pub(crate) fn export_html(path: &Path, html: &str) -> Result<(), StorageError> {
    fs::write(path, html)?;
    info!(path = %path.display(), "HTML exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use egui::pos2;

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.webdesign");

        let mut doc = Document::default();
        let id = doc.add_element(ElementKind::Button, pos2(12.0, 34.0));
        doc.get_mut(id).unwrap().props.text = "Go".into();
        doc.global_css = "button { padding: 4px; }".into();

        save(&path, &doc).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.elements.len(), 1);
        assert_eq!(loaded.elements[0].props.text, "Go");
        assert_eq!(loaded.global_css, doc.global_css);
    }

    #[test]
    fn test_load_malformed_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.webdesign");
        fs::write(&path, b"this is not json {").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StorageError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.webdesign")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)), "got {err:?}");
    }

    #[test]
    fn test_export_html_writes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        let html = "<!DOCTYPE html>\n<html>\n</html>";
        export_html(&path, html).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), html);
    }
}
