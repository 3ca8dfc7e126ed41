//! Document persistence.
//!
//! The on-disk format is a single JSON object:
//!
//! ```json
//! { "editorState": [{ "json": {...}, "bgColor": "#ffffff" }], "activeIndex": 0 }
//! ```
//!
//! Export is lossless; importing an exported blob reproduces the
//! document exactly, including the active index. Import validates the
//! document invariants before any state changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CarouselError, CarouselResult, Document, Slide};

/// Serialized form of a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentBlob {
    /// All slides, in order.
    #[serde(rename = "editorState")]
    pub slides: Vec<Slide>,
    /// Active slide index at export time.
    #[serde(rename = "activeIndex")]
    pub active_index: usize,
}

impl DocumentBlob {
    /// Capture a document into its serialized form.
    #[must_use]
    pub fn from_document(document: &Document) -> Self {
        Self {
            slides: document.slides().to_vec(),
            active_index: document.active_index(),
        }
    }

    /// Rebuild a document from a blob.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidDocument`] if the blob holds no
    /// slides or its active index is out of range.
    pub fn into_document(self) -> CarouselResult<Document> {
        let mut document = Document::new();
        document.replace(self.slides, self.active_index)?;
        Ok(document)
    }
}

/// Export a document to a JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_document(document: &Document) -> CarouselResult<String> {
    let blob = DocumentBlob::from_document(document);
    Ok(serde_json::to_string(&blob)?)
}

/// Import a document from a JSON string produced by [`export_document`].
///
/// # Errors
///
/// Returns [`CarouselError::Serialization`] on undecodable JSON or
/// [`CarouselError::InvalidDocument`] if the decoded blob violates the
/// document invariants. The caller's existing document is untouched
/// either way.
pub fn import_document(json: &str) -> CarouselResult<Document> {
    let blob: DocumentBlob = serde_json::from_str(json)?;
    blob.into_document()
}

/// Write a document to `path` as JSON.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub fn save_to_file(document: &Document, path: &Path) -> CarouselResult<()> {
    let json = export_document(document)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), slides = document.len(), "document saved");
    Ok(())
}

/// Read a document from a JSON file written by [`save_to_file`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents do not
/// decode to a valid document.
pub fn load_from_file(path: &Path) -> CarouselResult<Document> {
    let json = std::fs::read_to_string(path)?;
    let document = import_document(&json)?;
    tracing::info!(path = %path.display(), slides = document.len(), "document loaded");
    Ok(document)
}

/// Validate a blob without building a document from it.
///
/// # Errors
///
/// Returns [`CarouselError::InvalidDocument`] describing the first
/// violated invariant.
pub fn validate_blob(blob: &DocumentBlob) -> CarouselResult<()> {
    if blob.slides.is_empty() {
        return Err(CarouselError::InvalidDocument(
            "document must contain at least one slide".to_string(),
        ));
    }
    if blob.active_index >= blob.slides.len() {
        return Err(CarouselError::InvalidDocument(format!(
            "active index {} out of range for {} slides",
            blob.active_index,
            blob.slides.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SlidePatch;

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.update_slide_at(0, SlidePatch::scene(serde_json::json!({"objects": []})))
            .expect("patch");
        doc.append_slide();
        doc.update_slide_at(1, SlidePatch::background("#1a1a2e"))
            .expect("patch");
        doc
    }

    #[test]
    fn test_export_import_round_trip() {
        let doc = sample_document();
        let json = export_document(&doc).expect("export");
        let restored = import_document(&json).expect("import");
        assert_eq!(restored, doc);
    }

    #[test]
    fn test_export_uses_wire_field_names() {
        let doc = Document::new();
        let json = export_document(&doc).expect("export");
        assert!(json.contains("\"editorState\""));
        assert!(json.contains("\"activeIndex\""));
        assert!(json.contains("\"bgColor\""));
    }

    #[test]
    fn test_import_rejects_empty_slide_list() {
        let result = import_document(r#"{"editorState": [], "activeIndex": 0}"#);
        assert!(matches!(result, Err(CarouselError::InvalidDocument(_))));
    }

    #[test]
    fn test_import_rejects_out_of_range_index() {
        let result = import_document(
            r##"{"editorState": [{"json": null, "bgColor": "#ffffff"}], "activeIndex": 4}"##,
        );
        assert!(matches!(result, Err(CarouselError::InvalidDocument(_))));
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        let result = import_document("not json at all");
        assert!(matches!(result, Err(CarouselError::Serialization(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("carousel.json");

        let doc = sample_document();
        save_to_file(&doc, &path).expect("save");
        let restored = load_from_file(&path).expect("load");
        assert_eq!(restored, doc);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_from_file(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(CarouselError::Io(_))));
    }

    #[test]
    fn test_validate_blob() {
        let good = DocumentBlob {
            slides: vec![Slide::empty()],
            active_index: 0,
        };
        assert!(validate_blob(&good).is_ok());

        let bad = DocumentBlob {
            slides: vec![Slide::empty()],
            active_index: 1,
        };
        assert!(validate_blob(&bad).is_err());
    }
}
