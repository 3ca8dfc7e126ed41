//! Error types for carousel editor operations.

use thiserror::Error;

/// Result type for carousel editor operations.
pub type CarouselResult<T> = Result<T, CarouselError>;

/// Errors that can occur in the editor core.
#[derive(Debug, Error)]
pub enum CarouselError {
    /// Slide index outside the document bounds.
    #[error("Slide index {index} out of range (document has {len} slides)")]
    SlideIndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Slide count at the time of the call.
        len: usize,
    },

    /// Removal refused because the document would be left empty.
    #[error("Cannot remove the last remaining slide")]
    LastSlide,

    /// A replacement document failed invariant validation.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Object not found on the surface.
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// No object is currently selected.
    #[error("No active object selected")]
    NoSelection,

    /// The selected object is not of the kind this operation applies to.
    #[error("Operation does not apply to the selected object: {0}")]
    WrongObjectKind(String),

    /// A property value failed validation.
    #[error("Invalid property value: {0}")]
    InvalidProperty(String),

    /// Scene JSON could not be decoded into a scene graph.
    #[error("Malformed scene JSON: {0}")]
    MalformedScene(String),

    /// Scene serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Font resource failed to load.
    #[error("Failed to load font '{family}': {reason}")]
    FontLoad {
        /// Requested font family.
        family: String,
        /// Loader-reported reason.
        reason: String,
    },

    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generated content did not cover all template text slots.
    #[error("Generated content incomplete: {0}")]
    IncompleteContent(String),
}
