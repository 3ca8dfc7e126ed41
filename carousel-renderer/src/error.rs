//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum RenderError {
    /// SVG generation or parsing failed.
    #[error("SVG rendering failed: {0}")]
    Svg(String),

    /// Raster encoding failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// A specific slide could not be rendered.
    #[error("Slide {index} failed to render: {reason}")]
    Slide {
        /// Zero-based slide index.
        index: usize,
        /// What went wrong.
        reason: String,
    },
}
