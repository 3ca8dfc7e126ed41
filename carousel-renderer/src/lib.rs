//! # Carousel Renderer
//!
//! Export pipeline for carousel documents: scene → SVG intermediate →
//! resvg/tiny-skia rasterization → PNG/JPEG, plus single- and
//! multi-page PDF via printpdf.
//!
//! Export always reads from the document's stored slides, never from a
//! live editing surface, so a render job cannot observe a half-switched
//! slide.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;

pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, ExportFormat, SlideExporter};

/// Carousel renderer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
