//! # Carousel Core
//!
//! State model and synchronization engine for a slide-carousel editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              carousel-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Document Store  │  Scene Surface           │
//! │  - Slides        │  - Object CRUD           │
//! │  - Active index  │  - Selection             │
//! │  - Persistence   │  - Change events         │
//! ├─────────────────────────────────────────────┤
//! │  Sync Controller │  Property Mediators      │
//! │  - Pump/commit   │  - Text / Shape / Image  │
//! │  - Slide switch  │  - Background            │
//! │  - Stale tags    │  - Validation            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The document is the source of truth; the surface is a cache of the
//! active slide. The [`SyncController`] is the only component that
//! moves scene data between them.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod document;
pub mod error;
pub mod event;
pub mod mediator;
pub mod object;
pub mod persist;
pub mod scene;
pub mod session;
pub mod surface;
pub mod sync;
pub mod template;

pub use document::{Document, Slide, SlidePatch};
pub use error::{CarouselError, CarouselResult};
pub use event::SurfaceEvent;
pub use mediator::{
    AddShape, BackgroundMediator, BorderStyle, CatalogFontLoader, FontLoader, ImageMediator,
    Mediator, ShapeMediator, TextMediator, DEFAULT_FILL, DEFAULT_FONT, DEFAULT_IMAGE_BORDER, FONTS,
};
pub use object::{
    FilterPreset, FontStyle, FontWeight, ImageFilter, ObjectId, ObjectKind, SceneObject, ShapeKind,
    Transform,
};
pub use persist::DocumentBlob;
pub use scene::{Scene, DEFAULT_BACKGROUND, SURFACE_SIZE};
pub use session::EditorSession;
pub use surface::{InMemorySurface, SceneSurface};
pub use sync::{CommitTag, SyncController, SyncState};
pub use template::{apply_generated_text, scan_text_slots, text_outline, Template};

/// Carousel core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
