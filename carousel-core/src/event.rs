//! Typed change notifications emitted by the scene surface.

use serde::{Deserialize, Serialize};

use crate::ObjectId;

/// A change notification from the scene surface adapter.
///
/// The synchronization controller is the single consumer; every event
/// means "the live surface no longer matches the stored slide".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// An object was added to the surface.
    ObjectAdded {
        /// The added object.
        id: ObjectId,
    },
    /// An object was removed from the surface.
    ObjectRemoved {
        /// The removed object.
        id: ObjectId,
    },
    /// An object's properties changed.
    ObjectModified {
        /// The modified object.
        id: ObjectId,
    },
    /// The selection changed (created, updated, or cleared).
    SelectionChanged {
        /// The newly selected object, if any.
        id: Option<ObjectId>,
    },
}

impl SurfaceEvent {
    /// Whether this event reflects a content change (as opposed to a
    /// pure selection change). Both kinds trigger a commit; the
    /// distinction only matters for logging.
    #[must_use]
    pub fn is_content_change(&self) -> bool {
        !matches!(self, Self::SelectionChanged { .. })
    }
}
