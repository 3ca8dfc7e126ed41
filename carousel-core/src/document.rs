//! Document state store - the ordered slide collection and active index.
//!
//! The document is the sole source of truth for persistence; the live
//! surface only caches `slides[active_index]`. This store is the
//! exclusive writer of both the slide list and the active index, and
//! upholds two invariants in every reachable state: the document holds
//! at least one slide, and `active_index` is in range.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CarouselError, CarouselResult, DEFAULT_BACKGROUND};

/// One carousel page.
///
/// `scene_json` is the opaque serialized scene graph; `None` means the
/// slide is empty and has never been rendered. The background color is
/// kept out-of-band so background edits do not force a scene
/// reserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Serialized scene graph, or `None` for an empty slide.
    #[serde(rename = "json")]
    pub scene_json: Option<Value>,
    /// Background color as a hex string.
    #[serde(rename = "bgColor")]
    pub background_color: String,
}

impl Slide {
    /// Create an empty slide with the default background.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            scene_json: None,
            background_color: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl Default for Slide {
    fn default() -> Self {
        Self::empty()
    }
}

/// Partial slide update, merged field-by-field by [`Document::update_slide_at`].
#[derive(Debug, Clone, Default)]
pub struct SlidePatch {
    /// New scene snapshot (`Some(None)` explicitly clears it).
    pub scene_json: Option<Option<Value>>,
    /// New background color.
    pub background_color: Option<String>,
}

impl SlidePatch {
    /// Patch that replaces the scene snapshot.
    #[must_use]
    pub fn scene(json: Value) -> Self {
        Self {
            scene_json: Some(Some(json)),
            ..Self::default()
        }
    }

    /// Patch that replaces the background color.
    #[must_use]
    pub fn background(color: impl Into<String>) -> Self {
        Self {
            background_color: Some(color.into()),
            ..Self::default()
        }
    }
}

/// The ordered slide sequence plus the active-slide pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    slides: Vec<Slide>,
    active_index: usize,
}

impl Document {
    /// Create a document with a single empty slide at index 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slides: vec![Slide::empty()],
            active_index: 0,
        }
    }

    /// Create a document from pre-built slides (e.g. a template).
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidDocument`] if `slides` is empty.
    pub fn from_slides(slides: Vec<Slide>) -> CarouselResult<Self> {
        if slides.is_empty() {
            return Err(CarouselError::InvalidDocument(
                "document must contain at least one slide".to_string(),
            ));
        }
        Ok(Self {
            slides,
            active_index: 0,
        })
    }

    /// All slides, in order.
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false; a document holds at least one slide. Present for
    /// API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// The active slide index.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// The active slide.
    #[must_use]
    pub fn active_slide(&self) -> &Slide {
        &self.slides[self.active_index]
    }

    /// Get a slide by index.
    #[must_use]
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Point the active index at another slide.
    ///
    /// The caller (the synchronization controller) is responsible for
    /// pushing the newly active slide's scene to the surface; this
    /// store only moves the pointer.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::SlideIndexOutOfRange`] without touching
    /// state if `index` is out of range.
    pub fn set_active_index(&mut self, index: usize) -> CarouselResult<()> {
        if index >= self.slides.len() {
            return Err(CarouselError::SlideIndexOutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        self.active_index = index;
        Ok(())
    }

    /// Append a new empty slide and make it active.
    ///
    /// The append and the index move happen in one call, so no reader
    /// can observe a length/index mismatch.
    pub fn append_slide(&mut self) -> usize {
        self.slides.push(Slide::empty());
        self.active_index = self.slides.len() - 1;
        tracing::debug!(index = self.active_index, "slide appended");
        self.active_index
    }

    /// Remove the slide at `index`.
    ///
    /// If the removed slide is at or before the active one, the active
    /// index shifts down, floored at 0.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::LastSlide`] when only one slide remains,
    /// or [`CarouselError::SlideIndexOutOfRange`] for a bad index. State
    /// is untouched on error.
    pub fn remove_slide(&mut self, index: usize) -> CarouselResult<Slide> {
        if self.slides.len() <= 1 {
            return Err(CarouselError::LastSlide);
        }
        if index >= self.slides.len() {
            return Err(CarouselError::SlideIndexOutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        let removed = self.slides.remove(index);
        if index <= self.active_index {
            self.active_index = self.active_index.saturating_sub(1);
        }
        tracing::debug!(index, active = self.active_index, "slide removed");
        Ok(removed)
    }

    /// Insert a deep copy of `slides[index]` immediately after it and
    /// make the copy active.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::SlideIndexOutOfRange`] for a bad index.
    pub fn duplicate_slide(&mut self, index: usize) -> CarouselResult<usize> {
        let source = self
            .slides
            .get(index)
            .ok_or(CarouselError::SlideIndexOutOfRange {
                index,
                len: self.slides.len(),
            })?;
        // Deep copy: the original and the duplicate must never alias,
        // or a later serialization of one would clobber the other.
        let copy = source.clone();
        self.slides.insert(index + 1, copy);
        self.active_index = index + 1;
        Ok(self.active_index)
    }

    /// Merge a partial update into `slides[index]`.
    ///
    /// Used exclusively by the synchronization controller (scene
    /// snapshots) and the background mediator (background color).
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::SlideIndexOutOfRange`] for a bad index.
    pub fn update_slide_at(&mut self, index: usize, patch: SlidePatch) -> CarouselResult<()> {
        let len = self.slides.len();
        let slide = self
            .slides
            .get_mut(index)
            .ok_or(CarouselError::SlideIndexOutOfRange { index, len })?;
        if let Some(scene_json) = patch.scene_json {
            slide.scene_json = scene_json;
        }
        if let Some(background_color) = patch.background_color {
            slide.background_color = background_color;
        }
        Ok(())
    }

    /// Bulk overwrite, used by import/load.
    ///
    /// Validates the document invariants before committing; on failure
    /// the prior state is left intact.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidDocument`] for an empty slide
    /// list or an out-of-range index.
    pub fn replace(&mut self, slides: Vec<Slide>, active_index: usize) -> CarouselResult<()> {
        if slides.is_empty() {
            return Err(CarouselError::InvalidDocument(
                "document must contain at least one slide".to_string(),
            ));
        }
        if active_index >= slides.len() {
            return Err(CarouselError::InvalidDocument(format!(
                "active index {active_index} out of range for {} slides",
                slides.len()
            )));
        }
        self.slides = slides;
        self.active_index = active_index;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(n: usize) -> Document {
        let mut doc = Document::new();
        for _ in 1..n {
            doc.append_slide();
        }
        doc
    }

    #[test]
    fn test_new_document_has_one_empty_slide() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.active_index(), 0);
        assert!(doc.active_slide().scene_json.is_none());
        assert_eq!(doc.active_slide().background_color, DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_append_activates_new_last_slide() {
        let mut doc = Document::new();
        doc.append_slide();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.active_index(), 1);
        assert!(doc.slide(1).and_then(|s| s.scene_json.as_ref()).is_none());
    }

    #[test]
    fn test_remove_shifts_active_down() {
        let mut doc = doc_with(3);
        doc.set_active_index(1).expect("set");
        doc.remove_slide(1).expect("remove");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.active_index(), 0);
    }

    #[test]
    fn test_remove_after_active_keeps_active() {
        let mut doc = doc_with(3);
        doc.set_active_index(0).expect("set");
        doc.remove_slide(2).expect("remove");
        assert_eq!(doc.active_index(), 0);
    }

    #[test]
    fn test_remove_last_slide_refused() {
        let mut doc = Document::new();
        let result = doc.remove_slide(0);
        assert!(matches!(result, Err(CarouselError::LastSlide)));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_set_active_out_of_range_is_noop() {
        let mut doc = doc_with(2);
        let result = doc.set_active_index(5);
        assert!(matches!(
            result,
            Err(CarouselError::SlideIndexOutOfRange { index: 5, len: 2 })
        ));
        assert_eq!(doc.active_index(), 1);
    }

    #[test]
    fn test_duplicate_inserts_structural_copy_after_source() {
        let mut doc = doc_with(2);
        doc.update_slide_at(0, SlidePatch::scene(serde_json::json!({"objects": []})))
            .expect("patch");
        doc.update_slide_at(0, SlidePatch::background("#123456"))
            .expect("patch");

        let index = doc.duplicate_slide(0).expect("duplicate");
        assert_eq!(index, 1);
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.active_index(), 1);
        assert_eq!(doc.slide(1), doc.slide(0));
    }

    #[test]
    fn test_duplicate_does_not_alias() {
        let mut doc = Document::new();
        doc.update_slide_at(0, SlidePatch::scene(serde_json::json!({"v": 1})))
            .expect("patch");
        doc.duplicate_slide(0).expect("duplicate");

        doc.update_slide_at(1, SlidePatch::scene(serde_json::json!({"v": 2})))
            .expect("patch");
        assert_eq!(
            doc.slide(0).and_then(|s| s.scene_json.clone()),
            Some(serde_json::json!({"v": 1}))
        );
    }

    #[test]
    fn test_replace_validates_before_commit() {
        let mut doc = doc_with(2);
        let before = doc.clone();

        assert!(doc.replace(Vec::new(), 0).is_err());
        assert_eq!(doc, before);

        assert!(doc.replace(vec![Slide::empty()], 3).is_err());
        assert_eq!(doc, before);

        doc.replace(vec![Slide::empty(), Slide::empty()], 1)
            .expect("valid replace");
        assert_eq!(doc.active_index(), 1);
    }

    #[test]
    fn test_patch_can_clear_scene() {
        let mut doc = Document::new();
        doc.update_slide_at(0, SlidePatch::scene(serde_json::json!({})))
            .expect("patch");
        assert!(doc.active_slide().scene_json.is_some());

        doc.update_slide_at(
            0,
            SlidePatch {
                scene_json: Some(None),
                ..SlidePatch::default()
            },
        )
        .expect("patch");
        assert!(doc.active_slide().scene_json.is_none());
    }
}
