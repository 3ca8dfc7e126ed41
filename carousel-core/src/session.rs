//! Editor session - the top-level owner of editor state.
//!
//! Wires a [`Document`], an [`InMemorySurface`] and a [`SyncController`]
//! together and routes every slide-level operation through the
//! controller, so callers cannot bypass the flush/load sequencing that
//! keeps the two consistent.

use std::path::Path;

use crate::{
    persist, CarouselResult, Document, InMemorySurface, SceneSurface, SyncController, SyncState,
    Template,
};

/// An open editing session over one document.
#[derive(Debug)]
pub struct EditorSession {
    document: Document,
    surface: InMemorySurface,
    sync: SyncController,
}

impl EditorSession {
    /// Start a session on a new single-slide document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            surface: InMemorySurface::new(),
            sync: SyncController::new(),
        }
    }

    /// Start a session on a template's slides, with slide 0 active.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is empty or its first slide's
    /// scene JSON is malformed.
    pub fn from_template(template: &Template) -> CarouselResult<Self> {
        let mut session = Self {
            document: template.instantiate()?,
            surface: InMemorySurface::new(),
            sync: SyncController::new(),
        };
        session
            .sync
            .switch_slide(&mut session.document, &mut session.surface, 0)?;
        Ok(session)
    }

    /// The document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The live surface.
    #[must_use]
    pub fn surface(&self) -> &InMemorySurface {
        &self.surface
    }

    /// Current synchronization state.
    #[must_use]
    pub fn sync_state(&self) -> SyncState {
        self.sync.state()
    }

    /// Number of slides.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.document.len()
    }

    /// The active slide index.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.document.active_index()
    }

    /// Split borrow for the property mediators, which operate on the
    /// document, surface and controller together.
    pub fn parts_mut(
        &mut self,
    ) -> (&mut Document, &mut dyn SceneSurface, &mut SyncController) {
        (&mut self.document, &mut self.surface, &mut self.sync)
    }

    /// Switch to the slide at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range index or a malformed stored
    /// scene.
    pub fn go_to_slide(&mut self, index: usize) -> CarouselResult<()> {
        self.sync
            .switch_slide(&mut self.document, &mut self.surface, index)
    }

    /// Advance to the next slide. No-op on the last slide.
    ///
    /// # Errors
    ///
    /// Returns an error if the target slide's stored scene is malformed.
    pub fn next_slide(&mut self) -> CarouselResult<usize> {
        let index = self.document.active_index();
        if index + 1 < self.document.len() {
            self.go_to_slide(index + 1)?;
        }
        Ok(self.document.active_index())
    }

    /// Go back to the previous slide. No-op on the first slide.
    ///
    /// # Errors
    ///
    /// Returns an error if the target slide's stored scene is malformed.
    pub fn previous_slide(&mut self) -> CarouselResult<usize> {
        let index = self.document.active_index();
        if index > 0 {
            self.go_to_slide(index - 1)?;
        }
        Ok(self.document.active_index())
    }

    /// Append a new empty slide and make it active.
    ///
    /// Pending surface changes are committed to the outgoing slide
    /// before the append, so they cannot land in the new one.
    ///
    /// # Errors
    ///
    /// Returns an error if committing the outgoing slide fails.
    pub fn append_slide(&mut self) -> CarouselResult<usize> {
        self.sync.pump(&mut self.document, &mut self.surface)?;
        let index = self.document.append_slide();
        self.sync
            .switch_slide(&mut self.document, &mut self.surface, index)?;
        Ok(index)
    }

    /// Remove the slide at `index` and reload whatever becomes active.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CarouselError::LastSlide`] when only one slide
    /// remains, or an index error. State is untouched on error.
    pub fn remove_slide(&mut self, index: usize) -> CarouselResult<()> {
        self.sync.pump(&mut self.document, &mut self.surface)?;
        self.document.remove_slide(index)?;
        let active = self.document.active_index();
        self.sync
            .switch_slide(&mut self.document, &mut self.surface, active)
    }

    /// Duplicate the slide at `index` and activate the copy.
    ///
    /// # Errors
    ///
    /// Returns an error for a bad index or a malformed stored scene.
    pub fn duplicate_slide(&mut self, index: usize) -> CarouselResult<usize> {
        // Commit first so an active source slide is copied with its
        // latest content.
        self.sync.pump(&mut self.document, &mut self.surface)?;
        let copy = self.document.duplicate_slide(index)?;
        self.sync
            .switch_slide(&mut self.document, &mut self.surface, copy)?;
        Ok(copy)
    }

    /// Serialize the whole document, committing pending changes first.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit or serialization fails.
    pub fn export(&mut self) -> CarouselResult<String> {
        self.sync.pump(&mut self.document, &mut self.surface)?;
        persist::export_document(&self.document)
    }

    /// Replace the session's document with an imported one.
    ///
    /// On any error the current document and surface are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error for undecodable JSON or an invalid document.
    pub fn import(&mut self, json: &str) -> CarouselResult<()> {
        let document = persist::import_document(json)?;
        self.install(document)
    }

    /// Save the document to `path`, committing pending changes first.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit, serialization or write fails.
    pub fn save(&mut self, path: &Path) -> CarouselResult<()> {
        self.sync.pump(&mut self.document, &mut self.surface)?;
        persist::save_to_file(&self.document, path)
    }

    /// Load a document from `path`, replacing the session's state.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or decode fails; the current
    /// document and surface are untouched in that case.
    pub fn load(&mut self, path: &Path) -> CarouselResult<()> {
        let document = persist::load_from_file(path)?;
        self.install(document)
    }

    fn install(&mut self, document: Document) -> CarouselResult<()> {
        let index = document.active_index();
        // Notifications from the outgoing document must not be pulled
        // into the incoming one.
        let _ = self.surface.take_events();
        self.document = document;
        self.sync
            .switch_slide(&mut self.document, &mut self.surface, index)
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ObjectKind, SceneObject, ShapeKind, Slide};

    fn rect() -> SceneObject {
        SceneObject::new(ObjectKind::Shape {
            shape: ShapeKind::Rectangle,
            corner_radius: 0.0,
        })
        .with_fill("#ff8800")
    }

    #[test]
    fn test_new_session_is_single_empty_slide() {
        let session = EditorSession::new();
        assert_eq!(session.slide_count(), 1);
        assert_eq!(session.active_index(), 0);
        assert_eq!(session.sync_state(), SyncState::Idle);
        assert!(session.surface().scene().is_empty());
    }

    #[test]
    fn test_append_does_not_carry_content_forward() {
        let mut session = EditorSession::new();
        {
            let (_, surface, _) = session.parts_mut();
            surface.add_object(rect());
        }

        let index = session.append_slide().expect("append");
        assert_eq!(index, 1);
        assert!(session.surface().scene().is_empty());
        // The pending change landed on slide 0 before the switch.
        assert!(session
            .document()
            .slide(0)
            .and_then(|s| s.scene_json.as_ref())
            .is_some());
    }

    #[test]
    fn test_navigation_clamps_at_ends() {
        let mut session = EditorSession::new();
        session.append_slide().expect("append");

        assert_eq!(session.next_slide().expect("next"), 1);
        assert_eq!(session.next_slide().expect("next"), 1);
        assert_eq!(session.previous_slide().expect("prev"), 0);
        assert_eq!(session.previous_slide().expect("prev"), 0);
    }

    #[test]
    fn test_remove_active_reloads_survivor() {
        let mut session = EditorSession::new();
        {
            let (_, surface, _) = session.parts_mut();
            surface.add_object(rect());
        }
        session.append_slide().expect("append");

        session.remove_slide(1).expect("remove");
        assert_eq!(session.slide_count(), 1);
        assert_eq!(session.active_index(), 0);
        // Slide 0's content is back on the surface.
        assert_eq!(session.surface().scene().object_count(), 1);
    }

    #[test]
    fn test_duplicate_copies_latest_content() {
        let mut session = EditorSession::new();
        {
            let (_, surface, _) = session.parts_mut();
            surface.add_object(rect());
        }

        let copy = session.duplicate_slide(0).expect("duplicate");
        assert_eq!(copy, 1);
        assert_eq!(session.surface().scene().object_count(), 1);
        assert_eq!(session.document().slide(0), session.document().slide(1));
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut session = EditorSession::new();
        {
            let (_, surface, _) = session.parts_mut();
            surface.add_object(rect());
        }
        session.append_slide().expect("append");
        let json = session.export().expect("export");

        let mut other = EditorSession::new();
        other.import(&json).expect("import");
        assert_eq!(other.document(), session.document());
        assert_eq!(other.active_index(), 1);
    }

    #[test]
    fn test_failed_import_preserves_state() {
        let mut session = EditorSession::new();
        session.append_slide().expect("append");
        let before = session.document().clone();

        assert!(session.import("{broken").is_err());
        assert_eq!(session.document(), &before);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");

        let mut session = EditorSession::new();
        {
            let (_, surface, _) = session.parts_mut();
            surface.add_object(rect());
        }
        session.save(&path).expect("save");

        let mut other = EditorSession::new();
        other.load(&path).expect("load");
        assert_eq!(other.surface().scene().object_count(), 1);
    }

    #[test]
    fn test_from_template() {
        let template = Template {
            name: "t".to_string(),
            preview_images: Vec::new(),
            slides: vec![Slide::empty(), Slide::empty(), Slide::empty()],
        };
        let session = EditorSession::from_template(&template).expect("session");
        assert_eq!(session.slide_count(), 3);
        assert_eq!(session.active_index(), 0);
    }
}
