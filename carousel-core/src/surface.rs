//! Scene surface adapter - the capability seam over the drawing engine.
//!
//! The live surface is a *cache* of the active slide's scene graph,
//! never a source of truth. Mutations emit [`SurfaceEvent`]s into a
//! drain queue; the synchronization controller is the only consumer
//! and turns them into document commits.

use serde_json::Value;

use crate::{
    CarouselError, CarouselResult, ObjectId, Scene, SceneObject, SurfaceEvent, SURFACE_SIZE,
};

/// Capability surface over the drawing engine.
///
/// `load` fully replaces surface contents and must be treated as
/// complete only when it returns; implementations backed by an engine
/// with asynchronous re-layout resolve that wait internally before
/// returning.
pub trait SceneSurface {
    /// Add an object to the surface, on top of existing objects.
    fn add_object(&mut self, object: SceneObject) -> ObjectId;

    /// Remove an object from the surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not present.
    fn remove_object(&mut self, id: ObjectId) -> CarouselResult<SceneObject>;

    /// The currently selected object, if any.
    fn active_object(&self) -> Option<&SceneObject>;

    /// Change the selection. `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the target object is not present.
    fn set_active(&mut self, id: Option<ObjectId>) -> CarouselResult<()>;

    /// Mutate the selected object through a closure.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::NoSelection`] if nothing is selected.
    fn modify_active(&mut self, f: &mut dyn FnMut(&mut SceneObject)) -> CarouselResult<()>;

    /// Move the selected object to the top of the paint order.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::NoSelection`] if nothing is selected.
    fn bring_active_to_front(&mut self) -> CarouselResult<()>;

    /// Move the selected object to the bottom of the paint order.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::NoSelection`] if nothing is selected.
    fn send_active_to_back(&mut self) -> CarouselResult<()>;

    /// Snapshot all current objects and surface-level properties.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn serialize(&self) -> CarouselResult<Value>;

    /// Fully replace surface contents. `None` clears to an empty scene.
    ///
    /// On malformed JSON the surface is cleared to empty rather than
    /// left partially loaded, and the error is returned to the caller.
    /// Loading emits no change notifications.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::MalformedScene`] on undecodable input.
    fn load(&mut self, json: Option<&Value>) -> CarouselResult<()>;

    /// Set the surface background color.
    fn set_background(&mut self, color: &str);

    /// The surface background color.
    fn background(&self) -> &str;

    /// Force a redraw. Side effect only.
    fn render(&mut self);

    /// Drain all pending change notifications, oldest first.
    fn take_events(&mut self) -> Vec<SurfaceEvent>;

    /// Whether any change notifications are waiting to be drained.
    fn has_pending_events(&self) -> bool;
}

/// In-memory surface implementation backing the editor session.
#[derive(Debug, Clone, Default)]
pub struct InMemorySurface {
    scene: Scene,
    active: Option<ObjectId>,
    events: Vec<SurfaceEvent>,
}

impl InMemorySurface {
    /// Create an empty surface with the default square size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the underlying scene, for tests and export.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Surface width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.scene.width
    }

    /// Surface height in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.scene.height
    }

    fn emit(&mut self, event: SurfaceEvent) {
        self.events.push(event);
    }
}

impl SceneSurface for InMemorySurface {
    fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = self.scene.add_object(object);
        self.emit(SurfaceEvent::ObjectAdded { id });
        // Engine behavior: a newly added object becomes the selection.
        self.active = Some(id);
        self.emit(SurfaceEvent::SelectionChanged { id: Some(id) });
        id
    }

    fn remove_object(&mut self, id: ObjectId) -> CarouselResult<SceneObject> {
        let object = self.scene.remove_object(id)?;
        self.emit(SurfaceEvent::ObjectRemoved { id });
        if self.active == Some(id) {
            self.active = None;
            self.emit(SurfaceEvent::SelectionChanged { id: None });
        }
        Ok(object)
    }

    fn active_object(&self) -> Option<&SceneObject> {
        self.active.and_then(|id| self.scene.get_object(id))
    }

    fn set_active(&mut self, id: Option<ObjectId>) -> CarouselResult<()> {
        if let Some(id) = id {
            if self.scene.get_object(id).is_none() {
                return Err(CarouselError::ObjectNotFound(id.to_string()));
            }
        }
        if self.active != id {
            self.active = id;
            self.emit(SurfaceEvent::SelectionChanged { id });
        }
        Ok(())
    }

    fn modify_active(&mut self, f: &mut dyn FnMut(&mut SceneObject)) -> CarouselResult<()> {
        let id = self.active.ok_or(CarouselError::NoSelection)?;
        let object = self
            .scene
            .get_object_mut(id)
            .ok_or_else(|| CarouselError::ObjectNotFound(id.to_string()))?;
        f(object);
        self.emit(SurfaceEvent::ObjectModified { id });
        Ok(())
    }

    fn bring_active_to_front(&mut self) -> CarouselResult<()> {
        let id = self.active.ok_or(CarouselError::NoSelection)?;
        self.scene.bring_to_front(id)?;
        self.emit(SurfaceEvent::ObjectModified { id });
        Ok(())
    }

    fn send_active_to_back(&mut self) -> CarouselResult<()> {
        let id = self.active.ok_or(CarouselError::NoSelection)?;
        self.scene.send_to_back(id)?;
        self.emit(SurfaceEvent::ObjectModified { id });
        Ok(())
    }

    fn serialize(&self) -> CarouselResult<Value> {
        self.scene.to_json()
    }

    fn load(&mut self, json: Option<&Value>) -> CarouselResult<()> {
        // Stale notifications from the outgoing scene must not survive
        // into the incoming one.
        self.events.clear();
        self.active = None;

        match json {
            None => {
                self.scene = Scene::new(self.scene.width, self.scene.height);
                Ok(())
            }
            Some(value) => match Scene::from_json(value) {
                Ok(scene) => {
                    self.scene = scene;
                    Ok(())
                }
                Err(e) => {
                    tracing::warn!("Scene load failed, clearing surface: {e}");
                    self.scene = Scene::new(SURFACE_SIZE, SURFACE_SIZE);
                    Err(e)
                }
            },
        }
    }

    fn set_background(&mut self, color: &str) {
        self.scene.background_color = color.to_string();
    }

    fn background(&self) -> &str {
        &self.scene.background_color
    }

    fn render(&mut self) {
        tracing::trace!(objects = self.scene.object_count(), "surface redraw");
    }

    fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ObjectKind, ShapeKind};

    fn circle() -> SceneObject {
        SceneObject::new(ObjectKind::Shape {
            shape: ShapeKind::Circle,
            corner_radius: 0.0,
        })
    }

    #[test]
    fn test_add_selects_and_emits() {
        let mut surface = InMemorySurface::new();
        let id = surface.add_object(circle());

        assert_eq!(surface.active_object().map(|o| o.id), Some(id));
        let events = surface.take_events();
        assert_eq!(
            events,
            vec![
                SurfaceEvent::ObjectAdded { id },
                SurfaceEvent::SelectionChanged { id: Some(id) },
            ]
        );
        assert!(!surface.has_pending_events());
    }

    #[test]
    fn test_modify_without_selection_fails() {
        let mut surface = InMemorySurface::new();
        let result = surface.modify_active(&mut |o| o.fill = "#ff0000".to_string());
        assert!(matches!(result, Err(CarouselError::NoSelection)));
    }

    #[test]
    fn test_load_clears_pending_events_and_selection() {
        let mut surface = InMemorySurface::new();
        surface.add_object(circle());
        assert!(surface.has_pending_events());

        surface.load(None).expect("load empty");
        assert!(!surface.has_pending_events());
        assert!(surface.active_object().is_none());
        assert!(surface.scene().is_empty());
    }

    #[test]
    fn test_load_round_trips_serialize() {
        let mut surface = InMemorySurface::new();
        surface.add_object(circle().with_fill("#00ff00"));
        let snapshot = surface.serialize().expect("serialize");

        let mut other = InMemorySurface::new();
        other.load(Some(&snapshot)).expect("load");
        assert_eq!(other.scene(), surface.scene());
    }

    #[test]
    fn test_malformed_load_clears_to_empty() {
        let mut surface = InMemorySurface::new();
        surface.add_object(circle());
        surface.take_events();

        let bad = serde_json::json!({"objects": 42});
        let result = surface.load(Some(&bad));
        assert!(matches!(result, Err(CarouselError::MalformedScene(_))));
        assert!(surface.scene().is_empty());
        assert!(!surface.has_pending_events());
    }

    #[test]
    fn test_remove_active_clears_selection() {
        let mut surface = InMemorySurface::new();
        let id = surface.add_object(circle());
        surface.take_events();

        surface.remove_object(id).expect("remove");
        assert!(surface.active_object().is_none());
        let events = surface.take_events();
        assert!(events.contains(&SurfaceEvent::SelectionChanged { id: None }));
    }
}
