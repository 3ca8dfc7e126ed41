//! Scene graph for a single slide's drawable content.

use serde::{Deserialize, Serialize};

use crate::{CarouselError, CarouselResult, ObjectId, SceneObject};

/// Default surface edge length in pixels (square canvas).
pub const SURFACE_SIZE: f32 = 512.0;

/// Default background color for new scenes.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// A scene containing all objects drawn on one slide.
///
/// Objects are kept in insertion order; that order is the z-order, with
/// later objects painted on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// All objects in paint order.
    objects: Vec<SceneObject>,
    /// Background color as a hex string.
    pub background_color: String,
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
}

impl Scene {
    /// Create a new empty scene with the given surface size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            objects: Vec::new(),
            background_color: DEFAULT_BACKGROUND.to_string(),
            width,
            height,
        }
    }

    /// Add an object to the scene, on top of existing objects.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        self.objects.push(object);
        id
    }

    /// Remove an object from the scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn remove_object(&mut self, id: ObjectId) -> CarouselResult<SceneObject> {
        let pos = self
            .objects
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| CarouselError::ObjectNotFound(id.to_string()))?;
        Ok(self.objects.remove(pos))
    }

    /// Get an object by ID.
    #[must_use]
    pub fn get_object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get a mutable reference to an object by ID.
    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// All objects in paint order.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Mutable access to all objects in paint order.
    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    /// Move an object to the top of the paint order.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn bring_to_front(&mut self, id: ObjectId) -> CarouselResult<()> {
        let object = self.remove_object(id)?;
        self.objects.push(object);
        Ok(())
    }

    /// Move an object to the bottom of the paint order.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn send_to_back(&mut self, id: ObjectId) -> CarouselResult<()> {
        let object = self.remove_object(id)?;
        self.objects.insert(0, object);
        Ok(())
    }

    /// Remove every object, keeping surface size and background.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Number of objects in the scene.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Serialize the scene to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CarouselResult<serde_json::Value> {
        serde_json::to_value(self).map_err(CarouselError::Serialization)
    }

    /// Decode a scene from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::MalformedScene`] if the value does not
    /// describe a valid scene graph.
    pub fn from_json(json: &serde_json::Value) -> CarouselResult<Self> {
        serde_json::from_value(json.clone())
            .map_err(|e| CarouselError::MalformedScene(e.to_string()))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SURFACE_SIZE, SURFACE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ObjectKind, ShapeKind};

    fn rect() -> SceneObject {
        SceneObject::new(ObjectKind::Shape {
            shape: ShapeKind::Rectangle,
            corner_radius: 0.0,
        })
    }

    #[test]
    fn test_scene_add_remove() {
        let mut scene = Scene::default();
        assert!(scene.is_empty());

        let id = scene.add_object(rect());
        assert_eq!(scene.object_count(), 1);
        assert!(scene.get_object(id).is_some());

        scene.remove_object(id).expect("should remove");
        assert!(scene.is_empty());
    }

    #[test]
    fn test_remove_missing_object_fails() {
        let mut scene = Scene::default();
        let result = scene.remove_object(ObjectId::new());
        assert!(matches!(result, Err(CarouselError::ObjectNotFound(_))));
    }

    #[test]
    fn test_z_order_is_insertion_order() {
        let mut scene = Scene::default();
        let a = scene.add_object(rect());
        let b = scene.add_object(rect());

        scene.bring_to_front(a).expect("front");
        let order: Vec<_> = scene.objects().map(|o| o.id).collect();
        assert_eq!(order, vec![b, a]);

        scene.send_to_back(a).expect("back");
        let order: Vec<_> = scene.objects().map(|o| o.id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut scene = Scene::default();
        scene.background_color = "#112233".to_string();
        scene.add_object(rect().with_fill("#ff0000"));

        let json = scene.to_json().expect("to_json");
        let back = Scene::from_json(&json).expect("from_json");
        assert_eq!(back, scene);
    }

    #[test]
    fn test_malformed_json_is_typed_error() {
        let bad = serde_json::json!({"objects": "not-an-array"});
        assert!(matches!(
            Scene::from_json(&bad),
            Err(CarouselError::MalformedScene(_))
        ));
    }
}
