//! Scene objects - the building blocks of a slide's scene graph.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Create a new unique object ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Font weight for text objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Normal weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Font style for text objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright style.
    #[default]
    Normal,
    /// Italic style.
    Italic,
}

/// Geometric shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle, optionally with rounded corners.
    Rectangle,
    /// Circle sized by the transform's width.
    Circle,
    /// Isosceles triangle filling the transform box.
    Triangle,
}

/// A single raster filter applied to an image object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImageFilter {
    /// Additive brightness adjustment, range -1.0..=1.0.
    Brightness {
        /// Brightness delta.
        brightness: f32,
    },
    /// Gaussian blur, range 0.0..=1.0.
    Blur {
        /// Blur amount.
        blur: f32,
    },
    /// Full desaturation.
    Grayscale,
}

/// User-facing filter presets. Selecting a preset fully replaces the
/// object's filter list; presets never stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPreset {
    /// No filter applied.
    #[default]
    None,
    /// Slight darkening.
    LowContrast,
    /// Strong darkening.
    HighContrast,
    /// Subtle blur.
    LightBlur,
    /// Pronounced blur.
    HeavyBlur,
    /// Grayscale conversion.
    Grayscale,
}

impl FilterPreset {
    /// The filter list this preset expands to.
    #[must_use]
    pub fn filters(self) -> Vec<ImageFilter> {
        match self {
            Self::None => Vec::new(),
            Self::LowContrast => vec![ImageFilter::Brightness { brightness: -0.1 }],
            Self::HighContrast => vec![ImageFilter::Brightness { brightness: -0.3 }],
            Self::LightBlur => vec![ImageFilter::Blur { blur: 0.1 }],
            Self::HeavyBlur => vec![ImageFilter::Blur { blur: 0.3 }],
            Self::Grayscale => vec![ImageFilter::Grayscale],
        }
    }

    /// Detect the preset a filter list corresponds to.
    ///
    /// Only the first filter is inspected; brightness above -0.2 reads
    /// as low contrast, blur at or below 0.2 as light blur.
    #[must_use]
    pub fn detect(filters: &[ImageFilter]) -> Self {
        match filters.first() {
            Some(ImageFilter::Brightness { brightness }) => {
                if *brightness > -0.2 {
                    Self::LowContrast
                } else {
                    Self::HighContrast
                }
            }
            Some(ImageFilter::Blur { blur }) => {
                if *blur <= 0.2 {
                    Self::LightBlur
                } else {
                    Self::HeavyBlur
                }
            }
            Some(ImageFilter::Grayscale) => Self::Grayscale,
            None => Self::None,
        }
    }
}

/// The type of content an object contains, with kind-specific properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ObjectKind {
    /// An editable text box.
    Text {
        /// Text content.
        content: String,
        /// Font family name.
        font_family: String,
        /// Font size in pixels.
        font_size: f32,
        /// Font weight.
        #[serde(default)]
        font_weight: FontWeight,
        /// Font style.
        #[serde(default)]
        font_style: FontStyle,
        /// Marker naming this text box as a content-generation slot.
        /// Template slides use it to flag replaceable text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        generation_slot: Option<String>,
    },

    /// A raster image.
    Image {
        /// Image source URI or data URI.
        src: String,
        /// Applied filters, in order.
        #[serde(default)]
        filters: Vec<ImageFilter>,
    },

    /// A filled geometric shape.
    Shape {
        /// Shape variant.
        shape: ShapeKind,
        /// Corner radius; meaningful for rectangles only.
        #[serde(default)]
        corner_radius: f32,
    },

    /// A straight line segment.
    Line {
        /// Endpoints as (x1, y1, x2, y2), relative to the transform origin.
        points: [f32; 4],
    },

    /// A container group for other objects.
    Group {
        /// Child object IDs.
        children: Vec<ObjectId>,
    },
}

/// Position and size of an object on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Distance from the surface's left edge, in pixels.
    pub left: f32,
    /// Distance from the surface's top edge, in pixels.
    pub top: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Rotation in degrees.
    pub angle: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 100.0,
            angle: 0.0,
        }
    }
}

/// A scene object with content, transform, and paint properties.
///
/// Fill, stroke, and stroke width are common across kinds; which of
/// them a property panel exposes depends on the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Unique identifier.
    pub id: ObjectId,
    /// Object content and kind-specific properties.
    pub kind: ObjectKind,
    /// Position and size.
    pub transform: Transform,
    /// Fill color as a hex string.
    pub fill: String,
    /// Stroke (border) color as a hex string, if stroked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width in pixels; 0 means no visible border.
    #[serde(default)]
    pub stroke_width: f32,
}

impl SceneObject {
    /// Create a new object with the given kind and default paint.
    #[must_use]
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            id: ObjectId::new(),
            kind,
            transform: Transform::default(),
            fill: "#000000".to_string(),
            stroke: None,
            stroke_width: 0.0,
        }
    }

    /// Set the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the fill color.
    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Set the stroke color and width.
    #[must_use]
    pub fn with_stroke(mut self, stroke: impl Into<String>, width: f32) -> Self {
        self.stroke = Some(stroke.into());
        self.stroke_width = width;
        self
    }

    /// True if this object is a text box.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ObjectKind::Text { .. })
    }

    /// True if this object is an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self.kind, ObjectKind::Image { .. })
    }

    /// True if this object is a shape or line (anything the shape
    /// panel operates on).
    #[must_use]
    pub fn is_shape_like(&self) -> bool {
        matches!(self.kind, ObjectKind::Shape { .. } | ObjectKind::Line { .. })
    }
}
