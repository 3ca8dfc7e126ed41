//! Property panel mediators.
//!
//! Each mediator translates user intent (a color, a slider value, a
//! preset) into scene-object mutations through the surface adapter,
//! then triggers the synchronization controller's commit path. Panels
//! never write scene snapshots to the document directly; the background
//! panel is the one mediator allowed to patch its out-of-band slide
//! field.

use async_trait::async_trait;

use crate::color::{is_hex_color, is_rgb_color, rgb_to_hex};
use crate::{
    CarouselError, CarouselResult, Document, FilterPreset, FontStyle, FontWeight, ObjectKind,
    SceneObject, SceneSurface, ShapeKind, SlidePatch, SyncController, Transform, SURFACE_SIZE,
};

/// Default fill for panels with no applicable selection.
pub const DEFAULT_FILL: &str = "#000000";

/// Default border color reported by the image panel.
pub const DEFAULT_IMAGE_BORDER: &str = "#ffffff";

/// Default font family.
pub const DEFAULT_FONT: &str = "Inter";

/// Font families offered by the text panel.
pub const FONTS: [&str; 5] = ["Inter", "Roboto", "Montserrat", "Lato", "Oswald"];

/// Inclusive stroke width range accepted by the panels.
pub const STROKE_WIDTH_RANGE: (f32, f32) = (0.0, 50.0);

/// Inclusive corner radius range for rectangles.
pub const CORNER_RADIUS_RANGE: (f32, f32) = (0.0, 50.0);

/// Inclusive font size range.
pub const FONT_SIZE_RANGE: (f32, f32) = (10.0, 72.0);

/// Largest width an added image may take on the surface.
const MAX_IMAGE_WIDTH: f32 = 500.0;

/// Border style choices exposed by the shape panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    /// Visible solid border.
    Solid,
    /// No border (stroke width forced to zero).
    None,
}

/// Common capability shared by every property panel mediator.
pub trait Mediator {
    /// Panel name, for logging.
    fn name(&self) -> &'static str;

    /// Whether this panel's selection-dependent controls apply to `object`.
    fn applies_to(&self, object: &SceneObject) -> bool;

    /// Whether the surface selection is one this panel operates on.
    fn has_selection(&self, surface: &dyn SceneSurface) -> bool {
        surface.active_object().is_some_and(|o| self.applies_to(o))
    }
}

/// Awaits availability of a font resource before it may be applied.
///
/// Mirrors a web-font loader: resolution means the face is usable,
/// failure means the prior font must stay applied.
#[async_trait]
pub trait FontLoader: Send + Sync {
    /// Wait until `family` is available for rendering.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the font cannot be loaded.
    async fn ensure_available(&self, family: &str) -> Result<(), String>;
}

/// Font loader backed by a fixed catalog of known-good families.
#[derive(Debug, Clone)]
pub struct CatalogFontLoader {
    families: Vec<String>,
}

impl CatalogFontLoader {
    /// Loader accepting exactly the panel's default font list.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            families: FONTS.iter().map(|f| (*f).to_string()).collect(),
        }
    }

    /// Loader accepting a custom family list.
    #[must_use]
    pub fn new(families: Vec<String>) -> Self {
        Self { families }
    }
}

#[async_trait]
impl FontLoader for CatalogFontLoader {
    async fn ensure_available(&self, family: &str) -> Result<(), String> {
        if self.families.iter().any(|f| f == family) {
            Ok(())
        } else {
            Err(format!("font family '{family}' not in catalog"))
        }
    }
}

fn validate_range(name: &str, value: f32, (min, max): (f32, f32)) -> CarouselResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CarouselError::InvalidProperty(format!(
            "{name} must be between {min} and {max}, got {value}"
        )))
    }
}

fn validate_hex(name: &str, color: &str) -> CarouselResult<()> {
    if is_hex_color(color) {
        Ok(())
    } else {
        Err(CarouselError::InvalidProperty(format!(
            "{name} must be a hex color, got '{color}'"
        )))
    }
}

/// Read a color property back as hex, tolerating engine-normalized
/// `rgb(r, g, b)` strings.
fn normalize_color(color: &str, fallback: &str) -> String {
    if is_rgb_color(color) {
        rgb_to_hex(color)
    } else if is_hex_color(color) {
        color.to_string()
    } else {
        fallback.to_string()
    }
}

/// Remove the selected object, redraw, and commit. Shared by the image
/// and shape panels' delete buttons.
fn delete_selected(
    document: &mut Document,
    surface: &mut dyn SceneSurface,
    sync: &mut SyncController,
) -> CarouselResult<()> {
    let id = surface
        .active_object()
        .map(|o| o.id)
        .ok_or(CarouselError::NoSelection)?;
    surface.remove_object(id)?;
    surface.render();
    sync.pump(document, surface)
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Mediator for the text panel.
#[derive(Debug, Default)]
pub struct TextMediator;

impl Mediator for TextMediator {
    fn name(&self) -> &'static str {
        "text"
    }

    fn applies_to(&self, object: &SceneObject) -> bool {
        object.is_text()
    }
}

impl TextMediator {
    /// Add a default text box and commit.
    ///
    /// # Errors
    ///
    /// Fails if committing the snapshot fails.
    pub fn add_text(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
    ) -> CarouselResult<()> {
        let text = SceneObject::new(ObjectKind::Text {
            content: "Hello, World!".to_string(),
            font_family: DEFAULT_FONT.to_string(),
            font_size: 40.0,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            generation_slot: None,
        })
        .with_transform(Transform {
            left: 10.0,
            top: 10.0,
            width: 200.0,
            height: 45.0,
            angle: 0.0,
        });
        surface.add_object(text);
        surface.render();
        sync.pump(document, surface)
    }

    /// The selected text's fill as hex, or the panel default.
    #[must_use]
    pub fn fill_color(&self, surface: &dyn SceneSurface) -> String {
        surface
            .active_object()
            .filter(|o| o.is_text())
            .map_or_else(
                || DEFAULT_FILL.to_string(),
                |o| normalize_color(&o.fill, DEFAULT_FILL),
            )
    }

    /// The selected text's font family, or the panel default.
    #[must_use]
    pub fn font_family(&self, surface: &dyn SceneSurface) -> String {
        match surface.active_object() {
            Some(SceneObject {
                kind: ObjectKind::Text { font_family, .. },
                ..
            }) => font_family.clone(),
            _ => DEFAULT_FONT.to_string(),
        }
    }

    /// Set the selected text's fill color and commit.
    ///
    /// # Errors
    ///
    /// Fails on a non-hex color, no selection, or a non-text selection.
    pub fn set_fill(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        color: &str,
    ) -> CarouselResult<()> {
        validate_hex("text color", color)?;
        self.require_text(surface)?;
        surface.modify_active(&mut |o| o.fill = color.to_string())?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Set the selected text's font size and commit.
    ///
    /// # Errors
    ///
    /// Fails when `size` is outside [`FONT_SIZE_RANGE`] or the selection
    /// is not text.
    pub fn set_font_size(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        size: f32,
    ) -> CarouselResult<()> {
        validate_range("font size", size, FONT_SIZE_RANGE)?;
        self.require_text(surface)?;
        surface.modify_active(&mut |o| {
            if let ObjectKind::Text { font_size, .. } = &mut o.kind {
                *font_size = size;
            }
        })?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Set the selected text's font weight and commit.
    ///
    /// # Errors
    ///
    /// Fails when the selection is not text.
    pub fn set_font_weight(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        weight: FontWeight,
    ) -> CarouselResult<()> {
        self.require_text(surface)?;
        surface.modify_active(&mut |o| {
            if let ObjectKind::Text { font_weight, .. } = &mut o.kind {
                *font_weight = weight;
            }
        })?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Set the selected text's font style and commit.
    ///
    /// # Errors
    ///
    /// Fails when the selection is not text.
    pub fn set_font_style(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        style: FontStyle,
    ) -> CarouselResult<()> {
        self.require_text(surface)?;
        surface.modify_active(&mut |o| {
            if let ObjectKind::Text { font_style, .. } = &mut o.kind {
                *font_style = style;
            }
        })?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Change the selected text's font family after the font resource
    /// finishes loading.
    ///
    /// The change is committed only if the user has not navigated away
    /// while the load was in flight; a stale completion is discarded
    /// and reported as `Ok(false)`. A load failure leaves the prior
    /// font applied.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::FontLoad`] when the loader fails, or a
    /// selection error when no text is selected at apply time.
    pub async fn set_font_family(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        loader: &dyn FontLoader,
        family: &str,
    ) -> CarouselResult<bool> {
        self.require_text(surface)?;
        let tag = sync.tag(document);

        loader
            .ensure_available(family)
            .await
            .map_err(|reason| CarouselError::FontLoad {
                family: family.to_string(),
                reason,
            })?;

        if !sync.is_current(document, tag) {
            tracing::debug!(family, "font load landed after slide switch, discarded");
            return Ok(false);
        }

        self.require_text(surface)?;
        surface.modify_active(&mut |o| {
            if let ObjectKind::Text { font_family, .. } = &mut o.kind {
                *font_family = family.to_string();
            }
        })?;
        surface.render();
        sync.commit_if_current(document, surface, tag)
    }

    /// Raise the selected object to the top of the paint order.
    ///
    /// # Errors
    ///
    /// Fails when nothing is selected.
    pub fn bring_to_front(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
    ) -> CarouselResult<()> {
        surface.bring_active_to_front()?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Lower the selected object to the bottom of the paint order.
    ///
    /// # Errors
    ///
    /// Fails when nothing is selected.
    pub fn send_to_back(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
    ) -> CarouselResult<()> {
        surface.send_active_to_back()?;
        surface.render();
        sync.pump(document, surface)
    }

    fn require_text(&self, surface: &dyn SceneSurface) -> CarouselResult<()> {
        match surface.active_object() {
            None => Err(CarouselError::NoSelection),
            Some(o) if o.is_text() => Ok(()),
            Some(o) => Err(CarouselError::WrongObjectKind(format!(
                "text panel cannot edit {:?}",
                std::mem::discriminant(&o.kind)
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

/// Shape variants the shape panel can add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddShape {
    /// 100x100 rectangle at the surface center.
    Rectangle,
    /// Circle of radius 50 at the surface center.
    Circle,
    /// 100x100 triangle at the surface center.
    Triangle,
    /// Horizontal line segment.
    Line,
}

/// Mediator for the shape panel.
#[derive(Debug, Default)]
pub struct ShapeMediator;

impl Mediator for ShapeMediator {
    fn name(&self) -> &'static str {
        "shape"
    }

    fn applies_to(&self, object: &SceneObject) -> bool {
        object.is_shape_like()
    }
}

impl ShapeMediator {
    /// Add a shape with the given fill and stroke defaults, and commit.
    ///
    /// # Errors
    ///
    /// Fails on non-hex colors or if committing the snapshot fails.
    pub fn add_shape(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        shape: AddShape,
        fill: &str,
        stroke: &str,
    ) -> CarouselResult<()> {
        validate_hex("fill color", fill)?;
        validate_hex("border color", stroke)?;
        let center = SURFACE_SIZE / 2.0;
        let object = match shape {
            AddShape::Rectangle => SceneObject::new(ObjectKind::Shape {
                shape: ShapeKind::Rectangle,
                corner_radius: 0.0,
            })
            .with_transform(Transform {
                left: center,
                top: center,
                width: 100.0,
                height: 100.0,
                angle: 0.0,
            })
            .with_fill(fill)
            .with_stroke(stroke, 0.0),
            AddShape::Circle => SceneObject::new(ObjectKind::Shape {
                shape: ShapeKind::Circle,
                corner_radius: 0.0,
            })
            .with_transform(Transform {
                left: center,
                top: center,
                width: 100.0,
                height: 100.0,
                angle: 0.0,
            })
            .with_fill(fill)
            .with_stroke(stroke, 0.0),
            AddShape::Triangle => SceneObject::new(ObjectKind::Shape {
                shape: ShapeKind::Triangle,
                corner_radius: 0.0,
            })
            .with_transform(Transform {
                left: center,
                top: center,
                width: 100.0,
                height: 100.0,
                angle: 0.0,
            })
            .with_fill(fill)
            .with_stroke(stroke, 0.0),
            AddShape::Line => SceneObject::new(ObjectKind::Line {
                points: [50.0, 100.0, 200.0, 100.0],
            })
            .with_transform(Transform {
                left: center,
                top: center,
                width: 150.0,
                height: 1.0,
                angle: 0.0,
            })
            .with_stroke(stroke, 1.0),
        };
        surface.add_object(object);
        surface.render();
        sync.pump(document, surface)
    }

    /// The selected shape's fill as hex, or the panel default.
    #[must_use]
    pub fn fill_color(&self, surface: &dyn SceneSurface) -> String {
        surface
            .active_object()
            .filter(|o| o.is_shape_like())
            .map_or_else(
                || DEFAULT_FILL.to_string(),
                |o| normalize_color(&o.fill, DEFAULT_FILL),
            )
    }

    /// The selected shape's border style, derived from stroke width.
    #[must_use]
    pub fn border_style(&self, surface: &dyn SceneSurface) -> BorderStyle {
        match surface.active_object() {
            Some(o) if o.is_shape_like() && o.stroke_width > 0.0 => BorderStyle::Solid,
            _ => BorderStyle::None,
        }
    }

    /// Set the selected shape's fill color and commit.
    ///
    /// # Errors
    ///
    /// Fails on a non-hex color or a non-shape selection.
    pub fn set_fill(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        color: &str,
    ) -> CarouselResult<()> {
        validate_hex("fill color", color)?;
        self.require_shape(surface)?;
        surface.modify_active(&mut |o| o.fill = color.to_string())?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Set the selected shape's border color and commit.
    ///
    /// # Errors
    ///
    /// Fails on a non-hex color or a non-shape selection.
    pub fn set_stroke_color(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        color: &str,
    ) -> CarouselResult<()> {
        validate_hex("border color", color)?;
        self.require_shape(surface)?;
        surface.modify_active(&mut |o| o.stroke = Some(color.to_string()))?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Set the selected shape's border width and commit.
    ///
    /// # Errors
    ///
    /// Fails when `width` is outside [`STROKE_WIDTH_RANGE`] or the
    /// selection is not a shape.
    pub fn set_stroke_width(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        width: f32,
    ) -> CarouselResult<()> {
        validate_range("border width", width, STROKE_WIDTH_RANGE)?;
        self.require_shape(surface)?;
        surface.modify_active(&mut |o| o.stroke_width = width)?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Switch between a solid border and no border.
    ///
    /// `None` zeroes the stroke width; `Solid` restores a 1px border in
    /// the given color.
    ///
    /// # Errors
    ///
    /// Fails on a non-shape selection.
    pub fn set_border_style(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        style: BorderStyle,
        border_color: &str,
    ) -> CarouselResult<()> {
        self.require_shape(surface)?;
        match style {
            BorderStyle::None => {
                surface.modify_active(&mut |o| o.stroke_width = 0.0)?;
            }
            BorderStyle::Solid => {
                validate_hex("border color", border_color)?;
                surface.modify_active(&mut |o| {
                    o.stroke = Some(border_color.to_string());
                    o.stroke_width = 1.0;
                })?;
            }
        }
        surface.render();
        sync.pump(document, surface)
    }

    /// Set the selected rectangle's corner radius and commit.
    ///
    /// # Errors
    ///
    /// Fails when the radius is out of range or the selection is not a
    /// rectangle.
    pub fn set_corner_radius(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        radius: f32,
    ) -> CarouselResult<()> {
        validate_range("corner radius", radius, CORNER_RADIUS_RANGE)?;
        let is_rect = matches!(
            surface.active_object().map(|o| &o.kind),
            Some(ObjectKind::Shape {
                shape: ShapeKind::Rectangle,
                ..
            })
        );
        if !is_rect {
            return Err(CarouselError::WrongObjectKind(
                "corner radius applies to rectangles only".to_string(),
            ));
        }
        surface.modify_active(&mut |o| {
            if let ObjectKind::Shape { corner_radius, .. } = &mut o.kind {
                *corner_radius = radius;
            }
        })?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Delete the selected shape and commit.
    ///
    /// # Errors
    ///
    /// Fails when nothing is selected.
    pub fn delete(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
    ) -> CarouselResult<()> {
        delete_selected(document, surface, sync)
    }

    fn require_shape(&self, surface: &dyn SceneSurface) -> CarouselResult<()> {
        match surface.active_object() {
            None => Err(CarouselError::NoSelection),
            Some(o) if o.is_shape_like() => Ok(()),
            Some(_) => Err(CarouselError::WrongObjectKind(
                "shape panel edits shapes and lines only".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

/// Mediator for the image panel.
#[derive(Debug, Default)]
pub struct ImageMediator;

impl Mediator for ImageMediator {
    fn name(&self) -> &'static str {
        "image"
    }

    fn applies_to(&self, object: &SceneObject) -> bool {
        object.is_image()
    }
}

impl ImageMediator {
    /// Add an image, scaling it down to a maximum width of 500px while
    /// preserving aspect ratio, then commit.
    ///
    /// # Errors
    ///
    /// Fails when the intrinsic size is not positive.
    pub fn add_image(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        src: &str,
        intrinsic_width: f32,
        intrinsic_height: f32,
    ) -> CarouselResult<()> {
        if intrinsic_width <= 0.0 || intrinsic_height <= 0.0 {
            return Err(CarouselError::InvalidProperty(format!(
                "image size must be positive, got {intrinsic_width}x{intrinsic_height}"
            )));
        }
        let (width, height) = if intrinsic_width > MAX_IMAGE_WIDTH {
            let scale = MAX_IMAGE_WIDTH / intrinsic_width;
            (MAX_IMAGE_WIDTH, intrinsic_height * scale)
        } else {
            (intrinsic_width, intrinsic_height)
        };
        let image = SceneObject::new(ObjectKind::Image {
            src: src.to_string(),
            filters: Vec::new(),
        })
        .with_transform(Transform {
            left: 0.0,
            top: 0.0,
            width,
            height,
            angle: 0.0,
        });
        surface.add_object(image);
        surface.render();
        sync.pump(document, surface)
    }

    /// The selected image's border color, or the panel default.
    #[must_use]
    pub fn border_color(&self, surface: &dyn SceneSurface) -> String {
        surface
            .active_object()
            .filter(|o| o.is_image())
            .and_then(|o| o.stroke.as_deref())
            .map_or_else(
                || DEFAULT_IMAGE_BORDER.to_string(),
                |c| normalize_color(c, DEFAULT_IMAGE_BORDER),
            )
    }

    /// The selected image's border width, or 0.
    #[must_use]
    pub fn border_width(&self, surface: &dyn SceneSurface) -> f32 {
        surface
            .active_object()
            .filter(|o| o.is_image())
            .map_or(0.0, |o| o.stroke_width)
    }

    /// The preset matching the selected image's filter list.
    #[must_use]
    pub fn filter_preset(&self, surface: &dyn SceneSurface) -> FilterPreset {
        match surface.active_object().map(|o| &o.kind) {
            Some(ObjectKind::Image { filters, .. }) => FilterPreset::detect(filters),
            _ => FilterPreset::None,
        }
    }

    /// Set the selected image's border width and commit.
    ///
    /// # Errors
    ///
    /// Fails when `width` is out of range or the selection is not an
    /// image.
    pub fn set_border_width(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        width: f32,
    ) -> CarouselResult<()> {
        validate_range("border width", width, STROKE_WIDTH_RANGE)?;
        self.require_image(surface)?;
        surface.modify_active(&mut |o| o.stroke_width = width)?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Set the selected image's border color and commit.
    ///
    /// # Errors
    ///
    /// Fails on a non-hex color or a non-image selection.
    pub fn set_border_color(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        color: &str,
    ) -> CarouselResult<()> {
        validate_hex("border color", color)?;
        self.require_image(surface)?;
        surface.modify_active(&mut |o| o.stroke = Some(color.to_string()))?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Replace the selected image's entire filter list with the given
    /// preset and commit. Presets always fully replace, never stack.
    ///
    /// # Errors
    ///
    /// Fails when the selection is not an image.
    pub fn set_filter_preset(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        preset: FilterPreset,
    ) -> CarouselResult<()> {
        self.require_image(surface)?;
        surface.modify_active(&mut |o| {
            if let ObjectKind::Image { filters, .. } = &mut o.kind {
                *filters = preset.filters();
            }
        })?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Raise the selected image to the top of the paint order.
    ///
    /// # Errors
    ///
    /// Fails when nothing is selected.
    pub fn bring_to_front(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
    ) -> CarouselResult<()> {
        surface.bring_active_to_front()?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Lower the selected image to the bottom of the paint order.
    ///
    /// # Errors
    ///
    /// Fails when nothing is selected.
    pub fn send_to_back(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
    ) -> CarouselResult<()> {
        surface.send_active_to_back()?;
        surface.render();
        sync.pump(document, surface)
    }

    /// Delete the selected image and commit.
    ///
    /// # Errors
    ///
    /// Fails when nothing is selected.
    pub fn delete(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
    ) -> CarouselResult<()> {
        delete_selected(document, surface, sync)
    }

    fn require_image(&self, surface: &dyn SceneSurface) -> CarouselResult<()> {
        match surface.active_object() {
            None => Err(CarouselError::NoSelection),
            Some(o) if o.is_image() => Ok(()),
            Some(_) => Err(CarouselError::WrongObjectKind(
                "image panel edits images only".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Background
// ---------------------------------------------------------------------------

/// Mediator for the background panel. The only mediator allowed to
/// write to the document, and only to the out-of-band background field
/// of the active slide.
#[derive(Debug, Default)]
pub struct BackgroundMediator;

impl Mediator for BackgroundMediator {
    fn name(&self) -> &'static str {
        "background"
    }

    fn applies_to(&self, _object: &SceneObject) -> bool {
        // Background edits need no selection.
        true
    }
}

impl BackgroundMediator {
    /// The active slide's background color.
    #[must_use]
    pub fn color<'a>(&self, document: &'a Document) -> &'a str {
        &document.active_slide().background_color
    }

    /// Set the active slide's background color on both the surface and
    /// the document, then commit the scene snapshot.
    ///
    /// # Errors
    ///
    /// Fails on a non-hex color.
    pub fn set_color(
        &self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        sync: &mut SyncController,
        color: &str,
    ) -> CarouselResult<()> {
        validate_hex("background color", color)?;
        surface.set_background(color);
        surface.render();
        sync.commit(document, surface)?;
        document.update_slide_at(document.active_index(), SlidePatch::background(color))
    }
}
