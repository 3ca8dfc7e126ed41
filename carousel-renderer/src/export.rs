//! Slide export to image/document formats.
//!
//! Renders a [`Scene`] to PNG, JPEG, SVG, or PDF using an SVG
//! intermediate representation and the resvg/tiny-skia rasterization
//! pipeline, and whole documents to per-slide images or a multi-page
//! PDF.

use std::fmt::Write;

use carousel_core::{Document, ImageFilter, ObjectKind, Scene, SceneObject, ShapeKind};
use image::ImageEncoder;

use crate::error::{RenderError, RenderResult};

/// Export output format for a single slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG vector graphics (returns the SVG XML string as UTF-8 bytes).
    Svg,
    /// Single-page PDF with the rasterized slide embedded.
    Pdf,
}

/// Configuration for slide export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output width in pixels (default: scene surface width).
    pub width: Option<u32>,
    /// Output height in pixels (default: scene surface height).
    pub height: Option<u32>,
    /// DPI for print export (default: 96.0).
    pub dpi: f32,
    /// Background override as a hex color; defaults to the scene's own.
    pub background: Option<String>,
    /// JPEG quality 1-100 (default: 85).
    pub jpeg_quality: u8,
    /// Scale factor (e.g. 2.0 for retina).
    pub scale: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            dpi: 96.0,
            background: None,
            jpeg_quality: 85,
            scale: 1.0,
        }
    }
}

/// Exports slides and documents to image and document formats.
pub struct SlideExporter {
    config: ExportConfig,
}

impl SlideExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Export a scene to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be rendered or encoded.
    pub fn export(&self, scene: &Scene, format: ExportFormat) -> RenderResult<Vec<u8>> {
        match format {
            ExportFormat::Png => self.render_to_png(scene),
            ExportFormat::Jpeg => self.render_to_jpeg(scene),
            ExportFormat::Svg => {
                let svg = self.render_to_svg(scene)?;
                Ok(svg.into_bytes())
            }
            ExportFormat::Pdf => self.render_to_pdf(scene),
        }
    }

    /// Export the scene to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn render_to_png(&self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let svg_string = self.render_to_svg(scene)?;
        let pixmap = Self::rasterize_svg(&svg_string)?;

        pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }

    /// Export the scene to JPEG bytes.
    ///
    /// The alpha channel is composited over white.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render_to_jpeg(&self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let svg_string = self.render_to_svg(scene)?;
        let pixmap = Self::rasterize_svg(&svg_string)?;

        let (width, height) = (pixmap.width(), pixmap.height());
        let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
        for pixel in pixmap.data().chunks_exact(4) {
            let alpha = f32::from(pixel[3]) / 255.0;
            let inv = 1.0 - alpha;
            rgb_data.push((f32::from(pixel[0]).mul_add(alpha, 255.0 * inv)) as u8);
            rgb_data.push((f32::from(pixel[1]).mul_add(alpha, 255.0 * inv)) as u8);
            rgb_data.push((f32::from(pixel[2]).mul_add(alpha, 255.0 * inv)) as u8);
        }

        let mut buf = std::io::Cursor::new(Vec::new());
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, self.config.jpeg_quality);
        encoder
            .write_image(&rgb_data, width, height, image::ColorType::Rgb8.into())
            .map_err(|e| RenderError::Export(format!("JPEG encoding failed: {e}")))?;

        Ok(buf.into_inner())
    }

    /// Export the scene to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns an error if scene objects cannot be represented as SVG.
    #[allow(clippy::cast_precision_loss)]
    pub fn render_to_svg(&self, scene: &Scene) -> RenderResult<String> {
        let (out_w, out_h) = self.output_dimensions(scene);
        let scale = self.config.scale;
        let view_w = out_w as f32 / scale;
        let view_h = out_h as f32 / scale;

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {view_w} {view_h}\">",
        );

        write_filter_defs(&mut svg, scene);

        // Background
        let background = self
            .config
            .background
            .as_deref()
            .unwrap_or(&scene.background_color);
        let escaped_bg = escape_xml(background);
        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"{escaped_bg}\"/>",
        );

        // Paint order is insertion order.
        for object in scene.objects() {
            render_object_svg(&mut svg, object);
        }

        svg.push_str("</svg>");
        Ok(svg)
    }

    /// Export the scene to a single-page PDF.
    ///
    /// Renders the scene as a raster image and embeds it in a PDF page.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or PDF generation fails.
    pub fn render_to_pdf(&self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let png_data = self.render_to_png(scene)?;
        let (out_w, out_h) = self.output_dimensions(scene);
        let (page_w, page_h) = self.page_size_mm(out_w, out_h);

        let (doc, page1, layer1) = printpdf::PdfDocument::new(
            "Carousel Export",
            printpdf::Mm(page_w),
            printpdf::Mm(page_h),
            "Layer 1",
        );
        let layer = doc.get_page(page1).get_layer(layer1);
        embed_png(&layer, &png_data, page_w, page_h, out_w, out_h)?;

        doc.save_to_bytes()
            .map_err(|e| RenderError::Export(format!("PDF save failed: {e}")))
    }

    /// Render every slide of a document to PNG bytes, in order.
    ///
    /// Each slide is decoded into a fresh scene, independent of any live
    /// surface, and rendered strictly sequentially.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Slide`] naming the first slide that fails
    /// to decode or render.
    pub fn render_document(&self, document: &Document) -> RenderResult<Vec<Vec<u8>>> {
        let mut pages = Vec::with_capacity(document.len());
        for (index, slide) in document.slides().iter().enumerate() {
            let scene = decode_slide_scene(slide, index)?;
            let png = self
                .render_to_png(&scene)
                .map_err(|e| RenderError::Slide {
                    index,
                    reason: e.to_string(),
                })?;
            tracing::debug!(index, bytes = png.len(), "slide rendered");
            pages.push(png);
        }
        Ok(pages)
    }

    /// Render a whole document to a multi-page PDF, one slide per page.
    ///
    /// Every page uses the same fixed square size, so slides line up in
    /// carousel viewers.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Slide`] naming the first slide that fails.
    pub fn render_document_pdf(&self, document: &Document) -> RenderResult<Vec<u8>> {
        let first = decode_slide_scene(
            document.slides().first().ok_or(RenderError::Slide {
                index: 0,
                reason: "document has no slides".to_string(),
            })?,
            0,
        )?;
        let (out_w, out_h) = self.output_dimensions(&first);
        let (page_w, page_h) = self.page_size_mm(out_w, out_h);

        let (doc, page1, layer1) = printpdf::PdfDocument::new(
            "Carousel Export",
            printpdf::Mm(page_w),
            printpdf::Mm(page_h),
            "Layer 1",
        );

        for (index, slide) in document.slides().iter().enumerate() {
            let scene = decode_slide_scene(slide, index)?;
            let png = self
                .render_to_png(&scene)
                .map_err(|e| RenderError::Slide {
                    index,
                    reason: e.to_string(),
                })?;

            let layer = if index == 0 {
                doc.get_page(page1).get_layer(layer1)
            } else {
                let (page, layer) = doc.add_page(
                    printpdf::Mm(page_w),
                    printpdf::Mm(page_h),
                    format!("Layer {}", index + 1),
                );
                doc.get_page(page).get_layer(layer)
            };
            embed_png(&layer, &png, page_w, page_h, out_w, out_h).map_err(|e| {
                RenderError::Slide {
                    index,
                    reason: e.to_string(),
                }
            })?;
        }

        tracing::info!(slides = document.len(), "document exported to PDF");
        doc.save_to_bytes()
            .map_err(|e| RenderError::Export(format!("PDF save failed: {e}")))
    }

    /// Get output dimensions (width, height) in pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn output_dimensions(&self, scene: &Scene) -> (u32, u32) {
        let base_w = self
            .config
            .width
            .unwrap_or_else(|| scene.width.max(1.0) as u32);
        let base_h = self
            .config
            .height
            .unwrap_or_else(|| scene.height.max(1.0) as u32);

        #[allow(clippy::cast_precision_loss)]
        let out_w = (base_w as f32 * self.config.scale) as u32;
        #[allow(clippy::cast_precision_loss)]
        let out_h = (base_h as f32 * self.config.scale) as u32;
        (out_w.max(1), out_h.max(1))
    }

    /// Page size in millimeters for the given pixel dimensions.
    #[allow(clippy::cast_precision_loss)]
    fn page_size_mm(&self, out_w: u32, out_h: u32) -> (f32, f32) {
        // pixels / dpi * 25.4
        (
            out_w as f32 / self.config.dpi * 25.4,
            out_h as f32 / self.config.dpi * 25.4,
        )
    }

    /// Rasterize an SVG string to a tiny-skia Pixmap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize_svg(svg_string: &str) -> RenderResult<tiny_skia::Pixmap> {
        let opt = usvg::Options::default();
        let tree = usvg::Tree::from_str(svg_string, &opt)
            .map_err(|e| RenderError::Svg(format!("SVG parsing failed: {e}")))?;

        let px_w = tree.size().width() as u32;
        let px_h = tree.size().height() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
            .ok_or_else(|| RenderError::Export("Failed to create pixmap".to_string()))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

/// Decode a slide's stored scene, falling back to an empty scene for a
/// slide that has never been drawn on.
fn decode_slide_scene(slide: &carousel_core::Slide, index: usize) -> RenderResult<Scene> {
    let mut scene = match slide.scene_json.as_ref() {
        Some(json) => Scene::from_json(json).map_err(|e| RenderError::Slide {
            index,
            reason: e.to_string(),
        })?,
        None => Scene::default(),
    };
    scene.background_color = slide.background_color.clone();
    Ok(scene)
}

/// Embed PNG bytes into a PDF layer, scaled to fill the page.
#[allow(clippy::cast_precision_loss)]
fn embed_png(
    layer: &printpdf::PdfLayerReference,
    png_data: &[u8],
    page_w: f32,
    page_h: f32,
    out_w: u32,
    out_h: u32,
) -> RenderResult<()> {
    // Decode with printpdf's bundled image crate for compatibility.
    let dynamic_image = printpdf::image_crate::load_from_memory(png_data)
        .map_err(|e| RenderError::Export(format!("Failed to decode PNG for PDF: {e}")))?;
    let pdf_image = printpdf::Image::from_dynamic_image(&dynamic_image);

    let transform = printpdf::ImageTransform {
        translate_x: Some(printpdf::Mm(0.0)),
        translate_y: Some(printpdf::Mm(0.0)),
        scale_x: Some(page_w / out_w as f32),
        scale_y: Some(page_h / out_h as f32),
        ..Default::default()
    };
    pdf_image.add_to_layer(layer.clone(), transform);
    Ok(())
}

/// Emit `<defs>` with one filter element per filtered image object.
fn write_filter_defs(svg: &mut String, scene: &Scene) {
    let mut defs = String::new();
    for object in scene.objects() {
        let ObjectKind::Image { filters, .. } = &object.kind else {
            continue;
        };
        if filters.is_empty() {
            continue;
        }
        let _ = write!(defs, "<filter id=\"f-{}\">", object.id);
        for filter in filters {
            match filter {
                ImageFilter::Brightness { brightness } => {
                    let _ = write!(
                        defs,
                        "<feComponentTransfer>\
                         <feFuncR type=\"linear\" slope=\"1\" intercept=\"{brightness}\"/>\
                         <feFuncG type=\"linear\" slope=\"1\" intercept=\"{brightness}\"/>\
                         <feFuncB type=\"linear\" slope=\"1\" intercept=\"{brightness}\"/>\
                         </feComponentTransfer>",
                    );
                }
                ImageFilter::Blur { blur } => {
                    // Blur amount is normalized 0..1; scale to the
                    // object's width for a visually comparable radius.
                    let std_dev = blur * object.transform.width / 10.0;
                    let _ = write!(defs, "<feGaussianBlur stdDeviation=\"{std_dev}\"/>");
                }
                ImageFilter::Grayscale => {
                    let _ = write!(defs, "<feColorMatrix type=\"saturate\" values=\"0\"/>");
                }
            }
        }
        defs.push_str("</filter>");
    }
    if !defs.is_empty() {
        let _ = write!(svg, "<defs>{defs}</defs>");
    }
}

/// Render a single object to SVG.
fn render_object_svg(svg: &mut String, object: &SceneObject) {
    let tf = &object.transform;
    let rotate = if tf.angle == 0.0 {
        String::new()
    } else {
        format!(" transform=\"rotate({} {} {})\"", tf.angle, tf.left, tf.top)
    };
    let stroke_attrs = match (&object.stroke, object.stroke_width) {
        (Some(stroke), width) if width > 0.0 => {
            format!(
                " stroke=\"{}\" stroke-width=\"{width}\"",
                escape_xml(stroke)
            )
        }
        _ => String::new(),
    };

    match &object.kind {
        ObjectKind::Text {
            content,
            font_family,
            font_size,
            font_weight,
            font_style,
            ..
        } => {
            let escaped = escape_xml(content);
            let escaped_fill = escape_xml(&object.fill);
            let escaped_family = escape_xml(font_family);
            let weight = match font_weight {
                carousel_core::FontWeight::Normal => "normal",
                carousel_core::FontWeight::Bold => "bold",
            };
            let style = match font_style {
                carousel_core::FontStyle::Normal => "normal",
                carousel_core::FontStyle::Italic => "italic",
            };
            let text_y = tf.top + font_size;
            let _ = write!(
                svg,
                "<text x=\"{}\" y=\"{text_y}\" font-size=\"{font_size}\" fill=\"{escaped_fill}\" font-family=\"{escaped_family}\" font-weight=\"{weight}\" font-style=\"{style}\"{rotate}>{escaped}</text>",
                tf.left,
            );
        }

        ObjectKind::Image { src, filters } => {
            let escaped_src = escape_xml(src);
            let filter = if filters.is_empty() {
                String::new()
            } else {
                format!(" filter=\"url(#f-{})\"", object.id)
            };
            let _ = write!(
                svg,
                "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" href=\"{escaped_src}\"{filter}{stroke_attrs}{rotate}/>",
                tf.left, tf.top, tf.width, tf.height,
            );
        }

        ObjectKind::Shape {
            shape,
            corner_radius,
        } => {
            let escaped_fill = escape_xml(&object.fill);
            match shape {
                ShapeKind::Rectangle => {
                    let _ = write!(
                        svg,
                        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{corner_radius}\" fill=\"{escaped_fill}\"{stroke_attrs}{rotate}/>",
                        tf.left, tf.top, tf.width, tf.height,
                    );
                }
                ShapeKind::Circle => {
                    let r = tf.width / 2.0;
                    let cx = tf.left + r;
                    let cy = tf.top + r;
                    let _ = write!(
                        svg,
                        "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{escaped_fill}\"{stroke_attrs}{rotate}/>",
                    );
                }
                ShapeKind::Triangle => {
                    let apex_x = tf.left + tf.width / 2.0;
                    let base_y = tf.top + tf.height;
                    let right_x = tf.left + tf.width;
                    let _ = write!(
                        svg,
                        "<polygon points=\"{apex_x},{} {},{base_y} {right_x},{base_y}\" fill=\"{escaped_fill}\"{stroke_attrs}{rotate}/>",
                        tf.top, tf.left,
                    );
                }
            }
        }

        ObjectKind::Line { points } => {
            let x1 = tf.left + points[0];
            let y1 = tf.top + points[1];
            let x2 = tf.left + points[2];
            let y2 = tf.top + points[3];
            let stroke = object.stroke.as_deref().unwrap_or(&object.fill);
            let width = if object.stroke_width > 0.0 {
                object.stroke_width
            } else {
                1.0
            };
            let _ = write!(
                svg,
                "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"{}\" stroke-width=\"{width}\"{rotate}/>",
                escape_xml(stroke),
            );
        }

        ObjectKind::Group { .. } => {
            // Children are referenced by id and painted in their own
            // right; the group itself has no visual representation.
            let _ = write!(svg, "<g transform=\"translate({},{})\"></g>", tf.left, tf.top);
        }
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
