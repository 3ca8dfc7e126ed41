//! Slide templates and generated-text application.
//!
//! Templates are pre-built slide sets whose text objects may carry a
//! generation slot marker. Generated content is applied to those slots
//! all-or-nothing: if the supplied segments cannot fill every slot, no
//! slide is mutated and a typed error is returned.

use crate::{CarouselError, CarouselResult, Document, ObjectKind, Scene, Slide};

/// A pre-built slide set selectable at document creation.
#[derive(Debug, Clone)]
pub struct Template {
    /// Display name.
    pub name: String,
    /// Preview image paths, one per slide.
    pub preview_images: Vec<String>,
    /// The slides the template instantiates.
    pub slides: Vec<Slide>,
}

impl Template {
    /// Build a fresh document from this template's slides.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidDocument`] if the template holds
    /// no slides.
    pub fn instantiate(&self) -> CarouselResult<Document> {
        Document::from_slides(self.slides.clone())
    }

    /// Total number of generation slots across all slides.
    ///
    /// # Errors
    ///
    /// Returns an error if a slide's scene JSON is malformed.
    pub fn slot_count(&self) -> CarouselResult<usize> {
        let mut count = 0;
        for slide in &self.slides {
            count += scan_text_slots(slide)?.len();
        }
        Ok(count)
    }
}

/// The current text of each generation-marked text object in a slide,
/// in paint order. Slides with no scene have no slots.
///
/// # Errors
///
/// Returns an error if the slide's scene JSON is malformed.
pub fn scan_text_slots(slide: &Slide) -> CarouselResult<Vec<String>> {
    let Some(json) = slide.scene_json.as_ref() else {
        return Ok(Vec::new());
    };
    let scene = Scene::from_json(json)?;
    let slots = scene
        .objects()
        .filter_map(|object| match &object.kind {
            ObjectKind::Text {
                content,
                generation_slot: Some(_),
                ..
            } => Some(content.clone()),
            _ => None,
        })
        .collect();
    Ok(slots)
}

/// Replace the slot texts of `slides` with `segments`, consumed in
/// order across all slides.
///
/// Returns the rewritten slides; the input is untouched. If the
/// segments run out before every slot is filled, nothing is returned
/// and the caller's slides stay as they were. Surplus segments are
/// ignored.
///
/// # Errors
///
/// Returns [`CarouselError::IncompleteContent`] when segments are
/// insufficient, or [`CarouselError::MalformedScene`] for undecodable
/// slide JSON.
pub fn apply_generated_text(slides: &[Slide], segments: &[String]) -> CarouselResult<Vec<Slide>> {
    let mut cursor = segments.iter();
    let mut filled = 0usize;
    let mut out = Vec::with_capacity(slides.len());

    for slide in slides {
        let Some(json) = slide.scene_json.as_ref() else {
            out.push(slide.clone());
            continue;
        };
        let mut scene = Scene::from_json(json)?;
        for object in scene.objects_mut() {
            if let ObjectKind::Text {
                content,
                generation_slot: Some(_),
                ..
            } = &mut object.kind
            {
                let segment = cursor.next().ok_or_else(|| {
                    CarouselError::IncompleteContent(format!(
                        "{filled} segments for more than {filled} slots"
                    ))
                })?;
                *content = segment.clone();
                filled += 1;
            }
        }
        out.push(Slide {
            scene_json: Some(scene.to_json()?),
            background_color: slide.background_color.clone(),
        });
    }

    let surplus = segments.len() - filled;
    if surplus > 0 {
        tracing::debug!(surplus, "ignoring surplus generated segments");
    }
    tracing::info!(filled, slides = out.len(), "generated text applied");
    Ok(out)
}

/// Join the slot texts of `slides` with the carousel text convention:
/// `Slide {n}: a SlideNext b EndSlide, Slide {n+1}: …`. Used to show a
/// generation model the shape of the content it should produce.
///
/// # Errors
///
/// Returns an error if a slide's scene JSON is malformed.
pub fn text_outline(slides: &[Slide]) -> CarouselResult<String> {
    let mut outline = String::new();
    for (i, slide) in slides.iter().enumerate() {
        let slots = scan_text_slots(slide)?;
        outline.push_str(&format!("Slide {}: ", i + 1));
        outline.push_str(&slots.join(" SlideNext "));
        outline.push_str(" EndSlide, ");
    }
    // Trailing ", " from the last slide.
    outline.truncate(outline.trim_end_matches(", ").len());
    Ok(outline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SceneObject, Transform};

    fn text(content: &str, slot: Option<&str>) -> SceneObject {
        SceneObject::new(ObjectKind::Text {
            content: content.to_string(),
            font_family: "Inter".to_string(),
            font_size: 24.0,
            font_weight: crate::FontWeight::Normal,
            font_style: crate::FontStyle::Normal,
            generation_slot: slot.map(String::from),
        })
        .with_transform(Transform {
            left: 10.0,
            top: 10.0,
            ..Transform::default()
        })
    }

    fn slide_with(objects: Vec<SceneObject>) -> Slide {
        let mut scene = Scene::default();
        for object in objects {
            scene.add_object(object);
        }
        Slide {
            scene_json: Some(scene.to_json().expect("scene json")),
            background_color: "#ffffff".to_string(),
        }
    }

    fn sample_template() -> Template {
        Template {
            name: "basic".to_string(),
            preview_images: vec!["one.png".to_string(), "two.png".to_string()],
            slides: vec![
                slide_with(vec![text("Title", Some("title"))]),
                slide_with(vec![
                    text("Heading", Some("heading")),
                    text("Body", Some("body")),
                    text("Footer (static)", None),
                ]),
            ],
        }
    }

    #[test]
    fn test_slot_scan_skips_unmarked_text() {
        let template = sample_template();
        assert_eq!(template.slot_count().expect("count"), 3);

        let slots = scan_text_slots(&template.slides[1]).expect("scan");
        assert_eq!(slots, vec!["Heading".to_string(), "Body".to_string()]);
    }

    #[test]
    fn test_apply_fills_slots_in_order() {
        let template = sample_template();
        let segments: Vec<String> = ["New Title", "New Heading", "New Body"]
            .iter()
            .map(ToString::to_string)
            .collect();

        let slides = apply_generated_text(&template.slides, &segments).expect("apply");
        assert_eq!(
            scan_text_slots(&slides[0]).expect("scan"),
            vec!["New Title".to_string()]
        );
        assert_eq!(
            scan_text_slots(&slides[1]).expect("scan"),
            vec!["New Heading".to_string(), "New Body".to_string()]
        );
    }

    #[test]
    fn test_apply_preserves_unmarked_text() {
        let template = sample_template();
        let segments: Vec<String> = ["a", "b", "c"].iter().map(ToString::to_string).collect();

        let slides = apply_generated_text(&template.slides, &segments).expect("apply");
        let scene = Scene::from_json(slides[1].scene_json.as_ref().expect("json")).expect("scene");
        let all_text: Vec<&str> = scene
            .objects()
            .filter_map(|o| match &o.kind {
                ObjectKind::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert!(all_text.contains(&"Footer (static)"));
    }

    #[test]
    fn test_apply_insufficient_segments_is_all_or_nothing() {
        let template = sample_template();
        let segments: Vec<String> = ["only", "two"].iter().map(ToString::to_string).collect();

        let result = apply_generated_text(&template.slides, &segments);
        assert!(matches!(result, Err(CarouselError::IncompleteContent(_))));
        // Source slides untouched.
        assert_eq!(
            scan_text_slots(&template.slides[0]).expect("scan"),
            vec!["Title".to_string()]
        );
    }

    #[test]
    fn test_apply_ignores_surplus_segments() {
        let template = sample_template();
        let segments: Vec<String> = ["a", "b", "c", "extra"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let slides = apply_generated_text(&template.slides, &segments).expect("apply");
        assert_eq!(slides.len(), 2);
    }

    #[test]
    fn test_text_outline_convention() {
        let template = sample_template();
        let outline = text_outline(&template.slides).expect("outline");
        assert_eq!(
            outline,
            "Slide 1: Title EndSlide, Slide 2: Heading SlideNext Body EndSlide"
        );
    }

    #[test]
    fn test_instantiate_builds_document() {
        let template = sample_template();
        let doc = template.instantiate().expect("instantiate");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.active_index(), 0);
    }
}
