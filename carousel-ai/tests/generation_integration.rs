//! Generation Pipeline Integration Tests
//!
//! Tests parse-and-apply without the network: a canned model response
//! flows through the parser and the all-or-nothing template application.

use carousel_ai::{flatten_segments, parse_response};
use carousel_core::{
    apply_generated_text, scan_text_slots, CarouselError, ObjectKind, Scene, SceneObject, Slide,
};

/// Build a slide with one generation-marked text object per entry.
fn template_slide(slots: &[&str]) -> Slide {
    let mut scene = Scene::default();
    for slot in slots {
        scene.add_object(SceneObject::new(ObjectKind::Text {
            content: format!("placeholder {slot}"),
            font_family: "Inter".to_string(),
            font_size: 24.0,
            font_weight: carousel_core::FontWeight::Normal,
            font_style: carousel_core::FontStyle::Normal,
            generation_slot: Some((*slot).to_string()),
        }));
    }
    Slide {
        scene_json: Some(scene.to_json().expect("scene json")),
        background_color: "#ffffff".to_string(),
    }
}

/// The standard 5-slide template shape: title, three title+content
/// pairs, CTA.
fn five_slide_template() -> Vec<Slide> {
    vec![
        template_slide(&["title"]),
        template_slide(&["title", "content"]),
        template_slide(&["title", "content"]),
        template_slide(&["title", "content"]),
        template_slide(&["cta"]),
    ]
}

#[test]
fn test_canned_response_fills_five_slide_template() {
    let response = "Slide 1: Growing on LinkedIn EndSlide, \
                    Slide 2: Post daily SlideNext Consistency beats intensity. EndSlide, \
                    Slide 3: Engage SlideNext Reply to every comment you get. EndSlide, \
                    Slide 4: Use carousels SlideNext They earn the most reach. EndSlide, \
                    Slide 5: Follow for more EndSlide";

    let segments = flatten_segments(&parse_response(response));
    assert_eq!(segments.len(), 8);

    let slides = apply_generated_text(&five_slide_template(), &segments).expect("apply");
    assert_eq!(
        scan_text_slots(&slides[0]).expect("scan"),
        vec!["Growing on LinkedIn".to_string()]
    );
    assert_eq!(
        scan_text_slots(&slides[3]).expect("scan"),
        vec![
            "Use carousels".to_string(),
            "They earn the most reach.".to_string(),
        ]
    );
    assert_eq!(
        scan_text_slots(&slides[4]).expect("scan"),
        vec!["Follow for more".to_string()]
    );
}

#[test]
fn test_short_response_leaves_template_untouched() {
    let response = "Slide 1: Only a title EndSlide";
    let segments = flatten_segments(&parse_response(response));

    let template = five_slide_template();
    let result = apply_generated_text(&template, &segments);
    assert!(matches!(
        result,
        Err(CarouselError::IncompleteContent(_))
    ));
    assert_eq!(
        scan_text_slots(&template[0]).expect("scan"),
        vec!["placeholder title".to_string()]
    );
}

#[test]
fn test_scenario_round_trip_groups() {
    let parsed = parse_response("Slide 1: Title EndSlide, Slide 2: T1 SlideNext C1 EndSlide");
    assert_eq!(
        parsed,
        vec![
            vec!["Title".to_string()],
            vec!["T1".to_string(), "C1".to_string()],
        ]
    );
}
