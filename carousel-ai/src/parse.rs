//! Parsing of generated carousel text.
//!
//! Model responses follow the `Slide {n}: … SlideNext … EndSlide`
//! convention, but not reliably: trailing delimiters, comma separators
//! between slides, and empty segments all occur in practice. The parser
//! tolerates all of them and never fails; a response with no usable
//! content simply parses to an empty list.

const END_SLIDE: &str = "EndSlide";
const SLIDE_NEXT: &str = "SlideNext";

/// Parse a model response into per-slide text groups.
///
/// `"Slide 1: Title EndSlide, Slide 2: T1 SlideNext C1 EndSlide"`
/// parses to `[["Title"], ["T1", "C1"]]`.
#[must_use]
pub fn parse_response(response: &str) -> Vec<Vec<String>> {
    let mut slides = Vec::new();

    for segment in response.split(END_SLIDE) {
        // Separator debris between slides: commas, newlines, spaces.
        let segment = segment.trim().trim_start_matches([',', '.']).trim_start();
        if segment.is_empty() {
            continue;
        }
        let content = strip_slide_prefix(segment);

        let texts: Vec<String> = content
            .split(SLIDE_NEXT)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        if !texts.is_empty() {
            slides.push(texts);
        }
    }

    tracing::debug!(slides = slides.len(), "generation response parsed");
    slides
}

/// Flatten parsed slide groups into the segment order template slots
/// consume.
#[must_use]
pub fn flatten_segments(slides: &[Vec<String>]) -> Vec<String> {
    slides.iter().flatten().cloned().collect()
}

/// Strip a leading `Slide {n}:` marker, tolerating a period in place of
/// the colon and variable whitespace. Segments without the marker are
/// returned unchanged.
fn strip_slide_prefix(segment: &str) -> &str {
    let Some(rest) = segment.strip_prefix("Slide") else {
        return segment;
    };
    let rest = rest.trim_start();
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return segment;
    }
    let rest = &rest[digits..];
    let rest = rest.trim_start();
    let rest = rest.strip_prefix([':', '.']).unwrap_or(rest);
    rest.trim_start()
}
