//! Prompt construction for carousel content generation.

/// Build the 5-slide carousel prompt for a topic.
///
/// The instructions pin the response to the `Slide {n}` / `SlideNext` /
/// `EndSlide` text convention that [`crate::parse_response`] decodes.
#[must_use]
pub fn carousel_prompt(topic: &str) -> String {
    format!(
        "Create a LinkedIn carousel on the topic: '{topic}'. The carousel will consist of 5 slides.\n\
         1. The first slide will have the topic title only.\n\
         2. Slides 2 to 4 will each contain a short title and a piece of content. The content should be a maximum of 2-3 sentences long. Separate title and content with keyword 'SlideNext'.\n\
         3. The final slide, Slide 5, will be a Call to Action (CTA) with title only.\n\
         4. Every slide should begin with keyword 'Slide {{number}}' and end with keyword 'EndSlide'. For example, 'Slide 1: Title. EndSlide Slide 2: Title SlideNext Content EndSlide'."
    )
}

/// Build a prompt that regenerates content for an existing template,
/// using the template's current text outline as a shape hint.
#[must_use]
pub fn regenerate_prompt(topic: &str, outline: &str) -> String {
    format!(
        "Create a LinkedIn carousel on the topic: '{topic}'.\n\
         Match the structure of this existing carousel exactly, replacing each text with new content of similar length: {outline}\n\
         Every slide should begin with keyword 'Slide {{number}}' and end with keyword 'EndSlide'. Separate texts within a slide with keyword 'SlideNext'."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_topic_and_convention() {
        let prompt = carousel_prompt("Rust for web developers");
        assert!(prompt.contains("'Rust for web developers'"));
        assert!(prompt.contains("5 slides"));
        assert!(prompt.contains("SlideNext"));
        assert!(prompt.contains("EndSlide"));
    }

    #[test]
    fn test_regenerate_prompt_embeds_outline() {
        let prompt = regenerate_prompt("Testing", "Slide 1: Hook EndSlide");
        assert!(prompt.contains("Slide 1: Hook EndSlide"));
    }
}
