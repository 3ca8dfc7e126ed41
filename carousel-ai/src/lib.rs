//! # Carousel AI
//!
//! Content generation for carousel templates: prompt construction, a
//! chat-completions client, and tolerant parsing of the
//! `Slide {n}: … SlideNext … EndSlide` response convention.
//!
//! Generation failures are always recoverable: template slides are only
//! replaced once a complete set of text segments has been produced, so
//! a failed or short response leaves the template exactly as it was.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod parse;
pub mod prompt;

pub use client::{GenerateClient, GenerateConfig};
pub use error::{GenerateError, GenerateResult};
pub use parse::{flatten_segments, parse_response};
pub use prompt::{carousel_prompt, regenerate_prompt};

use carousel_core::{apply_generated_text, Slide};

/// Generate content for a topic and apply it to template slides.
///
/// Runs the full pipeline: prompt → completion → parse → all-or-nothing
/// application. The input slides are untouched; the rewritten slides
/// are returned only on full success.
///
/// # Errors
///
/// Returns a typed error for request failures, or
/// [`carousel_core::CarouselError::IncompleteContent`] (wrapped in
/// [`GenerateError::Core`]) when the response cannot fill every
/// generation slot.
pub async fn generate_carousel_content(
    client: &GenerateClient,
    topic: &str,
    slides: &[Slide],
) -> GenerateResult<Vec<Slide>> {
    let prompt = carousel_prompt(topic);
    let raw = client.complete(&prompt).await?;
    let segments = flatten_segments(&parse_response(&raw));
    tracing::info!(segments = segments.len(), "applying generated content");
    Ok(apply_generated_text(slides, &segments)?)
}

/// Carousel AI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
