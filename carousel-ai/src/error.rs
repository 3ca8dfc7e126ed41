//! Content-generation error types.

use thiserror::Error;

/// Result type for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors that can occur while generating carousel content.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No API credential was configured.
    #[error("no API key configured")]
    MissingCredential,

    /// The configured endpoint URL is invalid.
    #[error("invalid generation endpoint: {0}")]
    InvalidUrl(String),

    /// HTTP layer failed (connection, timeout, etc.).
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed unexpectedly.
    #[error("failed to parse generation payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The API returned a non-success status.
    #[error("generation API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// The API response carried no usable content.
    #[error("generation response was empty")]
    EmptyResponse,

    /// Applying generated text to the template failed.
    #[error(transparent)]
    Core(#[from] carousel_core::CarouselError),
}

impl GenerateError {
    /// Returns true if this error is retryable (transient HTTP failures
    /// and server-side errors).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
