//! Chat-completions client for carousel content generation.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{GenerateError, GenerateResult};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration for the generation request.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Response token cap.
    pub max_tokens: u32,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 300,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Asynchronous chat-completions client.
#[derive(Debug, Clone)]
pub struct GenerateClient {
    http: Client,
    endpoint: Url,
    api_key: String,
    config: GenerateConfig,
}

impl GenerateClient {
    /// Create a client with the default endpoint and model.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MissingCredential`] for an empty key.
    pub fn new(api_key: impl Into<String>) -> GenerateResult<Self> {
        Self::with_config(api_key, GenerateConfig::default())
    }

    /// Create a client reading the API key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MissingCredential`] when the variable
    /// is unset or empty.
    pub fn from_env() -> GenerateResult<Self> {
        let key = std::env::var(API_KEY_ENV).map_err(|_| GenerateError::MissingCredential)?;
        Self::new(key)
    }

    /// Create a client with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MissingCredential`] for an empty key or
    /// [`GenerateError::InvalidUrl`] for a malformed endpoint.
    pub fn with_config(api_key: impl Into<String>, config: GenerateConfig) -> GenerateResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerateError::MissingCredential);
        }
        let endpoint =
            Url::parse(&config.endpoint).map_err(|e| GenerateError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            http: Client::new(),
            endpoint,
            api_key,
            config,
        })
    }

    /// Send a prompt and return the raw completion text.
    ///
    /// # Errors
    ///
    /// Returns a typed error for HTTP failures, non-success statuses,
    /// undecodable payloads, or an empty completion. All failures are
    /// recoverable; the caller may retry when
    /// [`GenerateError::is_retryable`] holds.
    pub async fn complete(&self, prompt: &str) -> GenerateResult<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "generation API error");
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message: message.chars().take(500).collect(),
            });
        }

        let payload: ChatResponse = response.json().await?;
        let content = payload
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(GenerateError::EmptyResponse)?;

        tracing::debug!(chars = content.len(), "completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_missing_credential() {
        let result = GenerateClient::new("");
        assert!(matches!(result, Err(GenerateError::MissingCredential)));
        let result = GenerateClient::new("   ");
        assert!(matches!(result, Err(GenerateError::MissingCredential)));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = GenerateConfig {
            endpoint: "not a url".to_string(),
            ..GenerateConfig::default()
        };
        let result = GenerateClient::with_config("sk-test", config);
        assert!(matches!(result, Err(GenerateError::InvalidUrl(_))));
    }

    #[test]
    fn test_default_config() {
        let config = GenerateConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.max_tokens, 300);
    }

    #[test]
    fn test_retryability() {
        assert!(GenerateError::Api {
            status: 503,
            message: String::new()
        }
        .is_retryable());
        assert!(GenerateError::Api {
            status: 429,
            message: String::new()
        }
        .is_retryable());
        assert!(!GenerateError::Api {
            status: 401,
            message: String::new()
        }
        .is_retryable());
        assert!(!GenerateError::MissingCredential.is_retryable());
        assert!(!GenerateError::EmptyResponse.is_retryable());
    }
}
