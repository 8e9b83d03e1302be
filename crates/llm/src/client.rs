//! Generation client abstraction and request/response types.
//!
//! This module defines the core abstractions for talking to the text
//! generation backend. The answer pipeline only ever issues non-streaming
//! requests and waits synchronously for the full response.

use pdfchat_core::AppResult;
use serde::{Deserialize, Serialize};

/// Generation completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The prompt text to send to the model
    pub prompt: String,

    /// Model identifier (e.g., "llama3.2", "mistral")
    pub model: String,

    /// Temperature for sampling, already clamped by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Create a new generation request with required fields.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Set the temperature for sampling.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Generation completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated text, untrimmed
    pub content: String,

    /// Model that generated the response
    pub model: String,

    /// Whether the backend reported the response as complete
    #[serde(default = "default_true")]
    pub done: bool,
}

fn default_true() -> bool {
    true
}

/// Trait for generation backends.
///
/// Abstracts the underlying provider so pipelines can be tested against
/// in-process stubs while production wiring uses Ollama.
#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    /// Get the provider name (e.g., "ollama").
    fn provider_name(&self) -> &str;

    /// Perform a non-streaming completion.
    ///
    /// # Errors
    /// `GenerationUnavailable` when the backend cannot be reached,
    /// `Generation` when it answers with a non-success status.
    async fn complete(&self, request: &GenerationRequest) -> AppResult<GenerationResponse>;

    /// List the model names the backend currently serves.
    async fn list_models(&self) -> AppResult<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("Hello", "llama3.2").with_temperature(0.2);
        assert_eq!(request.prompt, "Hello");
        assert_eq!(request.model, "llama3.2");
        assert_eq!(request.temperature, Some(0.2));
    }

    #[test]
    fn test_request_defaults() {
        let request = GenerationRequest::new("Hello", "llama3.2");
        assert_eq!(request.temperature, None);
    }

    #[test]
    fn test_response_done_defaults_to_true() {
        let response: GenerationResponse =
            serde_json::from_str(r#"{"content": "hi", "model": "llama3.2"}"#).unwrap();
        assert!(response.done);
    }
}
