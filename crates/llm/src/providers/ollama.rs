//! Ollama generation provider.
//!
//! Talks to a locally hosted Ollama instance over HTTP.
//! Ollama API: https://github.com/ollama/ollama/blob/main/docs/api.md

use crate::client::{GenerationClient, GenerationRequest, GenerationResponse};
use pdfchat_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Generation calls block until the full answer is produced, which can take
/// minutes on CPU-bound hosts.
const GENERATE_TIMEOUT_SECS: u64 = 120;

/// Model listing must answer quickly so choosers can always render.
const TAGS_TIMEOUT_SECS: u64 = 10;

/// Ollama API request format for `/api/generate`.
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

/// Sampling options nested under "options" on the wire.
#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Ollama API response format for a non-streaming `/api/generate` call.
///
/// Depending on the Ollama version the generated text arrives in either
/// `response` or `output`; both are modelled and resolved in a fixed order.
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    done: Option<bool>,
}

impl OllamaGenerateResponse {
    /// Resolve the generated text: `response` first, `output` as the
    /// forward-compatibility fallback.
    fn into_text(self) -> String {
        self.response.or(self.output).unwrap_or_default()
    }
}

/// Response format for `/api/tags`.
#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaTag>,
}

#[derive(Debug, Deserialize)]
struct OllamaTag {
    #[serde(default)]
    name: String,
}

/// Ollama generation client.
pub struct OllamaClient {
    /// Base URL for the Ollama API
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OllamaClient {
    /// Create a new Ollama client with default settings.
    ///
    /// Default URL: http://127.0.0.1:11434
    pub fn new() -> Self {
        Self::with_base_url("http://127.0.0.1:11434")
    }

    /// Create a new Ollama client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Convert GenerationRequest to Ollama wire format.
    fn to_ollama_request(&self, request: &GenerationRequest) -> OllamaGenerateRequest {
        OllamaGenerateRequest {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            stream: false,
            options: request
                .temperature
                .map(|temperature| OllamaOptions { temperature }),
        }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GenerationClient for OllamaClient {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &GenerationRequest) -> AppResult<GenerationResponse> {
        tracing::info!(model = %request.model, "Sending generation request to Ollama");

        let ollama_request = self.to_ollama_request(request);
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(GENERATE_TIMEOUT_SECS))
            .json(&ollama_request)
            .send()
            .await
            .map_err(|e| {
                AppError::GenerationUnavailable(format!("Failed to contact Ollama: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Generation(format!(
                "Ollama error ({}): {}",
                status, error_text
            )));
        }

        // Non-streaming requests return a single JSON object
        let ollama_response: OllamaGenerateResponse = response.json().await.map_err(|e| {
            AppError::Generation(format!("Failed to parse Ollama response: {}", e))
        })?;

        tracing::debug!("Received generation response from Ollama");

        let model = ollama_response
            .model
            .clone()
            .unwrap_or_else(|| request.model.clone());
        let done = ollama_response.done.unwrap_or(true);

        Ok(GenerationResponse {
            content: ollama_response.into_text(),
            model,
            done,
        })
    }

    async fn list_models(&self) -> AppResult<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(TAGS_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| {
                AppError::GenerationUnavailable(format!("Failed to contact Ollama: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Generation(format!(
                "Ollama error ({}): {}",
                status, error_text
            )));
        }

        let tags: OllamaTagsResponse = response.json().await.map_err(|e| {
            AppError::Generation(format!("Failed to parse Ollama tags response: {}", e))
        })?;

        Ok(tags
            .models
            .into_iter()
            .map(|tag| tag.name)
            .filter(|name| !name.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_client_creation() {
        let client = OllamaClient::new();
        assert_eq!(client.provider_name(), "ollama");
        assert_eq!(client.base_url, "http://127.0.0.1:11434");
    }

    #[test]
    fn test_ollama_request_conversion() {
        let client = OllamaClient::new();
        let request = GenerationRequest::new("Hello", "llama3.2").with_temperature(0.7);

        let ollama_req = client.to_ollama_request(&request);
        assert_eq!(ollama_req.model, "llama3.2");
        assert_eq!(ollama_req.prompt, "Hello");
        assert!(!ollama_req.stream);
        assert_eq!(ollama_req.options.unwrap().temperature, 0.7);
    }

    #[test]
    fn test_request_without_temperature_omits_options() {
        let client = OllamaClient::new();
        let request = GenerationRequest::new("Hello", "llama3.2");

        let ollama_req = client.to_ollama_request(&request);
        assert!(ollama_req.options.is_none());

        let wire = serde_json::to_value(&ollama_req).unwrap();
        assert!(wire.get("options").is_none());
        assert_eq!(wire["stream"], serde_json::json!(false));
    }

    #[test]
    fn test_response_field_resolution_prefers_response() {
        let parsed: OllamaGenerateResponse =
            serde_json::from_str(r#"{"response": "Paris", "output": "ignored"}"#).unwrap();
        assert_eq!(parsed.into_text(), "Paris");
    }

    #[test]
    fn test_response_field_resolution_falls_back_to_output() {
        let parsed: OllamaGenerateResponse =
            serde_json::from_str(r#"{"output": "Paris"}"#).unwrap();
        assert_eq!(parsed.into_text(), "Paris");
    }

    #[test]
    fn test_response_field_resolution_empty_payload() {
        let parsed: OllamaGenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.into_text(), "");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        // Port 1 is never an Ollama instance
        let client = OllamaClient::with_base_url("http://127.0.0.1:1");

        let result = client
            .complete(&GenerationRequest::new("hello", "llama3.2"))
            .await;
        assert!(matches!(result, Err(AppError::GenerationUnavailable(_))));

        let result = client.list_models().await;
        assert!(matches!(result, Err(AppError::GenerationUnavailable(_))));
    }

    #[test]
    fn test_tags_deserialization() {
        let payload = r#"{"models": [{"name": "llama3:latest"}, {"name": "nomic-embed-text"}]}"#;
        let tags: OllamaTagsResponse = serde_json::from_str(payload).unwrap();
        let names: Vec<String> = tags.models.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["llama3:latest", "nomic-embed-text"]);
    }
}
