//! OpenAI Completion Adapter - CompletionService implementation for OpenAI's
//! chat-completions API.
//!
//! Non-streaming: one prompt in, one message content out.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiConfig::new(api_key)
//!     .with_model("gpt-4o")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let service = OpenAiCompletionService::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{CompletionError, CompletionRequest, CompletionResponse, CompletionService};

/// Configuration for the OpenAI adapter.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g. "gpt-4o").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API adapter.
pub struct OpenAiCompletionService {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiCompletionService {
    /// Creates a new adapter with the given configuration.
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAiApiRequest {
        OpenAiApiRequest {
            model: self.config.model.clone(),
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Sends a request and maps transport failures.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, CompletionError> {
        let api_request = self.to_openai_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    CompletionError::network(format!("Connection failed: {}", e))
                } else {
                    CompletionError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, CompletionError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(CompletionError::AuthenticationFailed),
            429 => Err(CompletionError::rate_limited(Self::parse_retry_after(
                &error_body,
            ))),
            400 => Err(CompletionError::InvalidRequest(error_body)),
            500..=599 => Err(CompletionError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(CompletionError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses retry-after from an error response.
    ///
    /// OpenAI sometimes includes "try again in Xs" in the error message;
    /// defaults to 30 seconds otherwise.
    fn parse_retry_after(error_body: &str) -> u32 {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(message) = parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                if let Some(idx) = message.find("try again in ") {
                    let rest = &message[idx + 13..];
                    if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                        if let Ok(secs) = rest[..num_end].parse::<u32>() {
                            return secs;
                        }
                    }
                }
            }
        }
        30
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletionService {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let response = self.send_request(&request).await?;
        let response = self.handle_response_status(response).await?;

        let body: OpenAiApiResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::parse(e.to_string()))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::parse("completion had no choices"))?;

        Ok(CompletionResponse {
            content: choice.message.content,
            model: body.model,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct OpenAiApiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiResponse {
    model: String,
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_target_the_public_api() {
        let config = OpenAiConfig::new("sk-test");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn config_builder_overrides_work() {
        let config = OpenAiConfig::new("sk-test")
            .with_model("gpt-4-turbo")
            .with_base_url("http://localhost:8080/v1")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.model, "gpt-4-turbo");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn completions_url_appends_the_endpoint() {
        let service = OpenAiCompletionService::new(
            OpenAiConfig::new("sk-test").with_base_url("http://localhost:9999/v1"),
        );
        assert_eq!(
            service.completions_url(),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn request_maps_prompt_to_a_single_user_message() {
        let service = OpenAiCompletionService::new(OpenAiConfig::new("sk-test"));
        let request = CompletionRequest::new("hello").with_max_tokens(256);

        let api_request = service.to_openai_request(&request);

        assert_eq!(api_request.model, "gpt-4o");
        assert_eq!(api_request.messages.len(), 1);
        assert_eq!(api_request.messages[0].role, "user");
        assert_eq!(api_request.messages[0].content, "hello");
        assert_eq!(api_request.max_tokens, Some(256));
        assert_eq!(api_request.temperature, None);
    }

    #[test]
    fn unset_options_are_omitted_from_the_wire_format() {
        let service = OpenAiCompletionService::new(OpenAiConfig::new("sk-test"));
        let api_request = service.to_openai_request(&CompletionRequest::new("hello"));

        let json = serde_json::to_string(&api_request).unwrap();
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn parse_retry_after_reads_the_error_message() {
        let body = r#"{"error":{"message":"Rate limit reached, try again in 7s."}}"#;
        assert_eq!(OpenAiCompletionService::parse_retry_after(body), 7);
    }

    #[test]
    fn parse_retry_after_defaults_to_thirty_seconds() {
        assert_eq!(OpenAiCompletionService::parse_retry_after("not json"), 30);
        assert_eq!(
            OpenAiCompletionService::parse_retry_after(r#"{"error":{"message":"nope"}}"#),
            30
        );
    }

    #[test]
    fn response_body_parses_first_choice() {
        let json = r#"{
            "model": "gpt-4o",
            "choices": [
                {"message": {"role": "assistant", "content": "**Positive**\ngood"}}
            ]
        }"#;

        let body: OpenAiApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.model, "gpt-4o");
        assert_eq!(body.choices[0].message.content, "**Positive**\ngood");
    }
}
