//! OpenAI-compatible chat completion model.
//!
//! Talks to any endpoint that speaks the `/chat/completions` protocol. The
//! factory uses it for both OpenAI and Mistral.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use riskcrew_abstraction::{
    ChatMessage, Model, ModelError, ModelParameters, ModelResponse, ModelUsage,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Default OpenAI API endpoint.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Mistral's OpenAI-compatible endpoint.
pub const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// OpenAI-compatible model implementation.
#[derive(Debug, Clone)]
pub struct OpenAIModel {
    /// The model ID (e.g., "gpt-4o-mini", "mistral-large-latest").
    model_id: String,
    /// The API key for authentication.
    api_key: String,
    /// The base URL of the API, without trailing slash.
    base_url: String,
    /// Provider name used in error reports.
    provider: String,
    /// Per-request deadline. `None` leaves reqwest's default (no timeout).
    timeout: Option<Duration>,
    /// HTTP client for making requests.
    client: Client,
}

impl OpenAIModel {
    /// Creates a new `OpenAIModel` with an explicit API key.
    #[must_use]
    pub fn with_api_key(model_id: String, api_key: String) -> Self {
        Self {
            model_id,
            api_key,
            base_url: OPENAI_BASE_URL.to_string(),
            provider: "openai".to_string(),
            timeout: None,
            client: Client::new(),
        }
    }

    /// Points the model at a different OpenAI-compatible endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the provider name reported in errors and logs.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Sets a per-request deadline. Requests that exceed it fail with
    /// [`ModelError::Timeout`].
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the provider name.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Converts our ChatMessage role to OpenAI API role format.
    fn role_to_openai(role: &str) -> String {
        match role {
            "assistant" => "assistant".to_string(),
            "system" => "system".to_string(),
            "user" => "user".to_string(),
            _ => role.to_string(),
        }
    }

    fn transport_error(&self, e: &reqwest::Error) -> ModelError {
        if e.is_timeout() {
            error!(provider = %self.provider, error = %e, "Request timed out");
            ModelError::Timeout(format!("{} request timed out: {}", self.provider, e))
        } else {
            error!(provider = %self.provider, error = %e, "Failed to send request");
            ModelError::Unavailable(format!("Network error: {}", e))
        }
    }

    fn status_error(&self, status: StatusCode, error_text: String) -> ModelError {
        error!(
            provider = %self.provider,
            status = %status,
            error = %error_text,
            "API returned error status"
        );

        match status.as_u16() {
            402 | 429 => ModelError::QuotaExceeded {
                provider: self.provider.clone(),
                message: Some(error_text),
            },
            401 | 403 => ModelError::Unavailable(format!(
                "Authentication failed ({}): {}",
                status, error_text
            )),
            408 | 504 => ModelError::Timeout(format!("API timeout ({}): {}", status, error_text)),
            code if code >= 500 => {
                ModelError::Unavailable(format!("API error ({}): {}", status, error_text))
            }
            _ => ModelError::ModelResponseError(format!("API error ({}): {}", status, error_text)),
        }
    }
}

#[async_trait]
impl Model for OpenAIModel {
    async fn generate_text(
        &self,
        prompt: &str,
        parameters: Option<ModelParameters>,
    ) -> Result<ModelResponse, ModelError> {
        debug!(
            model_id = %self.model_id,
            prompt_len = prompt.len(),
            parameters = ?parameters,
            "OpenAIModel generating text"
        );

        let messages = vec![ChatMessage::user(prompt)];
        self.generate_chat_completion(&messages, parameters).await
    }

    async fn generate_chat_completion(
        &self,
        messages: &[ChatMessage],
        parameters: Option<ModelParameters>,
    ) -> Result<ModelResponse, ModelError> {
        debug!(
            model_id = %self.model_id,
            provider = %self.provider,
            message_count = messages.len(),
            parameters = ?parameters,
            "OpenAIModel generating chat completion"
        );

        let url = format!("{}/chat/completions", self.base_url);

        let openai_messages: Vec<OpenAIMessage> = messages
            .iter()
            .map(|msg| OpenAIMessage {
                role: Self::role_to_openai(&msg.role),
                content: Some(msg.content.clone()),
            })
            .collect();

        let mut request_body = OpenAIRequest {
            model: self.model_id.clone(),
            messages: openai_messages,
            temperature: None,
            top_p: None,
            max_tokens: None,
            stop: None,
        };

        if let Some(params) = parameters {
            request_body.temperature = params.temperature;
            request_body.top_p = params.top_p;
            request_body.max_tokens = params.max_tokens;
            request_body.stop = params.stop_sequences;
        }

        let mut request = self.client.post(&url).bearer_auth(&self.api_key).json(&request_body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(self.status_error(status, error_text));
        }

        let openai_response: OpenAIResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                return self.transport_error(&e);
            }
            error!(provider = %self.provider, error = %e, "Failed to parse API response");
            ModelError::SerializationError(format!("Failed to parse response: {}", e))
        })?;

        let content = openai_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                error!(provider = %self.provider, "No content in API response");
                ModelError::ModelResponseError("No content in API response".to_string())
            })?;

        let usage = openai_response.usage.map(|u| ModelUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ModelResponse { content, model_id: Some(self.model_id.clone()), usage })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// Chat completion request/response structures

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
#[allow(clippy::struct_field_names)] // Matches API naming
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_conversion() {
        assert_eq!(OpenAIModel::role_to_openai("user"), "user");
        assert_eq!(OpenAIModel::role_to_openai("assistant"), "assistant");
        assert_eq!(OpenAIModel::role_to_openai("system"), "system");
    }

    #[test]
    fn test_openai_model_creation_with_api_key() {
        let model = OpenAIModel::with_api_key("gpt-4".to_string(), "test-key".to_string());
        assert_eq!(model.model_id(), "gpt-4");
        assert_eq!(model.base_url(), OPENAI_BASE_URL);
        assert_eq!(model.provider(), "openai");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let model = OpenAIModel::with_api_key("m".to_string(), "k".to_string())
            .with_base_url("http://localhost:8000/v1/");
        assert_eq!(model.base_url(), "http://localhost:8000/v1");
    }

    #[test]
    fn test_status_mapping() {
        let model = OpenAIModel::with_api_key("m".to_string(), "k".to_string())
            .with_provider("mistral");

        let quota = model.status_error(StatusCode::TOO_MANY_REQUESTS, "slow down".to_string());
        assert!(matches!(quota, ModelError::QuotaExceeded { ref provider, .. } if provider == "mistral"));

        let auth = model.status_error(StatusCode::UNAUTHORIZED, "bad key".to_string());
        assert!(matches!(auth, ModelError::Unavailable(_)));

        let gateway = model.status_error(StatusCode::GATEWAY_TIMEOUT, String::new());
        assert!(gateway.is_timeout());

        let server = model.status_error(StatusCode::BAD_GATEWAY, String::new());
        assert!(matches!(server, ModelError::Unavailable(_)));

        let bad_request = model.status_error(StatusCode::BAD_REQUEST, "nope".to_string());
        assert!(matches!(bad_request, ModelError::ModelResponseError(_)));
    }
}
