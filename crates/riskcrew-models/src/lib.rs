//! Model implementations for RiskCrew.
//!
//! This crate provides concrete implementations of the `Model` trait.
//!
//! # Supported Providers
//!
//! - **Mock**: Offline testing and development
//! - **OpenAI**: OpenAI's chat models (API key required)
//! - **Mistral**: Mistral's OpenAI-compatible API (API key required)

pub mod factory;
pub mod openai;

use async_trait::async_trait;
use riskcrew_abstraction::{
    ChatMessage, Model, ModelError, ModelParameters, ModelResponse, ModelUsage,
};
use tracing::debug;

pub use factory::{ModelConfig, ModelFactory, ModelType};
pub use openai::{OpenAIModel, MISTRAL_BASE_URL, OPENAI_BASE_URL};

/// A mock implementation of the `Model` trait for testing and demonstration.
///
/// Echoes the conversation back, so the output shows exactly what an agent
/// would have sent to a real provider.
#[derive(Debug, Default)]
pub struct MockModel {
    id: String,
}

impl MockModel {
    /// Creates a new `MockModel` with the given ID.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Model for MockModel {
    async fn generate_text(
        &self,
        prompt: &str,
        parameters: Option<ModelParameters>,
    ) -> Result<ModelResponse, ModelError> {
        debug!(
            model_id = %self.id,
            prompt_len = prompt.len(),
            parameters = ?parameters,
            "MockModel generating text"
        );

        let response_content = format!("Mock response for: {prompt}\nModel ID: {}", self.id);

        let prompt_tokens = count_tokens(prompt);
        let completion_tokens = count_tokens(&response_content);
        let total_tokens = prompt_tokens + completion_tokens;

        Ok(ModelResponse {
            content: response_content,
            model_id: Some(self.id.clone()),
            usage: Some(ModelUsage { prompt_tokens, completion_tokens, total_tokens }),
        })
    }

    async fn generate_chat_completion(
        &self,
        messages: &[ChatMessage],
        parameters: Option<ModelParameters>,
    ) -> Result<ModelResponse, ModelError> {
        use std::fmt::Write;

        debug!(
            model_id = %self.id,
            message_count = messages.len(),
            parameters = ?parameters,
            "MockModel generating chat completion"
        );

        let mut conversation_summary = String::from("Conversation Summary:\n");
        for message in messages {
            let _ = writeln!(conversation_summary, "  {}: {}", message.role, message.content);
        }

        let response_content = format!("Mock chat response from {}\n{conversation_summary}", self.id);

        let prompt_tokens = messages.iter().map(|m| count_tokens(&m.content)).sum::<u32>();
        let completion_tokens = count_tokens(&response_content);
        let total_tokens = prompt_tokens + completion_tokens;

        Ok(ModelResponse {
            content: response_content,
            model_id: Some(self.id.clone()),
            usage: Some(ModelUsage { prompt_tokens, completion_tokens, total_tokens }),
        })
    }

    fn model_id(&self) -> &str {
        &self.id
    }
}

/// Count tokens in a string (simplified: word count).
#[allow(clippy::cast_possible_truncation)]
fn count_tokens(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}
