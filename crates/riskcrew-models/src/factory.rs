//! Model factory for creating model instances from configuration.
//!
//! This module provides functionality to create model instances based on configuration,
//! handling API key loading from environment variables.

use crate::{MockModel, OpenAIModel, MISTRAL_BASE_URL};
use riskcrew_abstraction::{Model, ModelError};
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Model type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    /// Mock model for testing.
    Mock,
    /// OpenAI model.
    OpenAI,
    /// Mistral model via its OpenAI-compatible endpoint.
    Mistral,
}

impl ModelType {
    /// Environment variable holding the API key, if the provider needs one.
    #[must_use]
    pub const fn api_key_env(self) -> Option<&'static str> {
        match self {
            Self::Mock => None,
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Mistral => Some("MISTRAL_API_KEY"),
        }
    }

    /// Model used when the configuration names none.
    #[must_use]
    pub const fn default_model_id(self) -> &'static str {
        match self {
            Self::Mock => "mock-model",
            Self::OpenAI => "gpt-4o-mini",
            Self::Mistral => "mistral-large-latest",
        }
    }
}

impl FromStr for ModelType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "openai" => Ok(Self::OpenAI),
            "mistral" => Ok(Self::Mistral),
            _ => Err(()),
        }
    }
}

/// Model configuration.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// The type of model to create.
    pub model_type: ModelType,
    /// The model ID (e.g., "gpt-4o-mini", "mistral-large-latest").
    pub model_id: String,
    /// Optional API key (if not provided, will be loaded from environment).
    pub api_key: Option<String>,
    /// Optional base URL override for OpenAI-compatible providers.
    pub base_url: Option<String>,
    /// Optional per-request deadline for HTTP providers.
    pub timeout: Option<Duration>,
}

impl ModelConfig {
    /// Creates a new `ModelConfig` with the given type and model ID.
    #[must_use]
    pub fn new(model_type: ModelType, model_id: String) -> Self {
        Self { model_type, model_id, api_key: None, base_url: None, timeout: None }
    }

    /// Sets the API key for this configuration.
    #[must_use]
    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Sets the base URL for this configuration.
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the per-request deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Factory for creating model instances.
pub struct ModelFactory;

impl ModelFactory {
    /// Creates a model instance from the given configuration.
    ///
    /// # Errors
    /// Returns a `ModelError` if model creation fails (e.g., missing API key).
    pub fn create(config: ModelConfig) -> Result<Arc<dyn Model + Send + Sync>, ModelError> {
        debug!(
            model_type = ?config.model_type,
            model_id = %config.model_id,
            "Creating model instance"
        );

        match config.model_type {
            ModelType::Mock => Ok(Arc::new(MockModel::new(config.model_id))),
            ModelType::OpenAI | ModelType::Mistral => {
                let api_key = Self::resolve_api_key(&config)?;
                let mut model = OpenAIModel::with_api_key(config.model_id, api_key);

                if config.model_type == ModelType::Mistral {
                    model = model.with_provider("mistral").with_base_url(MISTRAL_BASE_URL);
                }
                if let Some(base_url) = config.base_url {
                    model = model.with_base_url(base_url);
                }
                if let Some(timeout) = config.timeout {
                    model = model.with_timeout(timeout);
                }

                Ok(Arc::new(model))
            }
        }
    }

    /// Parses an engine name into a [`ModelType`].
    ///
    /// # Errors
    /// Returns `UnsupportedModelProvider` for unknown names.
    pub fn parse_type(model_type_str: &str) -> Result<ModelType, ModelError> {
        ModelType::from_str(model_type_str).map_err(|()| {
            error!(model_type = %model_type_str, "Unrecognized model type");
            ModelError::UnsupportedModelProvider(format!(
                "Unrecognized model type: {}",
                model_type_str
            ))
        })
    }

    #[allow(clippy::disallowed_methods)] // env::var is needed for API key loading
    fn resolve_api_key(config: &ModelConfig) -> Result<String, ModelError> {
        if let Some(api_key) = &config.api_key {
            return Ok(api_key.clone());
        }

        let Some(var) = config.model_type.api_key_env() else {
            return Ok(String::new());
        };

        env::var(var).map_err(|_| {
            ModelError::UnsupportedModelProvider(format!("{} environment variable not set", var))
        })
    }
}
