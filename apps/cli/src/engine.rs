//! Engine selection and router bootstrap.

use crate::config::CliConfig;
use anyhow::Context;
use riskcrew_models::{ModelConfig, ModelFactory, ModelType};
use riskcrew_orchestrator::{AgentRegistry, ModelGateway, Router};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Model settings after CLI flags are layered over the loaded config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub engine: String,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub request_timeout: Option<Duration>,
}

impl EngineSettings {
    pub fn resolve(config: &CliConfig, engine: Option<String>, model: Option<String>) -> Self {
        Self {
            engine: engine.or_else(|| config.engine.clone()).unwrap_or_else(|| "mock".to_string()),
            model: model.or_else(|| config.model.clone()),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            request_timeout: config.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Builds the provider configuration.
    pub fn model_config(&self) -> anyhow::Result<ModelConfig> {
        let model_type = ModelFactory::parse_type(&self.engine)
            .with_context(|| format!("Unknown engine '{}' (expected mock, openai or mistral)", self.engine))?;
        let model_id = self
            .model
            .clone()
            .unwrap_or_else(|| model_type.default_model_id().to_string());

        let mut config = ModelConfig::new(model_type, model_id);
        if let Some(ref key) = self.api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(ref url) = self.base_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(timeout) = self.request_timeout {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }
}

/// Creates a router over the standard crew and the configured model.
pub fn build_router(settings: &EngineSettings) -> anyhow::Result<Router> {
    let config = settings.model_config()?;
    let model_type: ModelType = config.model_type;
    let model_id = config.model_id.clone();

    let model = ModelFactory::create(config)
        .with_context(|| format!("Failed to initialize {} model '{}'", settings.engine, model_id))?;
    info!(engine = ?model_type, model_id = %model_id, "Model ready");

    let gateway = ModelGateway::new(model);
    let router = Router::new(Arc::new(AgentRegistry::standard()), Arc::new(gateway))
        .context("Agent registry is incomplete")?;
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let config = CliConfig {
            engine: Some("openai".to_string()),
            model: Some("gpt-4o".to_string()),
            request_timeout_secs: Some(15),
            ..Default::default()
        };

        let settings = EngineSettings::resolve(&config, Some("mistral".to_string()), None);
        assert_eq!(settings.engine, "mistral");
        assert_eq!(settings.model, Some("gpt-4o".to_string()));
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_defaults_to_mock() {
        let settings = EngineSettings::resolve(&CliConfig::default(), None, None);
        let config = settings.model_config().unwrap();
        assert_eq!(config.model_type, ModelType::Mock);
        assert_eq!(config.model_id, "mock-model");
    }

    #[test]
    fn test_unknown_engine_is_rejected() {
        let settings = EngineSettings::resolve(&CliConfig::default(), Some("claude".to_string()), None);
        let err = settings.model_config().unwrap_err();
        assert!(err.to_string().contains("Unknown engine 'claude'"));
    }

    #[test]
    fn test_build_router_with_mock() {
        let settings = EngineSettings::resolve(&CliConfig::default(), None, None);
        let router = build_router(&settings).unwrap();
        assert_eq!(router.registry().len(), 5);
    }
}
