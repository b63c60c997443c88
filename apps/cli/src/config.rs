//! CLI configuration file support.
//!
//! Configuration precedence:
//! 1. CLI arguments (handled by clap)
//! 2. Environment variables (`RISKCREW_ENGINE`, `RISKCREW_MODEL`, `RUST_LOG`)
//! 3. Local config file (./.riskcrewrc)
//! 4. Global config file (~/.riskcrew/config.toml)
//! 5. Defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENGINE_ENV: &str = "RISKCREW_ENGINE";
pub const MODEL_ENV: &str = "RISKCREW_MODEL";
pub const LOG_ENV: &str = "RUST_LOG";

/// CLI configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Model provider (mock, openai, mistral)
    #[serde(default)]
    pub engine: Option<String>,

    /// Model id for the provider
    #[serde(default)]
    pub model: Option<String>,

    /// Base URL override for OpenAI-compatible providers
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key; falls back to the provider's environment variable
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request HTTP deadline in seconds
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Log level
    #[serde(default)]
    pub log_level: Option<String>,

    /// Output format preferences
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output format configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format (human, json); human when unset
    #[serde(default)]
    pub format: Option<String>,
}

impl OutputConfig {
    pub fn is_json(&self) -> bool {
        self.format.as_deref().is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum CliConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),
}

/// Result type for configuration operations.
pub type CliConfigResult<T> = std::result::Result<T, CliConfigError>;

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> CliConfigResult<Self> {
        if !path.exists() {
            return Err(CliConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CliConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content)
            .map_err(|e| CliConfigError::ParseError(format!("{}: {}", path.display(), e)))
    }

    /// Get default global configuration file path.
    pub fn default_global_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".riskcrew")
            .join("config.toml")
    }

    /// Get default local configuration file path.
    pub fn default_local_path() -> PathBuf {
        PathBuf::from(".riskcrewrc")
    }

    /// Discover and load configuration files.
    ///
    /// Local config overrides global config. Missing files are skipped
    /// silently; unreadable or malformed ones are skipped and returned so the
    /// caller can report them once logging is up.
    pub fn discover_and_load() -> (Self, Vec<CliConfigError>) {
        Self::load_layers(&[Self::default_global_path(), Self::default_local_path()])
    }

    /// Loads and merges `paths` in order, later files winning.
    pub fn load_layers(paths: &[PathBuf]) -> (Self, Vec<CliConfigError>) {
        let mut config = Self::default();
        let mut skipped = Vec::new();
        for path in paths {
            match Self::load_from_file(path) {
                Ok(layer) => config.merge(&layer),
                Err(CliConfigError::NotFound(_)) => {}
                Err(e) => skipped.push(e),
            }
        }
        (config, skipped)
    }

    /// Merge another configuration into this one.
    ///
    /// Values from `other` override values in `self` if they are Some.
    pub fn merge(&mut self, other: &Self) {
        if let Some(ref engine) = other.engine {
            self.engine = Some(engine.clone());
        }
        if let Some(ref model) = other.model {
            self.model = Some(model.clone());
        }
        if let Some(ref base_url) = other.base_url {
            self.base_url = Some(base_url.clone());
        }
        if let Some(ref api_key) = other.api_key {
            self.api_key = Some(api_key.clone());
        }
        if let Some(timeout) = other.request_timeout_secs {
            self.request_timeout_secs = Some(timeout);
        }
        if let Some(ref log_level) = other.log_level {
            self.log_level = Some(log_level.clone());
        }
        if let Some(ref format) = other.output.format {
            self.output.format = Some(format.clone());
        }
    }

    /// Overlays environment variables looked up through `lookup`.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(engine) = get(ENGINE_ENV) {
            self.engine = Some(engine);
        }
        if let Some(model) = get(MODEL_ENV) {
            self.model = Some(model);
        }
        if let Some(level) = get(LOG_ENV) {
            self.log_level = Some(level);
        }
    }

    /// Full discovery: files, then the process environment.
    ///
    /// Returns the files that were skipped alongside the merged result.
    pub fn load() -> (Self, Vec<CliConfigError>) {
        let (mut config, skipped) = Self::discover_and_load();
        config.apply_env(|key| std::env::var(key).ok());
        (config, skipped)
    }
}
