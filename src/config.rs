use serde::{Deserialize, Serialize};

use crate::error::{CaptionError, Result};

pub const DEFAULT_HOST: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "gemma3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_LOG_LEVEL: &str = "product_captions=info";

/// Configuration loaded from product_captions.toml and environment variables
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the model server
    pub host: String,
    /// Model used when none is chosen explicitly
    pub model: String,
    /// Per-request HTTP timeout; vision generations routinely exceed 30s
    pub request_timeout_secs: u64,
    /// Tracing filter used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses PRODUCT_CAPTIONS_CONFIG or defaults to "product_captions.toml"
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(env_path) = std::env::var("PRODUCT_CAPTIONS_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let config_path = std::env::var("PRODUCT_CAPTIONS_CONFIG")
            .unwrap_or_else(|_| "product_captions.toml".to_string());

        let mut config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CaptionError::Config {
            message: format!("invalid TOML: {}", e),
        })
    }

    /// Apply environment overrides (env-first) using the given lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("OLLAMA_HOST") {
            tracing::debug!("OLLAMA_HOST env override applied");
            self.host = host;
        }
        if let Some(model) = lookup("PRODUCT_CAPTIONS_MODEL") {
            tracing::debug!("PRODUCT_CAPTIONS_MODEL env override applied");
            self.model = model;
        }
        if let Some(secs) = lookup("PRODUCT_CAPTIONS_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = secs;
        }
        if let Some(level) = lookup("RUST_LOG") {
            self.log_level = level;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            return Err(CaptionError::Config {
                message: format!("host must start with http:// or https://, got {}", self.host),
            });
        }
        if self.model.trim().is_empty() {
            return Err(CaptionError::Config {
                message: "model must not be empty".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(CaptionError::Config {
                message: "request_timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
