//! Configuration Management
//!
//! Analyzer settings are configurable; the capture constants (frame cap,
//! sampling cadence, JPEG quality) are fixed and deliberately not exposed
//! here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer settings
    pub analyzer: AnalyzerConfig,
}

/// Analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// API base URL
    pub endpoint: String,
    /// Model for multimodal analysis
    pub model: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.analyzer.model.trim().is_empty() {
            return Err(crate::Error::Config("model must not be empty".to_string()));
        }
        if !self.analyzer.endpoint.starts_with("http") {
            return Err(crate::Error::Config(format!(
                "endpoint must be an http(s) URL, got {}",
                self.analyzer.endpoint
            )));
        }
        if self.analyzer.request_timeout_secs == 0 || self.analyzer.request_timeout_secs > 600 {
            return Err(crate::Error::Config(format!(
                "request_timeout_secs must be in [1, 600], got {}",
                self.analyzer.request_timeout_secs
            )));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from the default location, falling back to defaults when
    /// no file exists
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".autoflow").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
