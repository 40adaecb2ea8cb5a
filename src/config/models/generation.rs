//! Image generation configuration

use super::*;
use crate::core::providers::GeminiConfig;
use serde::{Deserialize, Serialize};

/// Image generation configuration.
///
/// The Gemini API key is deliberately absent here. It is read from the
/// `GEMINI_API_KEY` environment variable at client construction so it
/// never lands in a config file on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Model used for image generation
    #[serde(default = "default_generation_model")]
    pub model: String,
    /// Upstream API base URL
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,
    /// Upstream API version path segment
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_generation_timeout")]
    pub request_timeout: u64,
    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Maximum variants generated concurrently per request
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Maximum variants a single request may ask for
    #[serde(default = "default_max_variants")]
    pub max_variants: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_generation_model(),
            base_url: default_generation_base_url(),
            api_version: default_api_version(),
            request_timeout: default_generation_timeout(),
            connect_timeout: default_connect_timeout(),
            max_concurrency: default_max_concurrency(),
            max_variants: default_max_variants(),
        }
    }
}

impl GenerationConfig {
    /// Merge generation configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.model != default_generation_model() {
            self.model = other.model;
        }
        if other.base_url != default_generation_base_url() {
            self.base_url = other.base_url;
        }
        if other.api_version != default_api_version() {
            self.api_version = other.api_version;
        }
        if other.request_timeout != default_generation_timeout() {
            self.request_timeout = other.request_timeout;
        }
        if other.connect_timeout != default_connect_timeout() {
            self.connect_timeout = other.connect_timeout;
        }
        if other.max_concurrency != default_max_concurrency() {
            self.max_concurrency = other.max_concurrency;
        }
        if other.max_variants != default_max_variants() {
            self.max_variants = other.max_variants;
        }
        self
    }

    /// Validate generation configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("Generation model cannot be empty".to_string());
        }

        if self.base_url.is_empty() || !self.base_url.starts_with("http") {
            return Err(format!("Invalid generation base URL: {}", self.base_url));
        }

        if self.max_concurrency == 0 {
            return Err("Generation max_concurrency must be greater than 0".to_string());
        }

        if self.max_variants == 0 {
            return Err("Generation max_variants must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Build a Gemini client configuration from these settings.
    ///
    /// The API key comes from the environment, not the config file.
    pub fn to_gemini_config(&self) -> GeminiConfig {
        let mut config = GeminiConfig::from_env();
        config.base_url = self.base_url.clone();
        config.api_version = self.api_version.clone();
        config.model = self.model.clone();
        config.request_timeout = self.request_timeout;
        config.connect_timeout = self.connect_timeout;
        config
    }
}
