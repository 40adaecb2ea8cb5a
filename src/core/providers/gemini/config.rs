//! Gemini image model configuration

use crate::core::providers::error::ProviderError;

/// Image model used for thumbnail generation
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Environment variable holding the API key.
///
/// The key is read from the process environment only, never from the
/// config file on disk.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Connection settings for the Gemini generative language API
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` makes every generation call fail fast
    pub api_key: Option<String>,
    /// Base URL
    pub base_url: String,
    /// API version path segment
    pub api_version: String,
    /// Model name
    pub model: String,
    /// Whole-request timeout in seconds
    pub request_timeout: u64,
    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

impl GeminiConfig {
    /// Create a config with the given API key and stock defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Build from the process environment.
    ///
    /// A missing key is not an error here; generation calls check
    /// `is_configured` and refuse to start work without one.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// Whether a usable API key is present
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Full endpoint URL for the given operation
    pub fn get_endpoint(&self, operation: &str) -> String {
        let key = self.api_key.as_deref().unwrap_or("");
        match operation {
            // Streaming answers arrive as SSE only when alt=sse is set
            "streamGenerateContent" => format!(
                "{}/{}/models/{}:streamGenerateContent?alt=sse&key={}",
                self.base_url, self.api_version, self.model, key
            ),
            _ => format!(
                "{}/{}/models/{}:{}?key={}",
                self.base_url, self.api_version, self.model, operation, key
            ),
        }
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.model.is_empty() {
            return Err(ProviderError::configuration("Model name must not be empty"));
        }
        if self.request_timeout == 0 {
            return Err(ProviderError::configuration(
                "Request timeout must be greater than 0",
            ));
        }
        if self.connect_timeout == 0 {
            return Err(ProviderError::configuration(
                "Connect timeout must be greater than 0",
            ));
        }
        if self.connect_timeout > self.request_timeout {
            return Err(ProviderError::configuration(
                "Connect timeout cannot be greater than request timeout",
            ));
        }
        Ok(())
    }

    /// Config pointed at a local test server, with short timeouts
    #[cfg(test)]
    pub fn new_test(base_url: impl Into<String>) -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            base_url: base_url.into(),
            request_timeout: 5,
            connect_timeout: 2,
            ..Self::default()
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_version: "v1beta".to_string(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            request_timeout: 600,
            connect_timeout: 10,
        }
    }
}
