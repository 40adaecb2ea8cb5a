//! Image provider error handling

use thiserror::Error;

/// Errors produced by the image generation provider layer
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// Missing or invalid provider configuration
    #[error("Provider configuration error: {message}")]
    Configuration { message: String },

    /// Upstream rejected our credentials
    #[error("Provider authentication error: {message}")]
    Authentication { message: String },

    /// Upstream rate limiting
    #[error("Provider rate limit: {message}")]
    RateLimit {
        message: String,
        retry_after: Option<u64>,
    },

    /// Upstream rejected the request payload
    #[error("Invalid provider request: {message}")]
    InvalidRequest { message: String },

    /// Generic upstream API error
    #[error("Provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure
    #[error("Provider network error: {message}")]
    Network { message: String },

    /// Request exceeded its deadline
    #[error("Provider timeout: {message}")]
    Timeout { message: String },

    /// Upstream reported itself unavailable
    #[error("Provider unavailable: {message}")]
    Unavailable { message: String },

    /// Response payload could not be understood
    #[error("Provider response parse error: {message}")]
    Parse { message: String },

    /// Stream broke mid-generation
    #[error("Provider stream error: {message}")]
    Stream { message: String },
}

impl ProviderError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn rate_limit(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            message: message.into(),
            retry_after,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream {
            message: message.into(),
        }
    }

    /// Map an HTTP error status plus response body to a provider error
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            400 => Self::invalid_request(format!("Bad request: {}", body)),
            401 => Self::authentication("Invalid or missing API key"),
            403 => Self::authentication("Forbidden: insufficient permissions"),
            404 => Self::api(404, "Model or endpoint not found"),
            429 => Self::rate_limit("Rate limit exceeded", extract_retry_after(body)),
            500..=599 => Self::unavailable(format!("Server error ({}): {}", status, body)),
            _ => Self::api(status, body),
        }
    }

    /// Map an error object embedded in an API response body
    pub fn from_api_response(response: &serde_json::Value) -> Self {
        if let Some(error) = response.get("error") {
            let code = error.get("code").and_then(|c| c.as_u64()).unwrap_or(500) as u16;
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error");
            let status = error.get("status").and_then(|s| s.as_str()).unwrap_or("");

            return match (code, status) {
                (401, _) | (_, "UNAUTHENTICATED") => Self::authentication(message),
                (403, _) | (_, "PERMISSION_DENIED") => Self::authentication(message),
                (400, _) | (_, "INVALID_ARGUMENT") => Self::invalid_request(message),
                (429, _) | (_, "RESOURCE_EXHAUSTED") => {
                    Self::rate_limit(message, error.get("retry_after").and_then(|r| r.as_u64()))
                }
                (503, _) | (_, "UNAVAILABLE") => Self::unavailable(message),
                _ => Self::api(code, message),
            };
        }

        Self::api(500, "Unknown API error")
    }
}

fn extract_retry_after(body: &str) -> Option<u64> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
    if let Some(error) = json.get("error") {
        if let Some(retry_after) = error.get("retry_after") {
            return retry_after.as_u64();
        }
    }
    json.get("retry_after").and_then(|r| r.as_u64())
}
