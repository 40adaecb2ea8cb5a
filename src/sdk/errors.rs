//! SDK error normalization
//!
//! Every failure a call can hit is flattened into one message + status
//! pair. Status 0 means the request never got an HTTP response.
//! Cancellation is its own variant, not an error state.

use serde_json::Value;

/// Fixed message for failures that never produced an HTTP response
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Fallback message when an error body carries no usable text
const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Result type for SDK calls
pub type SdkResult<T> = std::result::Result<T, SdkError>;

/// Normalized outcome of a failed SDK call
#[derive(Debug, Clone, thiserror::Error)]
pub enum SdkError {
    /// The call failed with a message and the HTTP status that produced
    /// it; status 0 means no response was received at all
    #[error("{message}")]
    Api { message: String, status: u16 },
    /// The generation was superseded by a newer one or cancelled
    /// explicitly
    #[error("generation cancelled")]
    Cancelled,
}

impl SdkError {
    pub fn api(message: impl Into<String>, status: u16) -> Self {
        Self::Api {
            message: message.into(),
            status,
        }
    }

    /// Whether this outcome is a cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status of the failure; 0 for no-response failures and
    /// cancellations
    pub fn status(&self) -> u16 {
        match self {
            Self::Api { status, .. } => *status,
            Self::Cancelled => 0,
        }
    }

    /// Normalized message
    pub fn message(&self) -> &str {
        match self {
            Self::Api { message, .. } => message,
            Self::Cancelled => "generation cancelled",
        }
    }

    /// Normalize a transport-level failure (no HTTP response)
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        let message = if error.is_builder() || error.is_decode() {
            error.to_string()
        } else {
            NETWORK_ERROR_MESSAGE.to_string()
        };
        Self::Api { message, status: 0 }
    }

    /// Normalize an HTTP error response, preferring the body's error
    /// fields over a generic message
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let message = match response.json::<Value>().await {
            Ok(body) => extract_message(&body),
            Err(_) => GENERIC_ERROR_MESSAGE.to_string(),
        };
        Self::Api { message, status }
    }
}

/// Pull the most specific message out of an error body
fn extract_message(body: &Value) -> String {
    if let Some(message) = body.pointer("/error/message").and_then(Value::as_str) {
        return message.to_string();
    }
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return message.to_string();
    }
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return message.to_string();
    }
    GENERIC_ERROR_MESSAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_message_prefers_nested_error() {
        let body = json!({"error": {"code": "NOT_FOUND", "message": "History item not found"}});
        assert_eq!(extract_message(&body), "History item not found");
    }

    #[test]
    fn test_extract_message_accepts_flat_shapes() {
        assert_eq!(extract_message(&json!({"error": "boom"})), "boom");
        assert_eq!(extract_message(&json!({"message": "boom"})), "boom");
    }

    #[test]
    fn test_extract_message_falls_back() {
        assert_eq!(
            extract_message(&json!({"weird": true})),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(extract_message(&json!([1, 2, 3])), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_cancelled_is_not_an_api_error() {
        let error = SdkError::Cancelled;
        assert!(error.is_cancelled());
        assert_eq!(error.status(), 0);

        let error = SdkError::api("boom", 500);
        assert!(!error.is_cancelled());
        assert_eq!(error.status(), 500);
        assert_eq!(error.message(), "boom");
    }
}
