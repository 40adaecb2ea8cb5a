//! SDK data types
//!
//! Wire mirrors of the API payloads plus the request types callers build.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::models::{HistoryRecord, PublicUser};
use crate::core::prompt::PromptAnswers;

/// Signup request body
#[derive(Debug, Clone, Serialize)]
pub struct SignupPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Token and account returned by signup and login
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: PublicUser,
}

/// A generation request as the caller describes it
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Free-text prompt, required
    pub prompt: String,
    /// The raw prompt to record in history; defaults to `prompt`
    pub original_prompt: Option<String>,
    /// Whether the server should enhance the prompt
    pub enhance_prompt: bool,
    /// Variant count; the server applies its own default and clamp
    pub image_count: Option<u32>,
    /// Structured style answers folded into the prompt
    pub answers: PromptAnswers,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.image_count = Some(count);
        self
    }

    pub fn with_answers(mut self, answers: PromptAnswers) -> Self {
        self.answers = answers;
        self
    }
}

/// A reference image to upload with an image-to-image request
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Outcome of a generation call
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResult {
    /// Served URLs of the generated images
    pub images: Vec<String>,
    /// Number of variants the server attempted
    pub requested: u32,
    /// Number of variants that produced nothing
    pub failed: u32,
}

/// History listing response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HistoryPage {
    pub history: Vec<HistoryRecord>,
}

/// Health check response
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

/// Session-level notifications broadcast by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A call came back 401; the stored token has been cleared
    Unauthorized,
}

/// Identifier type re-exported for SDK callers
pub type HistoryId = Uuid;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_builder() {
        let request = GenerateRequest::new("a fox").with_count(2);
        assert_eq!(request.prompt, "a fox");
        assert_eq!(request.image_count, Some(2));
        assert!(!request.enhance_prompt);
    }

    #[test]
    fn test_generate_result_parses_wire_shape() {
        let result: GenerateResult = serde_json::from_str(
            r#"{"images": ["/media/a.png"], "requested": 4, "failed": 1}"#,
        )
        .unwrap();
        assert_eq!(result.images.len(), 1);
        assert_eq!(result.requested, 4);
        assert_eq!(result.failed, 1);
    }
}
