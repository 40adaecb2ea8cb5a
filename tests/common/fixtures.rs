//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible
//! defaults. All factories create real objects, not mocks.

use thumbforge::PromptAnswers;
use thumbforge::core::models::User;
use uuid::Uuid;

/// Factory for creating test accounts
pub struct AccountFactory;

impl AccountFactory {
    /// Create signup credentials with a unique email
    pub fn credentials() -> TestAccount {
        let tag = &Uuid::new_v4().to_string()[..8];
        TestAccount {
            name: format!("Test User {}", tag),
            email: format!("test-{}@example.com", tag),
            password: "a-long-enough-password".to_string(),
        }
    }

    /// Create a domain user with a placeholder password hash
    pub fn user() -> User {
        let tag = &Uuid::new_v4().to_string()[..8];
        User::new(
            format!("Test User {}", tag),
            format!("test-{}@example.com", tag),
            "hashed-password".to_string(),
        )
    }
}

/// Signup credentials for a test account
#[derive(Debug, Clone)]
pub struct TestAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Style answers a gaming-channel user would pick
pub fn gaming_answers() -> PromptAnswers {
    PromptAnswers {
        category: Some("Gaming".to_string()),
        mood: Some("Exciting".to_string()),
        primary_color: Some("Red".to_string()),
        include_text: Some("No".to_string()),
        ..PromptAnswers::default()
    }
}

/// A tiny valid PNG payload (magic bytes plus padding)
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 24]);
    bytes
}
