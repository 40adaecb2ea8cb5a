//! Request and response types for auth endpoints

use crate::core::models::PublicUser;
use serde::{Deserialize, Serialize};

/// Signup request payload
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Plain text password
    pub password: String,
}

/// Login request payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plain text password
    pub password: String,
}

/// Successful authentication response
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// The authenticated account
    pub user: PublicUser,
}
