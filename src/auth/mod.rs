//! Authentication system
//!
//! Account signup and login, password hashing, and JWT session tokens.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtHandler};
pub use password::{hash_password, verify_password};

use crate::config::AuthConfig;
use crate::core::models::User;
use crate::storage::StorageLayer;
use crate::utils::error::{ForgeError, Result};
use crate::utils::is_valid_email;
use std::sync::Arc;
use tracing::{debug, info};

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Main authentication system
#[derive(Clone)]
pub struct AuthSystem {
    /// Storage layer for user data
    storage: Arc<StorageLayer>,
    /// JWT handler
    jwt: Arc<JwtHandler>,
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, storage: Arc<StorageLayer>) -> Self {
        info!("Initializing authentication system");

        Self {
            storage,
            jwt: Arc::new(JwtHandler::new(config)),
        }
    }

    /// Register a new account and issue a session token
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<(User, String)> {
        let name = name.trim();
        let email = email.trim().to_lowercase();

        validate_signup(name, &email, password)?;

        if self.storage.db().find_user_by_email(&email).await?.is_some() {
            return Err(ForgeError::conflict(
                "An account with this email already exists",
            ));
        }

        let password_hash = password::hash_password(password)?;
        let user = self
            .storage
            .db()
            .create_user(&User::new(name, email, password_hash))
            .await?;

        let token = self.jwt.create_token(user.id)?;

        info!("Registered new account: {}", user.id);
        Ok((user, token))
    }

    /// Authenticate an existing account and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let email = email.trim().to_lowercase();
        debug!("Login attempt for: {}", email);

        // Same error for unknown email and bad password
        let user = self
            .storage
            .db()
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| ForgeError::auth("Invalid email or password"))?;

        if !password::verify_password(password, &user.password_hash)? {
            return Err(ForgeError::auth("Invalid email or password"));
        }

        let token = self.jwt.create_token(user.id)?;

        info!("User logged in: {}", user.id);
        Ok((user, token))
    }

    /// Verify a bearer token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.jwt.verify_token(token)
    }

    /// Get JWT handler
    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }
}

fn validate_signup(name: &str, email: &str, password: &str) -> Result<()> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ForgeError::validation(
            "Name, email and password are required",
        ));
    }

    if !is_valid_email(email) {
        return Err(ForgeError::validation("Invalid email address"));
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ForgeError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(())
}
