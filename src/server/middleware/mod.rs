//! HTTP middleware implementations

mod auth;
mod helpers;

// Re-export all middleware
pub use auth::{AuthMiddleware, AuthMiddlewareService, AuthenticatedUser, authenticated_user};
pub use helpers::{extract_bearer_token, is_public_route};
