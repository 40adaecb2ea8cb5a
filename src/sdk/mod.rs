//! Client SDK
//!
//! A typed client for the ThumbForge API: auth, generation with
//! single-flight cancellation, history, and media download. Errors are
//! normalized to message + status, with status 0 for transport failures.

pub mod client;
pub mod errors;
pub mod types;

// Re-exports for convenience
pub use client::ForgeClient;
pub use errors::{NETWORK_ERROR_MESSAGE, SdkError, SdkResult};
pub use types::{
    AuthSession, GenerateRequest, GenerateResult, HealthStatus, HistoryId, ImageAttachment,
    SessionEvent,
};
