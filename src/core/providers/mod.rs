//! Image model providers

pub mod error;
pub mod gemini;

pub use error::ProviderError;
pub use gemini::{GeminiClient, GeminiConfig};
