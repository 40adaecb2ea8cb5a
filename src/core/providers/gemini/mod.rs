//! Gemini image generation provider

pub mod client;
pub mod config;
pub mod streaming;

pub use client::{GeminiClient, build_generation_request};
pub use config::{API_KEY_ENV, DEFAULT_IMAGE_MODEL, GeminiConfig};
pub use streaming::{GeminiSSEEvent, GeminiSSEParser, StreamPart, collect_images};
