//! Core domain: generation engine, prompt composition, providers

pub mod engine;
pub mod models;
pub mod prompt;
pub mod providers;
pub mod types;

pub use engine::ThumbnailEngine;
pub use models::{HistoryRecord, InputImageMeta, PublicUser, User};
pub use prompt::{PromptAnswers, compose_prompt};
pub use types::{GenerationBatch, GenerationKind, GenerationRequest, ImageData};
