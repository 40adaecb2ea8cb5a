//! Configuration data models
//!
//! This module defines all configuration structures used throughout the
//! service.

#![allow(missing_docs)]

pub mod auth;
pub mod forge;
pub mod generation;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use auth::*;
pub use forge::*;
pub use generation::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

pub fn default_true() -> bool {
    true
}

/// Default JWT lifetime in seconds
pub fn default_jwt_expiration() -> u64 {
    86400 // 24 hours
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    30
}

pub fn default_database_url() -> String {
    "sqlite://thumbforge.db?mode=rwc".to_string()
}

pub fn default_media_root() -> String {
    "data/media".to_string()
}

pub fn default_media_base_url() -> String {
    "/media".to_string()
}

pub fn default_generation_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

pub fn default_api_version() -> String {
    "v1beta".to_string()
}

pub fn default_generation_model() -> String {
    crate::core::providers::gemini::DEFAULT_IMAGE_MODEL.to_string()
}

/// Default whole-request timeout for generation calls in seconds
pub fn default_generation_timeout() -> u64 {
    600
}

pub fn default_connect_timeout() -> u64 {
    10
}

/// Default cap on concurrent variant requests
pub fn default_max_concurrency() -> usize {
    4
}

/// Default maximum variants per generation request
pub fn default_max_variants() -> u32 {
    4
}
