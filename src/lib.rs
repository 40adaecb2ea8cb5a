//! # ThumbForge
//!
//! A thumbnail generation service backed by streaming image models.
//! One prompt fans out into several concurrent variants against the
//! Gemini image API; results are stored, served, and recorded per
//! account.
//!
//! ## Features
//!
//! - **Multi-Variant Generation**: One request, up to four concurrent
//!   image variants, aggregated as they settle
//! - **Prompt Composition**: Structured style answers folded into a
//!   single generation prompt
//! - **Image-to-Image**: Modify an uploaded reference image instead of
//!   starting from text
//! - **Accounts and History**: JWT sessions, Argon2 password hashes,
//!   per-account generation history
//! - **Typed Client SDK**: The web client's HTTP layer as a Rust API,
//!   with normalized errors and single-flight cancellation
//!
//! ## Server Mode
//!
//! ```rust,no_run
//! use thumbforge::{Config, Forge};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/thumbforge.yaml").await?;
//!     let forge = Forge::new(config).await?;
//!     forge.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## SDK Mode
//!
//! ```rust,no_run
//! use thumbforge::sdk::{ForgeClient, GenerateRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ForgeClient::new("http://localhost:8000")?;
//!     client.login("ada@example.com", "hunter2-but-longer").await?;
//!
//!     let result = client
//!         .generate(&GenerateRequest::new("A neon racing thumbnail").with_count(2))
//!         .await?;
//!
//!     for url in &result.images {
//!         println!("stored at {}", url);
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod auth;
pub mod config;
pub mod core;
pub mod sdk;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{ForgeError, Result};

// Export the generation core
pub use core::{
    GenerationBatch, GenerationKind, GenerationRequest, ImageData, PromptAnswers, ThumbnailEngine,
    compose_prompt,
};

// Export domain models
pub use core::models::{HistoryRecord, InputImageMeta, PublicUser, User};

// Export the client SDK surface
pub use sdk::{ForgeClient, GenerateRequest, GenerateResult, SdkError, SessionEvent};

use tracing::info;

/// The assembled service: configuration plus a ready HTTP server
pub struct Forge {
    config: Config,
    server: server::server::HttpServer,
}

impl Forge {
    /// Create a new service instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new service instance");

        let server = server::server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the service
    pub async fn run(self) -> Result<()> {
        info!("Starting ThumbForge");
        info!(
            "Listening on {}, media under {}",
            self.config.server().address(),
            self.config.storage().media.root
        );

        self.server.start().await?;

        Ok(())
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, "thumbforge");
        assert!(!DESCRIPTION.is_empty());
    }
}
