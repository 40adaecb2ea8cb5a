//! ThumbForge - thumbnail generation service
//!
//! Async HTTP service for multi-variant thumbnail generation

#![allow(missing_docs)]

use std::process::ExitCode;
use thumbforge::server;
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up GEMINI_API_KEY and friends from a local .env, if present
    dotenvy::dotenv().ok();

    // Initialize logging system
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    // Start server (auto-loads config/thumbforge.yaml)
    match server::builder::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
