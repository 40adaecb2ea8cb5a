//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{ForgeError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ForgeError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("🚀 Starting ThumbForge");

    // Auto-load configuration file, fall back to environment variables
    let config_path = "config/thumbforge.yaml";
    info!("📄 Loading configuration file: {}", config_path);

    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("✅ Configuration file loaded successfully");
            config
        }
        Err(e) => {
            info!(
                "⚠️  Configuration file loading failed, using environment config: {}",
                e
            );
            Config::from_env()?
        }
    };

    // Create and start server
    let server = HttpServer::new(&config).await?;
    info!(
        "🌐 Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("📋 API Endpoints:");
    info!("   GET    /health - Health check");
    info!("   POST   /api/signup - Create an account");
    info!("   POST   /api/login - Log in");
    info!("   POST   /api/generate - Generate thumbnails from a prompt");
    info!("   POST   /api/generate-from-image - Generate thumbnails from a reference image");
    info!("   GET    /api/history - List generation history");
    info!("   DELETE /api/history - Clear generation history");
    info!("   DELETE /api/history/{{id}} - Delete one history item");
    info!("   GET    /media/{{filename}} - Serve a generated image");

    server.start().await
}
