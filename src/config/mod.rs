//! Configuration management for the service
//!
//! This module handles loading, validation, and management of all service
//! configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{ForgeError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Service configuration
    pub forge: ForgeConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ForgeError::Config(format!("Failed to read config file: {}", e)))?;

        let forge: ForgeConfig = serde_yaml::from_str(&content)
            .map_err(|e| ForgeError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { forge };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let forge = ForgeConfig::from_env()?;
        let config = Self { forge };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.forge.server
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.forge.auth
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.forge.storage
    }

    /// Get generation configuration
    pub fn generation(&self) -> &GenerationConfig {
        &self.forge.generation
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.forge
            .server
            .validate()
            .map_err(|e| ForgeError::Config(format!("Server config error: {}", e)))?;

        self.forge
            .auth
            .validate()
            .map_err(|e| ForgeError::Config(format!("Auth config error: {}", e)))?;

        self.forge
            .server
            .cors
            .validate()
            .map_err(|e| ForgeError::Config(format!("CORS config error: {}", e)))?;

        self.forge
            .storage
            .validate()
            .map_err(|e| ForgeError::Config(format!("Storage config error: {}", e)))?;

        self.forge
            .generation
            .validate()
            .map_err(|e| ForgeError::Config(format!("Generation config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.forge = self.forge.merge(other.forge);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.forge)
            .map_err(|e| ForgeError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
