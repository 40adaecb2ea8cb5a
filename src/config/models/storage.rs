//! Storage configuration for the database and media files

use super::*;
use serde::{Deserialize, Serialize};

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Generated media settings
    #[serde(default)]
    pub media: MediaConfig,
}

impl StorageConfig {
    /// Merge storage configurations
    pub fn merge(mut self, other: Self) -> Self {
        self.database = self.database.merge(other.database);
        self.media = self.media.merge(other.media);
        self
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), String> {
        self.database.validate()?;
        self.media.validate()?;
        Ok(())
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum number of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection acquire timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Merge database configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.url != default_database_url() {
            self.url = other.url;
        }
        if other.max_connections != default_max_connections() {
            self.max_connections = other.max_connections;
        }
        if other.connection_timeout != default_connection_timeout() {
            self.connection_timeout = other.connection_timeout;
        }
        self
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        if !self.url.starts_with("sqlite:") && !self.url.starts_with("postgres:") {
            return Err(format!(
                "Unsupported database URL scheme: {}. Use sqlite: or postgres:",
                self.url
            ));
        }

        if self.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Media file storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Directory where generated images are written
    #[serde(default = "default_media_root")]
    pub root: String,
    /// URL prefix under which media is served
    #[serde(default = "default_media_base_url")]
    pub base_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: default_media_root(),
            base_url: default_media_base_url(),
        }
    }
}

impl MediaConfig {
    /// Merge media configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.root != default_media_root() {
            self.root = other.root;
        }
        if other.base_url != default_media_base_url() {
            self.base_url = other.base_url;
        }
        self
    }

    /// Validate media configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.root.is_empty() {
            return Err("Media root directory cannot be empty".to_string());
        }

        if self.base_url.is_empty() || !self.base_url.starts_with('/') {
            return Err("Media base URL must start with '/'".to_string());
        }

        Ok(())
    }
}
