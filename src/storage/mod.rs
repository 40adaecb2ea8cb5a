//! Storage layer
//!
//! Data persistence for accounts, generation history, and media files.

/// Database storage module
pub mod database;
/// Media file storage module
pub mod media;

pub use media::{MediaStore, StoredMedia, content_etag};

use crate::config::StorageConfig;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main storage layer that orchestrates all storage backends
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database connection pool
    pub database: Arc<database::Database>,
    /// Media file storage
    pub media: Arc<media::MediaStore>,
}

impl StorageLayer {
    /// Create a new storage layer
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        debug!("Connecting to database");
        let database = Arc::new(database::Database::new(&config.database).await?);

        debug!("Initializing media storage");
        let media = Arc::new(media::MediaStore::new(&config.media).await?);

        info!("Storage layer initialized successfully");

        Ok(Self { database, media })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        self.database.migrate().await
    }

    /// Health check for all storage backends
    pub async fn health_check(&self) -> Result<StorageHealthStatus> {
        let mut status = StorageHealthStatus {
            database: false,
            media: false,
            overall: false,
        };

        match self.database.health_check().await {
            Ok(_) => status.database = true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
            }
        }

        match self.media.health_check().await {
            Ok(_) => status.media = true,
            Err(e) => {
                warn!("Media storage health check failed: {}", e);
            }
        }

        status.overall = status.database && status.media;

        Ok(status)
    }

    /// Get database pool
    pub fn db(&self) -> &database::Database {
        &self.database
    }

    /// Get media storage
    pub fn media(&self) -> &media::MediaStore {
        &self.media
    }
}

/// Storage health status
#[derive(Debug, Clone, serde::Serialize)]
pub struct StorageHealthStatus {
    /// Database health status
    pub database: bool,
    /// Media storage health status
    pub media: bool,
    /// Overall health status
    pub overall: bool,
}
