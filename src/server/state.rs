//! Application state shared across HTTP handlers

use crate::config::Config;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across worker
/// threads.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication system
    pub auth: Arc<crate::auth::AuthSystem>,
    /// Image generation engine
    pub engine: Arc<crate::core::ThumbnailEngine>,
    /// Storage layer
    pub storage: Arc<crate::storage::StorageLayer>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Config,
        auth: crate::auth::AuthSystem,
        engine: crate::core::ThumbnailEngine,
        storage: crate::storage::StorageLayer,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            engine: Arc::new(engine),
            storage: Arc::new(storage),
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
