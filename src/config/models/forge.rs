//! Top-level service configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ForgeConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Image generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl ForgeConfig {
    /// Build a configuration from environment variables layered over
    /// the defaults.
    ///
    /// Recognized variables: `THUMBFORGE_HOST`, `THUMBFORGE_PORT` (or
    /// `PORT`), `THUMBFORGE_JWT_SECRET` (or `JWT_SECRET`),
    /// `DATABASE_URL`, and `MEDIA_ROOT`.
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("THUMBFORGE_HOST") {
            config.server.host = host;
        }

        if let Some(port) = env_first(&["THUMBFORGE_PORT", "PORT"]) {
            config.server.port = port.parse().map_err(|_| {
                crate::utils::error::ForgeError::Config(format!("Invalid port: {}", port))
            })?;
        }

        if let Some(secret) = env_first(&["THUMBFORGE_JWT_SECRET", "JWT_SECRET"]) {
            config.auth.jwt_secret = secret;
        }

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.storage.database.url = url;
        }

        if let Ok(root) = std::env::var("MEDIA_ROOT") {
            config.storage.media.root = root;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.auth = self.auth.merge(other.auth);
        self.storage = self.storage.merge(other.storage);
        self.generation = self.generation.merge(other.generation);
        self
    }
}

fn env_first(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| std::env::var(name).ok())
}
