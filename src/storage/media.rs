//! Local storage for generated images
//!
//! Generated images land in a flat directory under random UUID names and
//! are served back by filename.

use crate::config::MediaConfig;
use crate::core::types::{ImageData, detect_image_mime};
use crate::utils::error::{ForgeError, Result};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

/// A stored media file and its public URL
#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub filename: String,
    pub url: String,
}

/// Local media storage
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    base_url: String,
}

impl MediaStore {
    /// Create a new media store instance
    pub async fn new(config: &MediaConfig) -> Result<Self> {
        let root = PathBuf::from(&config.root);

        // Create directory if it doesn't exist
        if !root.exists() {
            fs::create_dir_all(&root).await.map_err(|e| {
                ForgeError::MediaStorage(format!("Failed to create media directory: {}", e))
            })?;
        }

        info!("Media storage initialized at: {}", root.display());
        Ok(Self {
            root,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Store a generated image under a fresh UUID filename
    pub async fn store(&self, image: &ImageData) -> Result<StoredMedia> {
        let filename = format!("{}.{}", Uuid::new_v4(), image.extension());
        let path = self.root.join(&filename);

        fs::write(&path, &image.bytes)
            .await
            .map_err(|e| ForgeError::MediaStorage(format!("Failed to write file: {}", e)))?;

        debug!("Stored media file: {} ({} bytes)", filename, image.len());
        Ok(StoredMedia {
            url: self.url_for(&filename),
            filename,
        })
    }

    /// Retrieve a stored file's bytes and content type
    pub async fn get(&self, filename: &str) -> Result<(Vec<u8>, String)> {
        validate_filename(filename)?;

        let path = self.root.join(filename);
        if !path.exists() {
            return Err(ForgeError::not_found(format!(
                "Media file not found: {}",
                filename
            )));
        }

        let content = fs::read(&path)
            .await
            .map_err(|e| ForgeError::MediaStorage(format!("Failed to read file: {}", e)))?;

        let mime = detect_image_mime(&content).to_string();
        Ok((content, mime))
    }

    /// Delete a stored file
    pub async fn delete(&self, filename: &str) -> Result<()> {
        validate_filename(filename)?;

        let path = self.root.join(filename);
        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| ForgeError::MediaStorage(format!("Failed to delete file: {}", e)))?;
        }

        debug!("Deleted media file: {}", filename);
        Ok(())
    }

    /// Public URL for a stored filename
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", self.base_url, filename)
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(ForgeError::MediaStorage(
                "Media directory does not exist".to_string(),
            ));
        }

        // Try to write a test file
        let test_file = self.root.join(".health_check");
        fs::write(&test_file, b"health_check")
            .await
            .map_err(|e| ForgeError::MediaStorage(format!("Media directory not writable: {}", e)))?;

        let _ = fs::remove_file(&test_file).await;

        Ok(())
    }
}

/// Calculate an entity tag for a file's content
pub fn content_etag(content: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("\"{}\"", hex::encode(hasher.finalize()))
}

/// Reject names that could escape the media directory
fn validate_filename(filename: &str) -> Result<()> {
    let safe = !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains('/')
        && !filename.contains('\\')
        && filename
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');

    if !safe {
        return Err(ForgeError::bad_request(format!(
            "Invalid media filename: {}",
            filename
        )));
    }

    Ok(())
}
