//! Integration test for the assembled storage layer

use tempfile::TempDir;
use thumbforge::config::StorageConfig;
use thumbforge::core::types::ImageData;
use thumbforge::storage::StorageLayer;

fn test_storage_config(media_dir: &TempDir) -> StorageConfig {
    let mut config = StorageConfig::default();
    config.database.url = "sqlite::memory:".to_string();
    config.database.max_connections = 1;
    config.media.root = media_dir.path().display().to_string();
    config
}

#[tokio::test]
async fn test_storage_layer_initializes_and_reports_healthy() {
    let media_dir = TempDir::new().unwrap();
    let storage = StorageLayer::new(&test_storage_config(&media_dir))
        .await
        .expect("Should create storage layer");
    storage.migrate().await.expect("Migrations should run");

    let health = storage.health_check().await.unwrap();
    assert!(health.database);
    assert!(health.media);
    assert!(health.overall);
}

#[tokio::test]
async fn test_media_store_round_trip_through_layer() {
    let media_dir = TempDir::new().unwrap();
    let storage = StorageLayer::new(&test_storage_config(&media_dir))
        .await
        .unwrap();

    let image = ImageData::from_bytes(vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    let stored = storage.media().store(&image).await.unwrap();
    assert!(stored.filename.ends_with(".png"));
    assert!(stored.url.starts_with("/media/"));

    let (bytes, mime) = storage.media().get(&stored.filename).await.unwrap();
    assert_eq!(bytes, image.bytes);
    assert_eq!(mime, "image/png");
}
