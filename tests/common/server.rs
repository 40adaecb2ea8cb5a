//! Listening test server
//!
//! Boots the real application stack (auth middleware, routes, storage,
//! engine) on an ephemeral port so SDK calls cross a real socket. The
//! image model is a wiremock server the caller can program.

use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tempfile::TempDir;
use thumbforge::auth::AuthSystem;
use thumbforge::config::Config;
use thumbforge::core::ThumbnailEngine;
use thumbforge::core::providers::GeminiConfig;
use thumbforge::sdk::ForgeClient;
use thumbforge::server::middleware::AuthMiddleware;
use thumbforge::server::routes::configure_routes;
use thumbforge::server::state::AppState;
use thumbforge::storage::StorageLayer;
use wiremock::MockServer;

const TEST_SECRET: &str = "Test-Secret-That-Is-At-Least-32-Characters-Long";

/// A running service instance plus the mocks it talks to
pub struct TestServer {
    /// Base URL of the listening server
    pub base_url: String,
    /// Mocked Gemini endpoint; program it before generating
    pub gemini: MockServer,
    /// Media root; dropped (and deleted) with the server
    pub media_dir: TempDir,
}

impl TestServer {
    /// Boot the full stack on an ephemeral port.
    ///
    /// Must run inside an actix system (`#[actix_web::test]`).
    pub async fn start() -> Self {
        let gemini = MockServer::start().await;
        let media_dir = TempDir::new().expect("Failed to create media dir");

        let mut config = Config::default();
        config.forge.auth.jwt_secret = TEST_SECRET.to_string();
        config.forge.storage.database.url = "sqlite::memory:".to_string();
        config.forge.storage.database.max_connections = 1;
        config.forge.storage.media.root = media_dir.path().display().to_string();

        let storage = StorageLayer::new(config.storage())
            .await
            .expect("Failed to create storage layer");
        storage.migrate().await.expect("Failed to run migrations");

        let auth = AuthSystem::new(config.auth(), Arc::new(storage.clone()));

        let gemini_config = GeminiConfig {
            api_key: Some("test-key".to_string()),
            base_url: gemini.uri(),
            request_timeout: 5,
            connect_timeout: 2,
            ..GeminiConfig::default()
        };
        let engine = ThumbnailEngine::new(gemini_config, 4).expect("Failed to create engine");

        let state = AppState::new(config, auth, engine, storage);
        let data = web::Data::new(state);

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .wrap(AuthMiddleware)
                .configure(configure_routes)
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind test server");

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        Self {
            base_url: format!("http://{}", addr),
            gemini,
            media_dir,
        }
    }

    /// SDK client pointed at this server
    pub fn client(&self) -> ForgeClient {
        ForgeClient::new(&self.base_url).expect("Failed to create client")
    }

    /// SDK client already signed up with fresh credentials
    pub async fn authenticated_client(&self) -> ForgeClient {
        let account = super::fixtures::AccountFactory::credentials();
        let client = self.client();
        client
            .signup(&account.name, &account.email, &account.password)
            .await
            .expect("Signup failed");
        client
    }
}
