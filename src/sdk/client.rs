//! Typed API client
//!
//! The Rust counterpart of the web client's HTTP layer: bearer-token
//! handling, normalized errors, session events, and single-flight
//! generation with explicit cancellation.

use parking_lot::{Mutex, RwLock};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, oneshot};
use tracing::{debug, warn};
use url::Url;

use crate::core::models::HistoryRecord;
use crate::sdk::errors::{SdkError, SdkResult};
use crate::sdk::types::{
    AuthSession, GenerateRequest, GenerateResult, HealthStatus, HistoryId, HistoryPage,
    ImageAttachment, LoginPayload, SessionEvent, SignupPayload,
};

/// Default whole-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Shorter timeout for media downloads
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(15);
/// Session event channel capacity
const EVENT_CAPACITY: usize = 16;

/// Variant count sent when the caller leaves it unset
const DEFAULT_TEXT_VARIANTS: u32 = 4;
const DEFAULT_IMAGE_VARIANTS: u32 = 1;

/// Handle to the in-flight generation, if any
struct GenerationSlot {
    id: u64,
    cancel: oneshot::Sender<()>,
}

/// API client
///
/// Holds the session token in memory and allows at most one generation
/// in flight; starting a new one cancels the previous. Wrap in `Arc` to
/// share across tasks.
pub struct ForgeClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
    events: broadcast::Sender<SessionEvent>,
    generation: Mutex<Option<GenerationSlot>>,
    generation_id: AtomicU64,
}

impl ForgeClient {
    /// Create a client for the given server base URL
    pub fn new(base_url: impl AsRef<str>) -> SdkResult<Self> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| SdkError::api(format!("Invalid base URL: {}", e), 0))?;

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| SdkError::api(format!("Failed to create HTTP client: {}", e), 0))?;

        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        debug!("ForgeClient created for {}", base_url);

        Ok(Self {
            http,
            base_url,
            token: RwLock::new(None),
            events,
            generation: Mutex::new(None),
            generation_id: AtomicU64::new(0),
        })
    }

    /// Server base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Current session token, if logged in
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Install a previously saved session token
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Whether a session token is present
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Drop the stored session token
    pub fn logout(&self) {
        *self.token.write() = None;
    }

    /// Subscribe to session events
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Create an account; the returned token is stored for later calls
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> SdkResult<AuthSession> {
        let payload = SignupPayload {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let session: AuthSession = self
            .send_json(self.request(Method::POST, "/api/signup")?.json(&payload))
            .await?;

        *self.token.write() = Some(session.token.clone());
        Ok(session)
    }

    /// Log in; the returned token is stored for later calls
    pub async fn login(&self, email: &str, password: &str) -> SdkResult<AuthSession> {
        let payload = LoginPayload {
            email: email.to_string(),
            password: password.to_string(),
        };

        let session: AuthSession = self
            .send_json(self.request(Method::POST, "/api/login")?.json(&payload))
            .await?;

        *self.token.write() = Some(session.token.clone());
        Ok(session)
    }

    /// Generate thumbnails from a text prompt.
    ///
    /// Starting a new generation cancels the previous one; the older
    /// call resolves as `SdkError::Cancelled`.
    pub async fn generate(&self, request: &GenerateRequest) -> SdkResult<GenerateResult> {
        let form = generation_form(request, DEFAULT_TEXT_VARIANTS);
        self.run_generation("/api/generate", form).await
    }

    /// Generate thumbnails from a reference image plus a prompt
    pub async fn generate_from_image(
        &self,
        request: &GenerateRequest,
        image: ImageAttachment,
    ) -> SdkResult<GenerateResult> {
        let form = generation_form(request, DEFAULT_IMAGE_VARIANTS)
            .part("image", Part::bytes(image.bytes).file_name(image.filename));
        self.run_generation("/api/generate-from-image", form).await
    }

    /// Cancel the in-flight generation, if any
    pub fn cancel_generation(&self) -> bool {
        match self.generation.lock().take() {
            Some(slot) => {
                let _ = slot.cancel.send(());
                true
            }
            None => false,
        }
    }

    /// List the account's generation history, newest first
    pub async fn history(&self) -> SdkResult<Vec<HistoryRecord>> {
        let page: HistoryPage = self
            .send_json(self.request(Method::GET, "/api/history")?)
            .await?;
        Ok(page.history)
    }

    /// Delete one history item
    pub async fn delete_history_item(&self, id: HistoryId) -> SdkResult<()> {
        let path = format!("/api/history/{}", id);
        self.send_no_content(self.request(Method::DELETE, &path)?)
            .await
    }

    /// Clear the account's entire history
    pub async fn clear_history(&self) -> SdkResult<()> {
        self.send_no_content(self.request(Method::DELETE, "/api/history")?)
            .await
    }

    /// Server health check
    pub async fn health(&self) -> SdkResult<HealthStatus> {
        self.send_json(self.request(Method::GET, "/health")?).await
    }

    /// Fetch stored media bytes by their served URL (absolute or relative)
    pub async fn download(&self, url: &str) -> SdkResult<Vec<u8>> {
        let absolute = self
            .base_url
            .join(url)
            .map_err(|e| SdkError::api(format!("Invalid media URL: {}", e), 0))?;

        let response = self
            .http
            .get(absolute)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await
            .map_err(SdkError::from_transport)?;

        let response = self.check(response).await?;
        let bytes = response.bytes().await.map_err(SdkError::from_transport)?;
        Ok(bytes.to_vec())
    }

    /// Run one generation under the single-flight slot
    async fn run_generation(&self, path: &str, form: Form) -> SdkResult<GenerateResult> {
        let id = self.generation_id.fetch_add(1, Ordering::Relaxed);
        let (cancel_tx, cancel_rx) = oneshot::channel();

        if let Some(previous) = self.generation.lock().replace(GenerationSlot {
            id,
            cancel: cancel_tx,
        }) {
            debug!("superseding in-flight generation {}", previous.id);
            let _ = previous.cancel.send(());
        }

        let call = async {
            let builder = self.request(Method::POST, path)?.multipart(form);
            self.send_json::<GenerateResult>(builder).await
        };

        let result = tokio::select! {
            _ = cancel_rx => Err(SdkError::Cancelled),
            result = call => result,
        };

        // Only clear the slot if it is still ours
        let mut slot = self.generation.lock();
        if slot.as_ref().is_some_and(|s| s.id == id) {
            *slot = None;
        }
        drop(slot);

        result
    }

    /// Build a request with the stored bearer token attached
    fn request(&self, method: Method, path: &str) -> SdkResult<reqwest::RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| SdkError::api(format!("Invalid request path: {}", e), 0))?;

        let mut builder = self.http.request(method, url);
        let token = self.token.read().clone();
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Send and parse a JSON response
    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> SdkResult<T> {
        let response = builder.send().await.map_err(SdkError::from_transport)?;
        let response = self.check(response).await?;
        response.json().await.map_err(SdkError::from_transport)
    }

    /// Send a request whose success response carries no body
    async fn send_no_content(&self, builder: reqwest::RequestBuilder) -> SdkResult<()> {
        let response = builder.send().await.map_err(SdkError::from_transport)?;
        self.check(response).await?;
        Ok(())
    }

    /// Turn error responses into normalized errors; a 401 also resets
    /// the session
    async fn check(&self, response: reqwest::Response) -> SdkResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("session rejected by server, clearing stored token");
            self.reset_session();
        }

        Err(SdkError::from_response(response).await)
    }

    /// Clear the token and tell subscribers the session is gone
    fn reset_session(&self) {
        *self.token.write() = None;
        let _ = self.events.send(SessionEvent::Unauthorized);
    }
}

/// Build the multipart form both generation endpoints share
fn generation_form(request: &GenerateRequest, default_count: u32) -> Form {
    let mut form = Form::new()
        .text("prompt", request.prompt.clone())
        .text(
            "originalPrompt",
            request
                .original_prompt
                .clone()
                .unwrap_or_else(|| request.prompt.clone()),
        )
        .text("enhancePrompt", request.enhance_prompt.to_string())
        .text(
            "imageCount",
            request.image_count.unwrap_or(default_count).to_string(),
        );

    let answers = &request.answers;
    if let Some(value) = &answers.category {
        form = form.text("category", value.clone());
    }
    if let Some(value) = &answers.mood {
        form = form.text("mood", value.clone());
    }
    if let Some(value) = &answers.theme {
        form = form.text("theme", value.clone());
    }
    if let Some(value) = &answers.primary_color {
        form = form.text("primaryColor", value.clone());
    }
    if let Some(value) = &answers.include_text {
        form = form.text("includeText", value.clone());
    }
    if let Some(value) = &answers.text_style {
        form = form.text("textStyle", value.clone());
    }
    if let Some(value) = &answers.thumbnail_style {
        form = form.text("thumbnailStyle", value.clone());
    }
    if let Some(value) = &answers.custom_prompt {
        form = form.text("customPrompt", value.clone());
    }

    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::errors::NETWORK_ERROR_MESSAGE;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn auth_body(token: &str) -> serde_json::Value {
        json!({
            "token": token,
            "user": {
                "id": "7a1c02f4-5c6b-40b2-b6bb-1787be84a777",
                "name": "Ada",
                "email": "ada@example.com"
            }
        })
    }

    #[tokio::test]
    async fn test_login_stores_token_and_sends_it() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("tok-123")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/history"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"history": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ForgeClient::new(server.uri()).unwrap();
        let session = client.login("ada@example.com", "longenough").await.unwrap();

        assert_eq!(session.token, "tok-123");
        assert_eq!(client.token().as_deref(), Some("tok-123"));

        let history = client.history().await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token_and_broadcasts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/history"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"code": "UNAUTHORIZED", "message": "Invalid or expired token"}
            })))
            .mount(&server)
            .await;

        let client = ForgeClient::new(server.uri()).unwrap();
        client.set_token("stale-token");
        let mut events = client.events();

        let error = client.history().await.unwrap_err();
        assert_eq!(error.status(), 401);
        assert_eq!(error.message(), "Invalid or expired token");
        assert!(!client.is_authenticated());
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Unauthorized);
    }

    #[tokio::test]
    async fn test_transport_failure_is_status_zero() {
        // Nothing listens on this port
        let client = ForgeClient::new("http://127.0.0.1:9").unwrap();

        let error = client.health().await.unwrap_err();
        assert_eq!(error.status(), 0);
        assert_eq!(error.message(), NETWORK_ERROR_MESSAGE);
        assert!(!error.is_cancelled());
    }

    #[tokio::test]
    async fn test_error_body_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"code": "AUTH_ERROR", "message": "Invalid email or password"}
            })))
            .mount(&server)
            .await;

        let client = ForgeClient::new(server.uri()).unwrap();
        let error = client.login("ada@example.com", "wrong").await.unwrap_err();

        assert_eq!(error.status(), 401);
        assert_eq!(error.message(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_new_generation_cancels_previous() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"images": [], "requested": 1, "failed": 1}))
                    .set_delay(Duration::from_millis(250)),
            )
            .mount(&server)
            .await;

        let client = Arc::new(ForgeClient::new(server.uri()).unwrap());

        let first = {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client
                    .generate(&GenerateRequest::new("slow one").with_count(1))
                    .await
            })
        };
        // Let the first request reach the wire before superseding it
        tokio::time::sleep(Duration::from_millis(50)).await;

        let second = client
            .generate(&GenerateRequest::new("newer one").with_count(1))
            .await;

        let first = first.await.unwrap();
        assert!(first.unwrap_err().is_cancelled());
        assert_eq!(second.unwrap().failed, 1);
    }

    #[tokio::test]
    async fn test_cancel_generation_aborts_in_flight() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"images": [], "requested": 1, "failed": 0}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = Arc::new(ForgeClient::new(server.uri()).unwrap());

        let task = {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.generate(&GenerateRequest::new("doomed")).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(client.cancel_generation());
        assert!(task.await.unwrap().unwrap_err().is_cancelled());

        // Nothing left to cancel
        assert!(!client.cancel_generation());
    }

    #[tokio::test]
    async fn test_logout_drops_token() {
        let client = ForgeClient::new("http://localhost:8000").unwrap();
        client.set_token("tok");
        assert!(client.is_authenticated());

        client.logout();
        assert!(!client.is_authenticated());
        assert_eq!(client.token(), None);
    }
}
