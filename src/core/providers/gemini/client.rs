//! Gemini image generation client
//!
//! Thin streaming HTTP client over the generative language API. One call
//! opens one `streamGenerateContent` request; the response body is an SSE
//! stream consumed by [`super::streaming`].

use std::time::Duration;

use base64::Engine as _;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder, Response};
use serde_json::{Value, json};
use tokio::time::timeout;

use crate::core::providers::error::ProviderError;
use crate::core::types::ImageData;

use super::config::GeminiConfig;

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .build()
            .map_err(|e| ProviderError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Open one streaming generation request
    pub async fn stream_generate(
        &self,
        prompt: &str,
        reference: Option<&ImageData>,
    ) -> Result<Response, ProviderError> {
        let body = build_generation_request(prompt, reference);
        self.send_stream_request(body).await
    }

    async fn send_stream_request(&self, body: Value) -> Result<Response, ProviderError> {
        let url = self.config.get_endpoint("streamGenerateContent");
        let headers = self.build_headers();

        let response = timeout(
            Duration::from_secs(self.config.request_timeout),
            self.http_client
                .post(&url)
                .json(&body)
                .headers(headers)
                .send(),
        )
        .await
        .map_err(|_| ProviderError::timeout("Request timeout"))?
        .map_err(|e| ProviderError::network(format!("Network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.map_err(|e| {
                ProviderError::network(format!("Failed to read error response: {}", e))
            })?;
            return Err(ProviderError::from_http_status(status.as_u16(), &error_text));
        }

        Ok(response)
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

/// Build the generateContent request body.
///
/// Always one text part; a reference image travels alongside it as
/// inline base64 data. Response modalities ask for images, with text
/// allowed for the model's commentary.
pub fn build_generation_request(prompt: &str, reference: Option<&ImageData>) -> Value {
    let mut parts = vec![json!({ "text": prompt })];

    if let Some(image) = reference {
        parts.push(json!({
            "inlineData": {
                "mimeType": image.mime_type,
                "data": base64::engine::general_purpose::STANDARD.encode(&image.bytes),
            }
        }));
    }

    json!({
        "contents": [{
            "role": "user",
            "parts": parts,
        }],
        "generationConfig": {
            "responseModalities": ["IMAGE", "TEXT"],
        }
    })
}
