//! Gemini streaming response handling
//!
//! Parses the SSE body of a `streamGenerateContent` response and pulls
//! inline image data out of each event.

use base64::Engine as _;
use futures_util::StreamExt;
use reqwest::Response;
use serde_json::Value;

use crate::core::providers::error::ProviderError;
use crate::core::types::{ImageData, detect_image_mime};

/// SSE event types
#[derive(Debug, Clone)]
pub enum GeminiSSEEvent {
    /// A generateContent response chunk
    GenerateContentResponse(Value),
    /// Error payload delivered in-stream
    Error(Value),
    /// Heartbeat
    Ping,
    /// Completion marker
    Done,
    /// Anything else
    Unknown(String),
}

/// SSE parser
pub struct GeminiSSEParser;

impl GeminiSSEParser {
    /// Parse one SSE line as an event
    pub fn parse_event(line: &str) -> Option<GeminiSSEEvent> {
        if line.is_empty() || line.starts_with(':') {
            return None;
        }

        if line.starts_with("event:") {
            return None;
        }

        if let Some(data) = line.strip_prefix("data:") {
            let data = data.trim();

            if data == "[DONE]" {
                return Some(GeminiSSEEvent::Done);
            }

            if data.is_empty() {
                return Some(GeminiSSEEvent::Ping);
            }

            if let Ok(json) = serde_json::from_str::<Value>(data) {
                if json.get("error").is_some() {
                    return Some(GeminiSSEEvent::Error(json));
                }

                if json.get("candidates").is_some() {
                    return Some(GeminiSSEEvent::GenerateContentResponse(json));
                }

                Some(GeminiSSEEvent::Unknown(data.to_string()))
            } else {
                Some(GeminiSSEEvent::Unknown(data.to_string()))
            }
        } else {
            None
        }
    }
}

/// One usable part extracted from a response chunk
#[derive(Debug, Clone, PartialEq)]
pub enum StreamPart {
    Image(ImageData),
    Text(String),
}

/// Extract image and text parts from a generateContent response chunk.
///
/// Inline data is base64-decoded; the reported MIME type wins, with a
/// magic-byte sniff as the fallback.
pub fn extract_parts(response: &Value) -> Result<Vec<StreamPart>, ProviderError> {
    let mut out = Vec::new();

    let parts = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array());

    let Some(parts) = parts else {
        return Ok(out);
    };

    for part in parts {
        if let Some(inline) = part.get("inlineData") {
            let data = inline.get("data").and_then(|d| d.as_str()).unwrap_or("");
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(data)
                .map_err(|e| ProviderError::parse(format!("Invalid base64 image data: {}", e)))?;
            let mime_type = inline
                .get("mimeType")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| detect_image_mime(&bytes).to_string());
            out.push(StreamPart::Image(ImageData::new(bytes, mime_type)));
        } else if let Some(text) = part.get("text").and_then(|t| t.as_str()) {
            out.push(StreamPart::Text(text.to_string()));
        }
    }

    Ok(out)
}

/// Drain a streaming response and collect every inline image.
///
/// Text parts are logged and dropped; an in-stream error event aborts
/// the whole variant.
pub async fn collect_images(response: Response) -> Result<Vec<ImageData>, ProviderError> {
    let mut stream = response.bytes_stream();
    let mut buffer = String::new();
    let mut images = Vec::new();

    loop {
        // Drain complete lines before pulling more bytes
        while let Some(line_end) = buffer.find('\n') {
            let line = buffer[..line_end].trim_end_matches('\r').to_string();
            buffer.drain(..=line_end);

            if let Some(event) = GeminiSSEParser::parse_event(&line) {
                if !handle_event(event, &mut images)? {
                    return Ok(images);
                }
            }
        }

        match stream.next().await {
            Some(Ok(bytes)) => buffer.push_str(&String::from_utf8_lossy(&bytes)),
            Some(Err(e)) => {
                return Err(ProviderError::stream(format!("Stream read error: {}", e)));
            }
            None => break,
        }
    }

    // The last event may arrive without a trailing newline
    let tail = buffer.trim();
    if !tail.is_empty() {
        if let Some(event) = GeminiSSEParser::parse_event(tail) {
            handle_event(event, &mut images)?;
        }
    }

    Ok(images)
}

/// Returns `Ok(false)` once the stream signals completion
fn handle_event(event: GeminiSSEEvent, images: &mut Vec<ImageData>) -> Result<bool, ProviderError> {
    match event {
        GeminiSSEEvent::GenerateContentResponse(response) => {
            for part in extract_parts(&response)? {
                match part {
                    StreamPart::Image(image) => images.push(image),
                    StreamPart::Text(text) => {
                        tracing::debug!(chunk = %text.trim(), "model text chunk");
                    }
                }
            }
            Ok(true)
        }
        GeminiSSEEvent::Error(error) => Err(ProviderError::from_api_response(&error)),
        GeminiSSEEvent::Done => Ok(false),
        GeminiSSEEvent::Ping | GeminiSSEEvent::Unknown(_) => Ok(true),
    }
}
