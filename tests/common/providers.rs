//! Image model mock helpers
//!
//! Builders for the SSE bodies the Gemini streaming endpoint produces,
//! plus ready-made wiremock mounts.

use base64::Engine as _;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// JPEG magic prefix used for generated test images
pub const TEST_IMAGE_BYTES: [u8; 4] = [0xFF, 0xD8, 0xFF, 0x10];

/// SSE stream carrying the given number of inline images
pub fn sse_image_body(images: usize) -> String {
    let data = base64::engine::general_purpose::STANDARD.encode(TEST_IMAGE_BYTES);
    let mut body = String::new();
    for _ in 0..images {
        body.push_str(&format!(
            "data: {{\"candidates\": [{{\"content\": {{\"parts\": [{{\"inlineData\": \
             {{\"mimeType\": \"image/jpeg\", \"data\": \"{}\"}}}}]}}}}]}}\n\n",
            data
        ));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

/// SSE stream carrying only text, never an image
pub fn sse_text_only_body() -> String {
    "data: {\"candidates\": [{\"content\": {\"parts\": [{\"text\": \"no image today\"}]}}]}\n\n\
     data: [DONE]\n\n"
        .to_string()
}

/// Answer every streaming call with one image per request
pub async fn mount_image_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex("streamGenerateContent$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(sse_image_body(1), "text/event-stream"),
        )
        .mount(server)
        .await;
}

/// Fail the first `failures` streaming calls, then answer with images
pub async fn mount_partial_failure(server: &MockServer, failures: u64) {
    Mock::given(method("POST"))
        .and(path_regex("streamGenerateContent$"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .up_to_n_times(failures)
        .mount(server)
        .await;
    mount_image_success(server).await;
}
