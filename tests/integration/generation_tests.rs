//! Full generation round-trips: SDK -> server -> mocked model -> media

use crate::common::fixtures::{gaming_answers, png_bytes};
use crate::common::providers::{
    TEST_IMAGE_BYTES, mount_image_success, mount_partial_failure, sse_image_body,
};
use crate::common::TestServer;
use serde_json::Value;
use thumbforge::GenerationKind;
use thumbforge::sdk::{GenerateRequest, ImageAttachment};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, ResponseTemplate};

#[actix_web::test]
async fn test_text_generation_end_to_end() {
    let server = TestServer::start().await;
    mount_image_success(&server.gemini).await;
    let client = server.authenticated_client().await;

    let request = GenerateRequest::new("A neon fox")
        .with_count(2)
        .with_answers(gaming_answers());
    let result = client.generate(&request).await.unwrap();

    assert_eq!(result.images.len(), 2);
    assert_eq!(result.requested, 2);
    assert_eq!(result.failed, 0);
    assert!(result.images.iter().all(|url| url.starts_with("/media/")));

    // The stored bytes come back over the public media route
    let bytes = client.download(&result.images[0]).await.unwrap();
    assert_eq!(bytes, TEST_IMAGE_BYTES);

    // The model saw the composed prompt, not the raw one
    let calls = server.gemini.received_requests().await.unwrap();
    assert_eq!(calls.len(), 2);
    let body: Value = serde_json::from_slice(&calls[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("A neon fox"));
    assert!(prompt.contains("Category: Gaming"));
    assert!(prompt.contains("No text overlay"));

    // History recorded the user's raw prompt and both URLs
    let history = client.history().await.unwrap();
    assert_eq!(history.len(), 1);
    let record = &history[0];
    assert_eq!(record.kind, GenerationKind::TextToImage);
    assert_eq!(record.original_prompt, "A neon fox");
    assert_eq!(record.image_urls, result.images);
    assert_eq!(record.answers.category.as_deref(), Some("Gaming"));
    assert!(record.input_image.is_none());
}

#[actix_web::test]
async fn test_generation_from_reference_image() {
    let server = TestServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex("streamGenerateContent$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(sse_image_body(1), "text/event-stream"),
        )
        .expect(1)
        .mount(&server.gemini)
        .await;
    let client = server.authenticated_client().await;

    let reference = png_bytes();
    let result = client
        .generate_from_image(
            &GenerateRequest::new("make it wider"),
            ImageAttachment::new("ref.png", reference.clone()),
        )
        .await
        .unwrap();

    // Image-to-image defaults to a single variant
    assert_eq!(result.images.len(), 1);
    assert_eq!(result.requested, 1);

    // The upload went to the model as inline PNG data
    let calls = server.gemini.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&calls[0].body).unwrap();
    assert_eq!(
        body["contents"][0]["parts"][1]["inlineData"]["mimeType"],
        "image/png"
    );

    let history = client.history().await.unwrap();
    let record = &history[0];
    assert_eq!(record.kind, GenerationKind::ImageToImage);
    let input = record.input_image.as_ref().unwrap();
    assert_eq!(input.name, "ref.png");
    assert_eq!(input.size, reference.len() as u64);
}

#[actix_web::test]
async fn test_partial_failure_is_reported_not_fatal() {
    let server = TestServer::start().await;
    mount_partial_failure(&server.gemini, 1).await;
    let client = server.authenticated_client().await;

    let result = client
        .generate(&GenerateRequest::new("flaky upstream").with_count(4))
        .await
        .unwrap();

    assert_eq!(result.requested, 4);
    assert_eq!(result.failed, 1);
    assert_eq!(result.images.len(), 3);
}

#[actix_web::test]
async fn test_history_is_scoped_per_account() {
    let server = TestServer::start().await;
    mount_image_success(&server.gemini).await;

    let owner = server.authenticated_client().await;
    let other = server.authenticated_client().await;

    owner
        .generate(&GenerateRequest::new("mine").with_count(1))
        .await
        .unwrap();

    let owned = owner.history().await.unwrap();
    assert_eq!(owned.len(), 1);
    assert!(other.history().await.unwrap().is_empty());

    // A foreign id behaves like a missing one
    let error = other.delete_history_item(owned[0].id).await.unwrap_err();
    assert_eq!(error.status(), 404);
    assert_eq!(owner.history().await.unwrap().len(), 1);

    owner.delete_history_item(owned[0].id).await.unwrap();
    assert!(owner.history().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_clear_history_removes_everything() {
    let server = TestServer::start().await;
    mount_image_success(&server.gemini).await;
    let client = server.authenticated_client().await;

    for prompt in ["first", "second"] {
        client
            .generate(&GenerateRequest::new(prompt).with_count(1))
            .await
            .unwrap();
    }
    assert_eq!(client.history().await.unwrap().len(), 2);

    client.clear_history().await.unwrap();
    assert!(client.history().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_empty_prompt_is_rejected() {
    let server = TestServer::start().await;
    let client = server.authenticated_client().await;

    let error = client
        .generate(&GenerateRequest::new("   "))
        .await
        .unwrap_err();
    assert_eq!(error.status(), 400);
    assert_eq!(error.message(), "Prompt is required");
}

#[actix_web::test]
async fn test_download_of_unknown_media_is_not_found() {
    let server = TestServer::start().await;
    let client = server.client();

    let error = client.download("/media/nope.png").await.unwrap_err();
    assert_eq!(error.status(), 404);
}
