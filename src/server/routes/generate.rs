//! Thumbnail generation endpoints
//!
//! Both endpoints accept multipart/form-data: the free-text prompt, the
//! structured style answers, and (for image-to-image) the reference image.

use crate::core::models::{HistoryRecord, InputImageMeta};
use crate::core::types::{GenerationRequest, ImageData};
use crate::core::{PromptAnswers, compose_prompt};
use crate::server::middleware::authenticated_user;
use crate::server::state::AppState;
use crate::utils::error::ForgeError;
use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, web};
use futures::StreamExt;
use serde::Serialize;
use tracing::{error, info};

/// Default variant count for text-to-image requests
const DEFAULT_TEXT_VARIANTS: u32 = 4;
/// Default variant count for image-to-image requests
const DEFAULT_IMAGE_VARIANTS: u32 = 1;

/// Generation response payload
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    /// Served URLs of the generated images
    pub images: Vec<String>,
    /// Number of variants that were attempted
    pub requested: u32,
    /// Number of variants that produced nothing
    pub failed: u32,
}

/// Fields collected from a generation form
#[derive(Debug, Default)]
struct GenerateForm {
    prompt: Option<String>,
    original_prompt: Option<String>,
    enhance_prompt: bool,
    image_count: Option<u32>,
    answers: PromptAnswers,
    image: Option<(ImageData, InputImageMeta)>,
}

/// Text-to-image generation endpoint
pub async fn generate(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: Multipart,
) -> Result<HttpResponse, ForgeError> {
    let user_id = authenticated_user(&req)?;
    info!("Generation request from user: {}", user_id);

    let form = read_form(payload).await?;
    run_generation(&state, user_id, form, false).await
}

/// Image-to-image generation endpoint
pub async fn generate_from_image(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: Multipart,
) -> Result<HttpResponse, ForgeError> {
    let user_id = authenticated_user(&req)?;
    info!("Image-to-image generation request from user: {}", user_id);

    let form = read_form(payload).await?;
    if form.image.is_none() {
        return Err(ForgeError::validation("A reference image is required"));
    }

    run_generation(&state, user_id, form, true).await
}

/// Shared generation flow: compose, generate, persist, respond
async fn run_generation(
    state: &web::Data<AppState>,
    user_id: uuid::Uuid,
    form: GenerateForm,
    from_image: bool,
) -> Result<HttpResponse, ForgeError> {
    let prompt = form
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ForgeError::validation("Prompt is required"))?
        .to_string();

    let composed = compose_prompt(&prompt, &form.answers);

    let default_count = if from_image {
        DEFAULT_IMAGE_VARIANTS
    } else {
        DEFAULT_TEXT_VARIANTS
    };
    let count = form.image_count.unwrap_or(default_count);

    let (request, input_image) = match form.image {
        Some((image, meta)) if from_image => (
            GenerationRequest::with_reference(composed, image, count),
            Some(meta),
        ),
        _ => (GenerationRequest::text(composed, count), None),
    };
    let kind = request.kind();
    let requested = request.count.clamp(1, crate::core::engine::MAX_VARIANTS);

    let batch = state.engine.generate(&request).await?;

    // Persist every decoded image and collect its served URL
    let mut image_urls = Vec::with_capacity(batch.images.len());
    for image in &batch.images {
        let stored = state.storage.media().store(image).await?;
        image_urls.push(stored.url);
    }

    let record = HistoryRecord::new(
        user_id,
        kind,
        form.original_prompt.unwrap_or_else(|| prompt.clone()),
        form.answers.custom_prompt.clone(),
        form.enhance_prompt,
        form.answers,
        input_image,
        image_urls.clone(),
    );

    state.storage.db().insert_history(&record).await?;

    info!(
        "Generation finished for user {}: {} image(s), {} failed",
        user_id,
        image_urls.len(),
        batch.failed
    );

    Ok(HttpResponse::Ok().json(GenerateResponse {
        images: image_urls,
        requested,
        failed: batch.failed,
    }))
}

/// Parse a generation form from multipart payload
async fn read_form(mut payload: Multipart) -> Result<GenerateForm, ForgeError> {
    let mut form = GenerateForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            error!("Error reading multipart field: {}", e);
            ForgeError::bad_request(format!("Invalid multipart data: {}", e))
        })?;

        let field_name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        match field_name.as_str() {
            "image" => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or("reference")
                    .to_string();

                let data = read_field_bytes(&mut field).await?;
                let meta = InputImageMeta {
                    name: filename,
                    size: data.len() as u64,
                };
                form.image = Some((ImageData::from_bytes(data), meta));
            }
            "prompt" => form.prompt = Some(read_field_text(&mut field).await?),
            "originalPrompt" => form.original_prompt = Some(read_field_text(&mut field).await?),
            "enhancePrompt" => {
                form.enhance_prompt = read_field_text(&mut field).await?.trim() == "true";
            }
            "imageCount" => {
                if let Ok(count) = read_field_text(&mut field).await?.trim().parse::<u32>() {
                    form.image_count = Some(count);
                }
            }
            "category" => form.answers.category = Some(read_field_text(&mut field).await?),
            "mood" => form.answers.mood = Some(read_field_text(&mut field).await?),
            "theme" => form.answers.theme = Some(read_field_text(&mut field).await?),
            "primaryColor" => {
                form.answers.primary_color = Some(read_field_text(&mut field).await?);
            }
            "includeText" => form.answers.include_text = Some(read_field_text(&mut field).await?),
            "textStyle" => form.answers.text_style = Some(read_field_text(&mut field).await?),
            "thumbnailStyle" => {
                form.answers.thumbnail_style = Some(read_field_text(&mut field).await?);
            }
            "customPrompt" => {
                form.answers.custom_prompt = Some(read_field_text(&mut field).await?);
            }
            _ => {
                // Skip unknown fields
                while field.next().await.is_some() {}
            }
        }
    }

    Ok(form)
}

/// Read a multipart field to completion as raw bytes
async fn read_field_bytes(field: &mut actix_multipart::Field) -> Result<Vec<u8>, ForgeError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let bytes = chunk.map_err(|e| {
            error!("Error reading field chunk: {}", e);
            ForgeError::bad_request("Error reading uploaded data")
        })?;
        data.extend_from_slice(&bytes);
    }
    Ok(data)
}

/// Read a multipart field to completion as UTF-8 text
async fn read_field_text(field: &mut actix_multipart::Field) -> Result<String, ForgeError> {
    let data = read_field_bytes(field).await?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
