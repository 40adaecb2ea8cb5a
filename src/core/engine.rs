//! Thumbnail generation engine
//!
//! Fans one request out into N concurrent variant streams against the
//! image model and aggregates whatever comes back. A failed variant
//! costs only itself; the batch always settles.

use futures::stream::{self, StreamExt};

use crate::core::providers::error::ProviderError;
use crate::core::providers::gemini::{API_KEY_ENV, GeminiClient, GeminiConfig, collect_images};
use crate::core::types::{GenerationBatch, GenerationRequest, ImageData};
use crate::utils::error::{ForgeError, Result};

/// Upper bound on variants per request
pub const MAX_VARIANTS: u32 = 4;

/// Instruction block prepended to image-to-image prompts
const REFERENCE_INSTRUCTIONS: &str = "You are a thumbnail creator that modifies existing images. \
CRITICAL INSTRUCTIONS:\n\
1. Use the provided reference image as the primary foundation\n\
2. Preserve the key elements, composition and subjects of the reference image\n\
3. Apply only the modifications described in the request\n\
4. Keep all original elements intact and recognizable\n\
5. Generate the image in 16:9 widescreen aspect ratio suitable for thumbnails";

/// Wrap a modification request in the reference-image template
fn wrap_reference_prompt(prompt: &str) -> String {
    format!(
        "{}\n\nModification request: {}\n\nIMPORTANT: Start from the provided reference image and \
         apply only the requested modifications while keeping all original elements intact and \
         recognizable. Create the final image in 16:9 widescreen thumbnail format.",
        REFERENCE_INSTRUCTIONS, prompt
    )
}

/// Orchestrates multi-variant generation against the provider
pub struct ThumbnailEngine {
    client: GeminiClient,
    max_concurrency: usize,
}

impl ThumbnailEngine {
    pub fn new(config: GeminiConfig, max_concurrency: usize) -> Result<Self> {
        let client = GeminiClient::new(config)?;
        Ok(Self {
            client,
            max_concurrency: max_concurrency.max(1),
        })
    }

    /// Engine configured from the process environment
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env(), MAX_VARIANTS as usize)
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Run one fan-out generation.
    ///
    /// The credential check happens before any request is issued. Variant
    /// failures are counted, never propagated; an all-failed batch is an
    /// empty success.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationBatch> {
        if !self.client.is_configured() {
            return Err(ForgeError::config(format!(
                "{} is not set; image generation is unavailable",
                API_KEY_ENV
            )));
        }

        let count = request.count.clamp(1, MAX_VARIANTS);
        let prompt = match &request.reference {
            Some(_) => wrap_reference_prompt(&request.prompt),
            None => request.prompt.clone(),
        };

        tracing::info!(
            kind = %request.kind(),
            variants = count,
            "starting generation fan-out"
        );

        let results: Vec<std::result::Result<Vec<ImageData>, ProviderError>> =
            stream::iter(
                (1..=count)
                    .map(|slot| self.generate_variant(slot, &prompt, request.reference.as_ref())),
            )
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let mut batch = GenerationBatch::default();
        for result in results {
            match result {
                Ok(images) if images.is_empty() => batch.failed += 1,
                Ok(images) => batch.images.extend(images),
                Err(_) => batch.failed += 1,
            }
        }

        if batch.failed > 0 {
            tracing::warn!(
                failed = batch.failed,
                requested = count,
                "variants produced no image"
            );
        }
        tracing::info!(
            produced = batch.images.len(),
            failed = batch.failed,
            "generation fan-out finished"
        );

        Ok(batch)
    }

    /// One variant: open the stream and collect its images
    async fn generate_variant(
        &self,
        slot: u32,
        prompt: &str,
        reference: Option<&ImageData>,
    ) -> std::result::Result<Vec<ImageData>, ProviderError> {
        let result = async {
            let response = self.client.stream_generate(prompt, reference).await?;
            collect_images(response).await
        }
        .await;

        if let Err(error) = &result {
            tracing::warn!(slot, %error, "variant failed");
        }

        result
    }
}
