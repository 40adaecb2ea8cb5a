//! Core domain types for thumbnail generation

use serde::{Deserialize, Serialize};

/// Magic-byte signatures for the image formats the service accepts
const MIME_SIGNATURES: &[(&str, &[u8])] = &[
    ("image/jpeg", &[0xFF, 0xD8, 0xFF]),
    ("image/png", &[0x89, 0x50, 0x4E, 0x47]),
    ("image/gif", &[0x47, 0x49, 0x46]),
    ("image/webp", &[0x52, 0x49, 0x46, 0x46]),
];

/// Infer an image MIME type from the leading bytes of a buffer.
///
/// Unrecognized or truncated buffers fall back to `image/jpeg`, which is
/// what the upstream model produces most of the time anyway.
pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    for (mime, signature) in MIME_SIGNATURES {
        if bytes.len() >= signature.len() && &bytes[..signature.len()] == *signature {
            return mime;
        }
    }
    "image/jpeg"
}

/// File extension used when persisting an image of the given MIME type
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

/// One decoded image: raw bytes plus their MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageData {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Build from raw bytes, sniffing the MIME type from the content
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mime_type = detect_image_mime(&bytes).to_string();
        Self { bytes, mime_type }
    }

    pub fn extension(&self) -> &'static str {
        extension_for_mime(&self.mime_type)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Which generation flow produced a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationKind {
    TextToImage,
    ImageToImage,
}

impl GenerationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextToImage => "text-to-image",
            Self::ImageToImage => "image-to-image",
        }
    }
}

impl std::fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GenerationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text-to-image" => Ok(Self::TextToImage),
            "image-to-image" => Ok(Self::ImageToImage),
            other => Err(format!("unknown generation kind: {}", other)),
        }
    }
}

/// A request for one batch of thumbnail variants
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Final composed prompt sent to the model
    pub prompt: String,
    /// Reference image for image-to-image generation
    pub reference: Option<ImageData>,
    /// Number of variants to attempt
    pub count: u32,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>, count: u32) -> Self {
        Self {
            prompt: prompt.into(),
            reference: None,
            count,
        }
    }

    pub fn with_reference(prompt: impl Into<String>, reference: ImageData, count: u32) -> Self {
        Self {
            prompt: prompt.into(),
            reference: Some(reference),
            count,
        }
    }

    pub fn kind(&self) -> GenerationKind {
        if self.reference.is_some() {
            GenerationKind::ImageToImage
        } else {
            GenerationKind::TextToImage
        }
    }
}

/// Aggregate outcome of a fan-out generation
#[derive(Debug, Default)]
pub struct GenerationBatch {
    /// Successfully decoded images, in the order the variants settled
    pub images: Vec<ImageData>,
    /// Variants that produced no image
    pub failed: u32,
}

impl GenerationBatch {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_signatures() {
        assert_eq!(detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(
            detect_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            "image/png"
        );
        assert_eq!(detect_image_mime(b"GIF89a"), "image/gif");
        assert_eq!(detect_image_mime(b"RIFF....WEBP"), "image/webp");
    }

    #[test]
    fn test_detect_falls_back_to_jpeg() {
        assert_eq!(detect_image_mime(b"not an image"), "image/jpeg");
        assert_eq!(detect_image_mime(&[]), "image/jpeg");
        // Shorter than any signature
        assert_eq!(detect_image_mime(&[0x89]), "image/jpeg");
    }

    #[test]
    fn test_image_data_from_bytes_sniffs() {
        let image = ImageData::from_bytes(vec![0x89, 0x50, 0x4E, 0x47, 0x00]);
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.extension(), "png");
        assert_eq!(image.len(), 5);
    }

    #[test]
    fn test_generation_kind_round_trip() {
        assert_eq!(GenerationKind::TextToImage.to_string(), "text-to-image");
        assert_eq!(
            "image-to-image".parse::<GenerationKind>(),
            Ok(GenerationKind::ImageToImage)
        );
        assert!("video".parse::<GenerationKind>().is_err());
    }

    #[test]
    fn test_request_kind_follows_reference() {
        let text = GenerationRequest::text("a thumbnail", 4);
        assert_eq!(text.kind(), GenerationKind::TextToImage);

        let reference = ImageData::from_bytes(vec![0xFF, 0xD8, 0xFF]);
        let i2i = GenerationRequest::with_reference("restyle it", reference, 1);
        assert_eq!(i2i.kind(), GenerationKind::ImageToImage);
    }
}
