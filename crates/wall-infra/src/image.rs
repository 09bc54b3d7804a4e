//! Image inlining - uploaded files become `data:` URLs stored in the post row.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Image inlining errors.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image file is empty")]
    Empty,

    #[error("Image exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),
}

/// Encode an uploaded image as a `data:` URL.
///
/// The declared content type is trusted when it is an `image/*` type;
/// otherwise the type is sniffed from the file's magic bytes.
pub fn inline_image(
    bytes: &[u8],
    content_type: Option<&str>,
    max_bytes: usize,
) -> Result<String, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }
    if bytes.len() > max_bytes {
        return Err(ImageError::TooLarge { limit: max_bytes });
    }

    let mime = match content_type {
        Some(declared) if declared.starts_with("image/") => declared.to_string(),
        declared => sniff_image_type(bytes)
            .map(str::to_string)
            .ok_or_else(|| {
                ImageError::UnsupportedType(declared.unwrap_or("unknown").to_string())
            })?,
    };

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Recognise common image formats by their leading bytes.
pub fn sniff_image_type(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}
