//! Multipart post form: `message` text plus an optional `image` file.

use actix_multipart::Multipart;
use futures::StreamExt;
use wall_infra::inline_image;

use crate::middleware::error::{AppError, AppResult};

/// Decoded composer or edit form.
#[derive(Debug, Default)]
pub struct PostForm {
    pub message: String,
    /// Uploaded image as a `data:` URL; `None` when no file was chosen.
    pub image: Option<String>,
}

impl PostForm {
    pub async fn read(mut payload: Multipart, max_image_bytes: usize) -> AppResult<Self> {
        let mut form = PostForm::default();

        while let Some(item) = payload.next().await {
            let mut field = item.map_err(|e| AppError::BadRequest(e.to_string()))?;
            let name = field.name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(|m| m.essence_str().to_string());

            let mut bytes = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(|e| AppError::BadRequest(e.to_string()))?;
                if bytes.len() + chunk.len() > max_image_bytes {
                    return Err(AppError::PayloadTooLarge(format!(
                        "field '{}' exceeds {} bytes",
                        name, max_image_bytes
                    )));
                }
                bytes.extend_from_slice(&chunk);
            }

            match name.as_str() {
                "message" => {
                    form.message = String::from_utf8(bytes)
                        .map_err(|_| AppError::BadRequest("message is not valid UTF-8".into()))?;
                }
                // Browsers send an empty part when no file was chosen.
                "image" if !bytes.is_empty() => {
                    form.image = Some(inline_image(
                        &bytes,
                        content_type.as_deref(),
                        max_image_bytes,
                    )?);
                }
                _ => {}
            }
        }

        Ok(form)
    }
}
