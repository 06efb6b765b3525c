use axum::extract::Multipart;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::media::dtos::ImageUpload;

/// Split a submission into its `payload` JSON part and `photos` file parts.
///
/// Photo order follows field order in the request body, which is the order
/// the client attached them in.
pub(super) async fn parse_submission<T: DeserializeOwned>(
    mut multipart: Multipart,
) -> Result<(T, Vec<ImageUpload>)> {
    let mut payload: Option<T> = None;
    let mut photos = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "payload" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read payload field: {}", e))
                })?;
                payload = Some(serde_json::from_str(&text).map_err(|e| {
                    AppError::BadRequest(format!("Invalid payload JSON: {}", e))
                })?);
            }
            "photos" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read photo data: {}", e))
                })?;

                photos.push(ImageUpload {
                    filename,
                    content_type,
                    data: data.to_vec(),
                });
            }
            other => {
                debug!("Ignoring unknown field: {}", other);
            }
        }
    }

    let payload =
        payload.ok_or_else(|| AppError::BadRequest("payload field is required".to_string()))?;
    Ok((payload, photos))
}
