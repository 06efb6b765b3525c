use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::core::config::MediaHostConfig;
use crate::core::error::UploadError;

/// Raw upload boundary to the external media host.
///
/// One HTTP POST per image; the service layer owns validation, batching, and
/// the no-retry policy.
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, UploadError>;
}

/// Expected success body from the media host
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

/// HTTP client for the hosted media service.
///
/// Sends multipart form data (`file`, `upload_preset`, `folder`) to a fixed
/// endpoint and expects a JSON body carrying `secure_url`.
pub struct HttpMediaHost {
    client: reqwest::Client,
    config: MediaHostConfig,
}

impl HttpMediaHost {
    pub fn new(config: MediaHostConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| format!("Failed to build media host client: {}", e))?;

        Ok(Self { client, config })
    }

    fn map_status(status: StatusCode) -> UploadError {
        match status {
            StatusCode::PAYLOAD_TOO_LARGE => UploadError::PayloadTooLarge,
            StatusCode::BAD_REQUEST
            | StatusCode::UNSUPPORTED_MEDIA_TYPE
            | StatusCode::UNPROCESSABLE_ENTITY => UploadError::InvalidFormat,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => UploadError::AuthFailure,
            StatusCode::TOO_MANY_REQUESTS => UploadError::RateLimited,
            other => UploadError::Unknown(format!("media host returned status {}", other)),
        }
    }
}

#[async_trait]
impl MediaHost for HttpMediaHost {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, UploadError> {
        let part = Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|_| UploadError::InvalidFormat)?;

        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone())
            .text("folder", self.config.folder.clone());

        let response = self
            .client
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UploadError::Timeout
                } else {
                    UploadError::Unknown(format!("media host request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status(status));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::Unknown(format!("invalid media host response: {}", e)))?;

        // A 2xx without secure_url is still a failed upload
        body.secure_url
            .ok_or_else(|| UploadError::Unknown("media host response missing secure_url".into()))
    }
}
