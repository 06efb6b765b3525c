use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

/// Typed failures from the media host boundary.
///
/// No retry happens at this level; callers surface these to the user for a
/// manual resubmission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Upload timed out")]
    Timeout,

    #[error("Image exceeds the maximum allowed size")]
    PayloadTooLarge,

    #[error("Unsupported or corrupt image format")]
    InvalidFormat,

    #[error("Media host rejected our credentials")]
    AuthFailure,

    #[error("Media host is rate limiting uploads")]
    RateLimited,

    #[error("Upload failed: {0}")]
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate report: {0}")]
    DuplicateReport(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::DuplicateReport(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
            AppError::InvalidState(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
            AppError::Upload(ref err) => {
                let status = match err {
                    UploadError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    UploadError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                    UploadError::InvalidFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    UploadError::AuthFailure => StatusCode::BAD_GATEWAY,
                    UploadError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                    UploadError::Unknown(_) => StatusCode::BAD_GATEWAY,
                };
                (status, err.to_string(), None)
            }
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_errors_keep_their_status_codes() {
        let cases = [
            (UploadError::Timeout, StatusCode::GATEWAY_TIMEOUT),
            (UploadError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (
                UploadError::InvalidFormat,
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (UploadError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
        ];

        for (err, expected) in cases {
            let response = AppError::Upload(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn duplicate_report_maps_to_conflict() {
        let response =
            AppError::DuplicateReport("already have an open report for Max".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
