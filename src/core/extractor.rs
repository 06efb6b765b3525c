use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// JSON extractor whose rejections speak this service's error vocabulary.
///
/// Malformed bodies become `AppError` values and render through the
/// `ApiResponse` envelope like every other failure.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(map_json_rejection(rejection)),
        }
    }
}

fn map_json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        // Well-formed JSON that does not fit the target type is a
        // validation failure, same as a field-rule violation
        JsonRejection::JsonDataError(err) => {
            AppError::Validation(format!("Request body has the wrong shape: {}", err))
        }
        JsonRejection::JsonSyntaxError(err) => {
            AppError::BadRequest(format!("Request body is not valid JSON: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::BadRequest("Request must be sent as application/json".to_string())
        }
        _ => AppError::BadRequest("Failed to read request body".to_string()),
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                AppError::Unauthorized(
                    "Missing user identity; the x-user-id header was not provided".to_string(),
                )
            })
    }
}
