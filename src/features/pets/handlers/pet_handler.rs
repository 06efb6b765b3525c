use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::auth::AuthenticatedUser;
use crate::features::pets::dtos::{CreatePetDto, PetResponseDto};
use crate::features::pets::services::PetService;
use crate::shared::types::{ApiResponse, Meta};

/// Register a pet profile
#[utoipa::path(
    post,
    path = "/api/pets",
    tag = "pets",
    request_body = CreatePetDto,
    responses(
        (status = 201, description = "Pet registered", body = ApiResponse<PetResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn create_pet(
    user: AuthenticatedUser,
    State(service): State<Arc<PetService>>,
    AppJson(dto): AppJson<CreatePetDto>,
) -> Result<(StatusCode, Json<ApiResponse<PetResponseDto>>), AppError> {
    let pet = service.register(&user.user_id, dto)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(pet.into()), None, None)),
    ))
}

/// List the caller's registered pets
#[utoipa::path(
    get,
    path = "/api/pets",
    tag = "pets",
    responses(
        (status = 200, description = "Caller's pets", body = ApiResponse<Vec<PetResponseDto>>),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn list_pets(
    user: AuthenticatedUser,
    State(service): State<Arc<PetService>>,
) -> Result<Json<ApiResponse<Vec<PetResponseDto>>>, AppError> {
    let pets: Vec<PetResponseDto> = service
        .list_for(&user.user_id)
        .into_iter()
        .map(Into::into)
        .collect();
    let total = pets.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(pets),
        None,
        Some(Meta { total }),
    )))
}
