use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::multipart::parse_submission;
use super::report_handler::ReportState;
use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::auth::AuthenticatedUser;
use crate::features::reports::dtos::{CreateSightingDto, ReviewSightingDto, SightingResponseDto};
use crate::shared::types::ApiResponse;

/// Report a sighting of a lost pet
#[utoipa::path(
    post,
    path = "/api/reports/{id}/sightings",
    tag = "reports",
    params(
        ("id" = Uuid, Path, description = "Lost report ID")
    ),
    request_body(
        content = CreateSightingDto,
        content_type = "multipart/form-data",
        description = "Sighting payload plus 1-5 photos"
    ),
    responses(
        (status = 201, description = "Sighting recorded", body = ApiResponse<SightingResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Report not found"),
        (status = 409, description = "Report already closed"),
        (status = 413, description = "Photo too large")
    )
)]
pub async fn create_sighting(
    user: AuthenticatedUser,
    Path(report_id): Path<Uuid>,
    State(state): State<ReportState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SightingResponseDto>>), AppError> {
    let (dto, photos) = parse_submission::<CreateSightingDto>(multipart).await?;
    let sighting = state
        .submissions
        .submit_sighting(&user, report_id, dto, photos)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(sighting.into()), None, None)),
    ))
}

/// Mark a sighting as reviewed (report owner only)
#[utoipa::path(
    post,
    path = "/api/sightings/{id}/review",
    tag = "reports",
    params(
        ("id" = Uuid, Path, description = "Sighting ID")
    ),
    request_body = ReviewSightingDto,
    responses(
        (status = 200, description = "Sighting reviewed", body = ApiResponse<SightingResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Caller does not own the report"),
        (status = 404, description = "Sighting not found")
    )
)]
pub async fn review_sighting(
    user: AuthenticatedUser,
    Path(sighting_id): Path<Uuid>,
    State(state): State<ReportState>,
    AppJson(dto): AppJson<ReviewSightingDto>,
) -> Result<Json<ApiResponse<SightingResponseDto>>, AppError> {
    let sighting = state
        .lifecycle
        .review_sighting(sighting_id, &user.user_id, dto.confirmed)?;

    Ok(Json(ApiResponse::success(Some(sighting.into()), None, None)))
}
