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
use crate::features::reports::dtos::{ClaimResponseDto, CreateClaimDto, ResolveClaimDto};
use crate::shared::types::ApiResponse;

/// File an ownership claim against a report
#[utoipa::path(
    post,
    path = "/api/reports/{id}/claims",
    tag = "reports",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body(
        content = CreateClaimDto,
        content_type = "multipart/form-data",
        description = "Claim payload plus 1-5 proof images"
    ),
    responses(
        (status = 201, description = "Claim recorded", body = ApiResponse<ClaimResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Report not found"),
        (status = 409, description = "Report already closed"),
        (status = 413, description = "Photo too large")
    )
)]
pub async fn create_claim(
    user: AuthenticatedUser,
    Path(report_id): Path<Uuid>,
    State(state): State<ReportState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ClaimResponseDto>>), AppError> {
    let (dto, photos) = parse_submission::<CreateClaimDto>(multipart).await?;
    let claim = state
        .submissions
        .submit_claim(&user, report_id, dto, photos)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(claim.into()), None, None)),
    ))
}

/// Resolve a pending claim (report owner only)
#[utoipa::path(
    post,
    path = "/api/claims/{id}/resolve",
    tag = "reports",
    params(
        ("id" = Uuid, Path, description = "Claim ID")
    ),
    request_body = ResolveClaimDto,
    responses(
        (status = 200, description = "Claim resolved", body = ApiResponse<ClaimResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Caller does not own the report"),
        (status = 404, description = "Claim not found")
    )
)]
pub async fn resolve_claim(
    user: AuthenticatedUser,
    Path(claim_id): Path<Uuid>,
    State(state): State<ReportState>,
    AppJson(dto): AppJson<ResolveClaimDto>,
) -> Result<Json<ApiResponse<ClaimResponseDto>>, AppError> {
    let claim = state
        .lifecycle
        .resolve_claim(claim_id, dto.decision, &user.user_id)
        .await?;

    Ok(Json(ApiResponse::success(Some(claim.into()), None, None)))
}
