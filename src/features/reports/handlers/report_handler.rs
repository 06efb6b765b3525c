use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::multipart::parse_submission;
use crate::core::error::AppError;
use crate::features::auth::AuthenticatedUser;
use crate::features::reports::dtos::{
    ClaimResponseDto, CreateReportDto, ReportDetailResponseDto, ReportResponseDto,
    SightingResponseDto,
};
use crate::features::reports::services::{ReportLifecycleService, SubmissionService};
use crate::shared::types::{ApiResponse, Meta};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub submissions: Arc<SubmissionService>,
    pub lifecycle: Arc<ReportLifecycleService>,
}

/// Submit a lost or found pet report
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body(
        content = CreateReportDto,
        content_type = "multipart/form-data",
        description = "Report payload plus 1-3 photos"
    ),
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 409, description = "Duplicate open report for this pet"),
        (status = 413, description = "Photo too large")
    )
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>), AppError> {
    let (dto, photos) = parse_submission::<CreateReportDto>(multipart).await?;
    let report = state.submissions.submit_report(&user, dto, photos).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report.into()), None, None)),
    ))
}

/// List the caller's reports, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "reports",
    responses(
        (status = 200, description = "Caller's reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn list_reports(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>, AppError> {
    let reports: Vec<ReportResponseDto> = state
        .lifecycle
        .list_by_owner(&user.user_id)
        .into_iter()
        .map(Into::into)
        .collect();
    let total = reports.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(reports),
        None,
        Some(Meta { total }),
    )))
}

/// Fetch one report together with its sightings and claims
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = "reports",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report detail", body = ApiResponse<ReportDetailResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Report not found")
    )
)]
pub async fn get_report(
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    State(state): State<ReportState>,
) -> Result<Json<ApiResponse<ReportDetailResponseDto>>, AppError> {
    let report = state.lifecycle.get_report(id)?;
    let sightings: Vec<SightingResponseDto> = state
        .lifecycle
        .sightings_for(id)
        .into_iter()
        .map(Into::into)
        .collect();
    let claims: Vec<ClaimResponseDto> = state
        .lifecycle
        .claims_for(id)
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ApiResponse::success(
        Some(ReportDetailResponseDto {
            report: report.into(),
            sightings,
            claims,
        }),
        None,
        None,
    )))
}
