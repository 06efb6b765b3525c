use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::auth::AuthenticatedUser;
use crate::features::notifications::dtos::NotificationResponseDto;
use crate::features::notifications::services::NotificationService;
use crate::shared::types::{ApiResponse, Meta};

/// List the caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "notifications",
    responses(
        (status = 200, description = "Caller's notifications", body = ApiResponse<Vec<NotificationResponseDto>>),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn list_notifications(
    user: AuthenticatedUser,
    State(service): State<Arc<NotificationService>>,
) -> Result<Json<ApiResponse<Vec<NotificationResponseDto>>>, AppError> {
    let items: Vec<NotificationResponseDto> = service
        .list_for(&user.user_id)
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Mark a notification as read
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    tag = "notifications",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked read", body = ApiResponse<NotificationResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Notification belongs to another user"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_notification_read(
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    State(service): State<Arc<NotificationService>>,
) -> Result<Json<ApiResponse<NotificationResponseDto>>, AppError> {
    let notification = service.mark_read(id, &user.user_id)?;

    Ok(Json(ApiResponse::success(
        Some(notification.into()),
        None,
        None,
    )))
}
