use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::notification_handler::{list_notifications, mark_notification_read};
use super::services::NotificationService;

/// Create routes for the notifications feature
pub fn routes(service: Arc<NotificationService>) -> Router {
    Router::new()
        .route("/api/notifications", get(list_notifications))
        .route("/api/notifications/{id}/read", post(mark_notification_read))
        .with_state(service)
}
