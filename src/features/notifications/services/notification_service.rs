use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::notifications::models::{Notification, NotificationData, NotificationKind};
use crate::modules::store::DocumentCollection;

/// Delivery boundary for the external notification collaborator.
///
/// Fire-and-forget from this service's perspective; the collaborator owns
/// actual delivery (system notification or in-app alert).
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn dispatch(&self, title: &str, body: &str, data: &NotificationData) -> Result<()>;
}

/// Default gateway that only records the dispatch in the log stream
pub struct LogNotificationGateway;

#[async_trait]
impl NotificationGateway for LogNotificationGateway {
    async fn dispatch(&self, title: &str, body: &str, data: &NotificationData) -> Result<()> {
        tracing::info!(
            "Notification dispatched: title={:?}, body={:?}, report_id={:?}",
            title,
            body,
            data.report_id
        );
        Ok(())
    }
}

/// Persists notifications and hands them to the delivery gateway.
pub struct NotificationService {
    notifications: Arc<DocumentCollection<Notification>>,
    gateway: Arc<dyn NotificationGateway>,
}

impl NotificationService {
    pub fn new(
        notifications: Arc<DocumentCollection<Notification>>,
        gateway: Arc<dyn NotificationGateway>,
    ) -> Self {
        Self {
            notifications,
            gateway,
        }
    }

    /// Persist a notification, then dispatch it best-effort.
    ///
    /// A gateway failure is logged and swallowed: the triggering submission
    /// has already been persisted and must not be rolled back.
    pub async fn notify(
        &self,
        recipient_id: &str,
        kind: NotificationKind,
        title: &str,
        body: &str,
        data: NotificationData,
    ) -> Notification {
        let notification = self.notifications.insert(Notification {
            id: Uuid::new_v4(),
            recipient_id: recipient_id.to_string(),
            kind,
            title: title.to_string(),
            body: body.to_string(),
            data: data.clone(),
            read: false,
            created_at: Utc::now(),
        });

        if let Err(e) = self.gateway.dispatch(title, body, &data).await {
            tracing::warn!(
                "Notification dispatch failed for {} (kept persisted copy): {}",
                recipient_id,
                e
            );
        }

        notification
    }

    /// Notifications for one recipient, newest first
    pub fn list_for(&self, recipient_id: &str) -> Vec<Notification> {
        let mut items = self
            .notifications
            .filter(|n| n.recipient_id == recipient_id);
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    pub fn mark_read(&self, id: Uuid, recipient_id: &str) -> Result<Notification> {
        let notification = self
            .notifications
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Notification {} not found", id)))?;

        if notification.recipient_id != recipient_id {
            return Err(AppError::Forbidden(
                "Notification does not belong to this user".to_string(),
            ));
        }

        self.notifications
            .update(id, |n| n.read = true)
            .ok_or_else(|| AppError::NotFound(format!("Notification {} not found", id)))
    }
}
