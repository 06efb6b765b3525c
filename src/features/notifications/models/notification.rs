use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::store::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Sighting,
    Claim,
    System,
}

/// References carried alongside a notification for client-side navigation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotificationData {
    pub report_id: Option<Uuid>,
    pub sighting_id: Option<Uuid>,
    pub claim_id: Option<Uuid>,
}

impl NotificationData {
    pub fn for_report(report_id: Uuid) -> Self {
        Self {
            report_id: Some(report_id),
            ..Default::default()
        }
    }

    pub fn for_sighting(report_id: Uuid, sighting_id: Uuid) -> Self {
        Self {
            report_id: Some(report_id),
            sighting_id: Some(sighting_id),
            claim_id: None,
        }
    }

    pub fn for_claim(report_id: Uuid, claim_id: Uuid) -> Self {
        Self {
            report_id: Some(report_id),
            sighting_id: None,
            claim_id: Some(claim_id),
        }
    }
}

/// In-app notification document. Mutated only by marking read; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub data: NotificationData,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Document for Notification {
    fn id(&self) -> Uuid {
        self.id
    }
}
