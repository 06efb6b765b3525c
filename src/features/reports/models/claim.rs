use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::store::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimStatus::Pending => write!(f, "pending"),
            ClaimStatus::Approved => write!(f, "approved"),
            ClaimStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Resolution chosen by the report owner for a pending claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClaimDecision {
    Approve,
    Reject,
}

/// An ownership claim against a report.
///
/// Created Pending; transitions exactly once to Approved or Rejected.
/// Approval closes the parent report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: Uuid,
    pub report_id: Uuid,
    pub claimant_id: String,
    /// Ordered, 1..=5
    pub proof_image_urls: Vec<String>,
    pub contact: String,
    pub additional_info: Option<String>,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
}

impl Document for Claim {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Validated claim input with uploaded proof image URLs
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub claimant_id: String,
    pub proof_image_urls: Vec<String>,
    pub contact: String,
    pub additional_info: Option<String>,
}
