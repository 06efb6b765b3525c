use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::store::Document;

/// Whether a posting reports a lost pet or a found pet.
///
/// Immutable after creation; it decides which collection the report lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Lost,
    Found,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Lost => write!(f, "lost"),
            ReportKind::Found => write!(f, "found"),
        }
    }
}

/// Report status. Only ever advances forward through this sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Open,
    HasSighting,
    Claimed,
    Closed,
}

impl ReportStatus {
    /// Position in the monotonic state sequence
    pub fn rank(self) -> u8 {
        match self {
            ReportStatus::Open => 0,
            ReportStatus::HasSighting => 1,
            ReportStatus::Claimed => 2,
            ReportStatus::Closed => 3,
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Open => write!(f, "open"),
            ReportStatus::HasSighting => write!(f, "has_sighting"),
            ReportStatus::Claimed => write!(f, "claimed"),
            ReportStatus::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PetGender {
    Male,
    Female,
    Unknown,
}

/// Geographic point; optional on reports, required before map display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A lost or found pet posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PetReport {
    pub id: Uuid,
    pub kind: ReportKind,
    pub owner_id: String,
    /// Optional for Found reports (the finder rarely knows the name)
    pub pet_name: Option<String>,
    pub species: String,
    pub breed: String,
    pub color: String,
    pub gender: PetGender,
    pub age_group: Option<String>,
    pub size: Option<String>,
    pub distinguishing_features: Option<String>,
    pub health_status: Option<String>,
    pub behavior: Option<String>,
    pub special_needs: Option<String>,
    pub location_text: String,
    pub coordinates: Option<Coordinates>,
    pub occurred_at: DateTime<Utc>,
    pub contact: String,
    pub reward_offered: Option<String>,
    /// Ordered, 1..=3, never empty
    pub photo_urls: Vec<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl PetReport {
    pub fn is_closed(&self) -> bool {
        self.status == ReportStatus::Closed
    }
}

impl Document for PetReport {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Validated input for creating a report; the submission pipeline fills in
/// `photo_urls` after the uploads succeed.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub kind: ReportKind,
    pub owner_id: String,
    pub pet_name: Option<String>,
    pub species: String,
    pub breed: String,
    pub color: String,
    pub gender: PetGender,
    pub age_group: Option<String>,
    pub size: Option<String>,
    pub distinguishing_features: Option<String>,
    pub health_status: Option<String>,
    pub behavior: Option<String>,
    pub special_needs: Option<String>,
    pub location_text: String,
    pub coordinates: Option<Coordinates>,
    pub occurred_at: DateTime<Utc>,
    pub contact: String,
    pub reward_offered: Option<String>,
    pub photo_urls: Vec<String>,
}
