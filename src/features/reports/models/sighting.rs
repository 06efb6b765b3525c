use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::reports::models::Coordinates;
use crate::modules::store::Document;

/// A third party's report of having seen a lost pet.
///
/// Never deleted; a reviewer action only flips `reviewed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    pub id: Uuid,
    pub report_id: Uuid,
    pub reporter_id: String,
    /// Ordered, 1..=5
    pub photo_urls: Vec<String>,
    pub location_text: String,
    pub coordinates: Option<Coordinates>,
    pub condition: String,
    pub notes: Option<String>,
    pub contact: String,
    pub reviewed: bool,
    pub created_at: DateTime<Utc>,
}

impl Document for Sighting {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Validated sighting input with uploaded photo URLs
#[derive(Debug, Clone)]
pub struct NewSighting {
    pub reporter_id: String,
    pub photo_urls: Vec<String>,
    pub location_text: String,
    pub coordinates: Option<Coordinates>,
    pub condition: String,
    pub notes: Option<String>,
    pub contact: String,
}
