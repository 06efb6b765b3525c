use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::report_dto::validate_coordinates;
use crate::features::reports::models::{Coordinates, NewSighting, Sighting};
use crate::shared::validation::CONTACT_REGEX;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSightingDto {
    #[validate(length(min = 1, message = "location is required"))]
    pub location_text: String,
    #[validate(custom(function = validate_coordinates))]
    pub coordinates: Option<Coordinates>,
    #[validate(length(min = 1, message = "condition is required"))]
    pub condition: String,
    pub notes: Option<String>,
    #[validate(regex(path = *CONTACT_REGEX, message = "contact must be a phone number or email"))]
    pub contact: String,
}

impl CreateSightingDto {
    pub fn into_new_sighting(self, reporter_id: String, photo_urls: Vec<String>) -> NewSighting {
        NewSighting {
            reporter_id,
            photo_urls,
            location_text: self.location_text,
            coordinates: self.coordinates,
            condition: self.condition,
            notes: self.notes,
            contact: self.contact,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewSightingDto {
    pub confirmed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SightingResponseDto {
    pub id: Uuid,
    pub report_id: Uuid,
    pub reporter_id: String,
    pub photo_urls: Vec<String>,
    pub location_text: String,
    pub coordinates: Option<Coordinates>,
    pub condition: String,
    pub notes: Option<String>,
    pub contact: String,
    pub reviewed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Sighting> for SightingResponseDto {
    fn from(s: Sighting) -> Self {
        Self {
            id: s.id,
            report_id: s.report_id,
            reporter_id: s.reporter_id,
            photo_urls: s.photo_urls,
            location_text: s.location_text,
            coordinates: s.coordinates,
            condition: s.condition,
            notes: s.notes,
            contact: s.contact,
            reviewed: s.reviewed,
            created_at: s.created_at,
        }
    }
}
