use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::reports::models::{
    Coordinates, NewReport, PetGender, PetReport, ReportKind, ReportStatus,
};
use crate::shared::validation::{is_valid_coordinate, CONTACT_REGEX};

pub fn validate_coordinates(coords: &Coordinates) -> Result<(), ValidationError> {
    if is_valid_coordinate(coords.lat, coords.lon) {
        Ok(())
    } else {
        Err(ValidationError::new("coordinates_out_of_range"))
    }
}

/// JSON payload part of a report submission (photos travel as multipart
/// siblings and are uploaded before this becomes a `NewReport`).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    pub kind: ReportKind,
    pub pet_name: Option<String>,
    #[validate(length(min = 1, message = "species is required"))]
    pub species: String,
    #[validate(length(min = 1, message = "breed is required"))]
    pub breed: String,
    #[validate(length(min = 1, message = "color is required"))]
    pub color: String,
    pub gender: PetGender,
    pub age_group: Option<String>,
    pub size: Option<String>,
    pub distinguishing_features: Option<String>,
    pub health_status: Option<String>,
    pub behavior: Option<String>,
    pub special_needs: Option<String>,
    #[validate(length(min = 1, message = "location is required"))]
    pub location_text: String,
    #[validate(custom(function = validate_coordinates))]
    pub coordinates: Option<Coordinates>,
    pub occurred_at: DateTime<Utc>,
    #[validate(regex(path = *CONTACT_REGEX, message = "contact must be a phone number or email"))]
    pub contact: String,
    pub reward_offered: Option<String>,
}

impl CreateReportDto {
    pub fn into_new_report(self, owner_id: String, photo_urls: Vec<String>) -> NewReport {
        NewReport {
            kind: self.kind,
            owner_id,
            pet_name: self.pet_name,
            species: self.species,
            breed: self.breed,
            color: self.color,
            gender: self.gender,
            age_group: self.age_group,
            size: self.size,
            distinguishing_features: self.distinguishing_features,
            health_status: self.health_status,
            behavior: self.behavior,
            special_needs: self.special_needs,
            location_text: self.location_text,
            coordinates: self.coordinates,
            occurred_at: self.occurred_at,
            contact: self.contact,
            reward_offered: self.reward_offered,
            photo_urls,
        }
    }
}

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
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
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl From<PetReport> for ReportResponseDto {
    fn from(r: PetReport) -> Self {
        Self {
            id: r.id,
            kind: r.kind,
            owner_id: r.owner_id,
            pet_name: r.pet_name,
            species: r.species,
            breed: r.breed,
            color: r.color,
            gender: r.gender,
            age_group: r.age_group,
            size: r.size,
            distinguishing_features: r.distinguishing_features,
            health_status: r.health_status,
            behavior: r.behavior,
            special_needs: r.special_needs,
            location_text: r.location_text,
            coordinates: r.coordinates,
            occurred_at: r.occurred_at,
            contact: r.contact,
            reward_offered: r.reward_offered,
            photo_urls: r.photo_urls,
            status: r.status,
            created_at: r.created_at,
        }
    }
}

/// Report plus its submissions, for the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportDetailResponseDto {
    #[serde(flatten)]
    pub report: ReportResponseDto,
    pub sightings: Vec<super::SightingResponseDto>,
    pub claims: Vec<super::ClaimResponseDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CreateReportDto {
        CreateReportDto {
            kind: ReportKind::Lost,
            pet_name: Some("Max".into()),
            species: "dog".into(),
            breed: "beagle".into(),
            color: "tricolor".into(),
            gender: PetGender::Male,
            age_group: None,
            size: None,
            distinguishing_features: None,
            health_status: None,
            behavior: None,
            special_needs: None,
            location_text: "Central Park".into(),
            coordinates: None,
            occurred_at: Utc::now(),
            contact: "owner@example.com".into(),
            reward_offered: None,
        }
    }

    #[test]
    fn valid_dto_passes() {
        assert!(dto().validate().is_ok());
    }

    #[test]
    fn empty_required_field_fails() {
        let mut d = dto();
        d.species = "".into();
        assert!(d.validate().is_err());
    }

    #[test]
    fn out_of_range_coordinates_fail() {
        let mut d = dto();
        d.coordinates = Some(Coordinates {
            lat: 120.0,
            lon: 10.0,
        });
        assert!(d.validate().is_err());
    }

    #[test]
    fn free_text_contact_fails() {
        let mut d = dto();
        d.contact = "call me maybe".into();
        assert!(d.validate().is_err());
    }
}
