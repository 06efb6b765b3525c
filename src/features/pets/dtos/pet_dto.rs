use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::pets::models::Pet;
use crate::features::reports::models::PetGender;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePetDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "species is required"))]
    pub species: String,
    #[validate(length(min = 1, message = "breed is required"))]
    pub breed: String,
    #[validate(length(min = 1, message = "color is required"))]
    pub color: String,
    pub gender: PetGender,
    pub age_group: Option<String>,
    pub size: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PetResponseDto {
    pub id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub color: String,
    pub gender: PetGender,
    pub age_group: Option<String>,
    pub size: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Pet> for PetResponseDto {
    fn from(p: Pet) -> Self {
        Self {
            id: p.id,
            name: p.name,
            species: p.species,
            breed: p.breed,
            color: p.color,
            gender: p.gender,
            age_group: p.age_group,
            size: p.size,
            photo_url: p.photo_url,
            created_at: p.created_at,
        }
    }
}
