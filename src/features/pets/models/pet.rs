use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::reports::models::PetGender;
use crate::modules::store::Document;

/// A registered pet profile, used to pre-fill lost-report forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Pet {
    pub id: Uuid,
    pub owner_id: String,
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

impl Document for Pet {
    fn id(&self) -> Uuid {
        self.id
    }
}
