use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::features::pets::dtos::CreatePetDto;
use crate::features::pets::models::Pet;
use crate::modules::store::DocumentCollection;
use crate::shared::validation::validation_error;

/// Owner-scoped pet profiles for report form pre-fill.
pub struct PetService {
    pets: Arc<DocumentCollection<Pet>>,
}

impl PetService {
    pub fn new(pets: Arc<DocumentCollection<Pet>>) -> Self {
        Self { pets }
    }

    pub fn register(&self, owner_id: &str, dto: CreatePetDto) -> Result<Pet> {
        dto.validate().map_err(validation_error)?;

        let pet = self.pets.insert(Pet {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            name: dto.name,
            species: dto.species,
            breed: dto.breed,
            color: dto.color,
            gender: dto.gender,
            age_group: dto.age_group,
            size: dto.size,
            photo_url: dto.photo_url,
            created_at: Utc::now(),
        });
        tracing::info!("Registered pet {} for owner {}", pet.id, owner_id);
        Ok(pet)
    }

    /// Pets registered by one owner, oldest first (stable form ordering)
    pub fn list_for(&self, owner_id: &str) -> Vec<Pet> {
        let mut pets = self.pets.filter(|p| p.owner_id == owner_id);
        pets.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        pets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::reports::models::PetGender;

    fn dto(name: &str) -> CreatePetDto {
        CreatePetDto {
            name: name.to_string(),
            species: "cat".into(),
            breed: "tabby".into(),
            color: "orange".into(),
            gender: PetGender::Female,
            age_group: Some("adult".into()),
            size: None,
            photo_url: None,
        }
    }

    #[test]
    fn register_and_list_round_trip() {
        let service = PetService::new(Arc::new(DocumentCollection::new()));
        service.register("u1", dto("Whiskers")).unwrap();
        service.register("u1", dto("Tom")).unwrap();
        service.register("u2", dto("Other")).unwrap();

        let pets = service.list_for("u1");
        assert_eq!(pets.len(), 2);
        assert_eq!(pets[0].name, "Whiskers");
        assert_eq!(pets[1].name, "Tom");
    }

    #[test]
    fn register_rejects_blank_name() {
        let service = PetService::new(Arc::new(DocumentCollection::new()));
        assert!(matches!(
            service.register("u1", dto("")),
            Err(AppError::Validation(_))
        ));
    }
}
