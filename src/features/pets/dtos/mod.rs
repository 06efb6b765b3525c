mod pet_dto;

pub use pet_dto::{CreatePetDto, PetResponseDto};
