use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::pet_handler::{create_pet, list_pets};
use super::services::PetService;

/// Create routes for the pets feature
pub fn routes(service: Arc<PetService>) -> Router {
    Router::new()
        .route("/api/pets", post(create_pet))
        .route("/api/pets", get(list_pets))
        .with_state(service)
}
