use axum::Json;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::feed::{handlers as feed_handlers, models as feed_models};
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers, models as notifications_models,
};
use crate::features::pets::{dtos as pets_dtos, handlers as pets_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::report_handler::create_report,
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::get_report,
        reports_handlers::sighting_handler::create_sighting,
        reports_handlers::sighting_handler::review_sighting,
        reports_handlers::claim_handler::create_claim,
        reports_handlers::claim_handler::resolve_claim,
        // Feed
        feed_handlers::feed_handler::get_feed,
        feed_handlers::feed_handler::feed_live,
        // Notifications
        notifications_handlers::notification_handler::list_notifications,
        notifications_handlers::notification_handler::mark_notification_read,
        // Pets
        pets_handlers::pet_handler::create_pet,
        pets_handlers::pet_handler::list_pets,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            reports_models::ReportKind,
            reports_models::ReportStatus,
            reports_models::PetGender,
            reports_models::Coordinates,
            reports_models::ClaimStatus,
            reports_models::ClaimDecision,
            reports_models::PetReport,
            reports_dtos::CreateReportDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::ReportDetailResponseDto,
            reports_dtos::CreateSightingDto,
            reports_dtos::ReviewSightingDto,
            reports_dtos::SightingResponseDto,
            reports_dtos::CreateClaimDto,
            reports_dtos::ResolveClaimDto,
            reports_dtos::ClaimResponseDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::ReportDetailResponseDto>,
            ApiResponse<reports_dtos::SightingResponseDto>,
            ApiResponse<reports_dtos::ClaimResponseDto>,
            // Feed
            feed_models::FeedSource,
            feed_models::EnrichedFeedItem,
            feed_models::FeedEvent,
            ApiResponse<Vec<feed_models::EnrichedFeedItem>>,
            // Notifications
            notifications_models::NotificationKind,
            notifications_models::NotificationData,
            notifications_dtos::NotificationResponseDto,
            ApiResponse<notifications_dtos::NotificationResponseDto>,
            ApiResponse<Vec<notifications_dtos::NotificationResponseDto>>,
            // Pets
            pets_dtos::CreatePetDto,
            pets_dtos::PetResponseDto,
            ApiResponse<pets_dtos::PetResponseDto>,
            ApiResponse<Vec<pets_dtos::PetResponseDto>>,
        )
    ),
    tags(
        (name = "reports", description = "Lost/found pet reports, sightings, and claims"),
        (name = "feed", description = "Merged live community feed"),
        (name = "notifications", description = "In-app notifications"),
        (name = "pets", description = "Registered pet profiles"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Pawtrail API",
        version = "0.1.0",
        description = "Community lost-and-found pet platform backend",
    )
)]
pub struct ApiDoc;

/// Documents the upstream identity header the service expects
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "user_identity",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-user-id"))),
            );
        }
    }
}

/// Raw OpenAPI document endpoint
pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
