use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::handlers::{
    claim_handler::{create_claim, resolve_claim},
    report_handler::{create_report, get_report, list_reports, ReportState},
    sighting_handler::{create_sighting, review_sighting},
};
use super::services::{ReportLifecycleService, SubmissionService};

/// Body limit for photo submissions (5 photos at 10MB plus multipart overhead)
const SUBMISSION_BODY_LIMIT: usize = 52 * 1024 * 1024;

/// Create routes for the reports feature
pub fn routes(
    submissions: Arc<SubmissionService>,
    lifecycle: Arc<ReportLifecycleService>,
) -> Router {
    let state = ReportState {
        submissions,
        lifecycle,
    };

    Router::new()
        .route(
            "/api/reports",
            post(create_report).layer(DefaultBodyLimit::max(SUBMISSION_BODY_LIMIT)),
        )
        .route("/api/reports", get(list_reports))
        .route("/api/reports/{id}", get(get_report))
        .route(
            "/api/reports/{id}/sightings",
            post(create_sighting).layer(DefaultBodyLimit::max(SUBMISSION_BODY_LIMIT)),
        )
        .route(
            "/api/reports/{id}/claims",
            post(create_claim).layer(DefaultBodyLimit::max(SUBMISSION_BODY_LIMIT)),
        )
        .route("/api/claims/{id}/resolve", post(resolve_claim))
        .route("/api/sightings/{id}/review", post(review_sighting))
        .with_state(state)
}
