use std::sync::Arc;

use axum::{routing::get, Router};

use super::handlers::feed_handler::{feed_live, get_feed};
use super::services::FeedAggregator;

/// Create routes for the feed feature
pub fn routes(aggregator: Arc<FeedAggregator>) -> Router {
    Router::new()
        .route("/api/feed", get(get_feed))
        .route("/api/feed/live", get(feed_live))
        .with_state(aggregator)
}
