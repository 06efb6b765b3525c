use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::State,
    response::{sse::Event, Sse},
    Json,
};
use futures::stream::Stream;
use tokio_stream::StreamExt;

use crate::core::error::AppError;
use crate::features::auth::AuthenticatedUser;
use crate::features::feed::models::{EnrichedFeedItem, FeedEvent};
use crate::features::feed::services::FeedAggregator;
use crate::shared::types::{ApiResponse, Meta};

/// One-shot merged, enriched feed snapshot
#[utoipa::path(
    get,
    path = "/api/feed",
    tag = "feed",
    responses(
        (status = 200, description = "Current feed", body = ApiResponse<Vec<EnrichedFeedItem>>),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn get_feed(
    user: AuthenticatedUser,
    State(aggregator): State<Arc<FeedAggregator>>,
) -> Result<Json<ApiResponse<Vec<EnrichedFeedItem>>>, AppError> {
    let items = aggregator.snapshot(&user.user_id).await;
    let total = items.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Live feed over SSE. Emits `feed` events with merged item lists and
/// `source_error` events when one side degrades; ends on client disconnect.
#[utoipa::path(
    get,
    path = "/api/feed/live",
    tag = "feed",
    responses(
        (status = 200, description = "SSE stream of feed emissions", content_type = "text/event-stream"),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn feed_live(
    user: AuthenticatedUser,
    State(aggregator): State<Arc<FeedAggregator>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let subscription = aggregator.subscribe(user.user_id.clone());

    // Dropping the stream on disconnect tears the subscription worker down
    let stream = subscription.into_stream().map(|feed_event| {
        let name = match &feed_event {
            FeedEvent::Items { .. } => "feed",
            FeedEvent::SourceError { .. } => "source_error",
        };
        let event = Event::default()
            .event(name)
            .json_data(&feed_event)
            .unwrap_or_else(|e| {
                tracing::error!("Failed to serialize feed event: {}", e);
                Event::default().event("error").data("serialization failed")
            });
        Ok::<_, Infallible>(event)
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("ping"),
    )
}
