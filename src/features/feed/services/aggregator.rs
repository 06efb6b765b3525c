use std::sync::Arc;

use futures::stream::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

use super::merge::merge_reports;
use super::source::ReportSource;
use crate::features::feed::models::{EnrichedFeedItem, FeedEvent, FeedSource, SourceEvent};
use crate::features::reports::models::PetReport;
use crate::features::users::services::IdentityResolver;
use crate::shared::constants::SELF_DISPLAY_NAME;

const FEED_CHANNEL_CAPACITY: usize = 16;

/// Merges the two live report collections into one enriched feed.
///
/// Each subscriber gets its own worker task holding a per-source cache. A
/// snapshot from either source replaces only that source's slot and triggers
/// a re-emission of the merged whole; a source error is forwarded as a
/// non-fatal event and the stale slot stays in use.
pub struct FeedAggregator {
    lost: Arc<dyn ReportSource>,
    found: Arc<dyn ReportSource>,
    resolver: Arc<IdentityResolver>,
}

impl FeedAggregator {
    pub fn new(
        lost: Arc<dyn ReportSource>,
        found: Arc<dyn ReportSource>,
        resolver: Arc<IdentityResolver>,
    ) -> Self {
        Self {
            lost,
            found,
            resolver,
        }
    }

    /// Attach every report's owner identity. All resolutions of a snapshot
    /// complete before the snapshot is emitted; a failed resolution falls
    /// back inside the resolver and never blocks the emission.
    async fn enrich(
        resolver: &IdentityResolver,
        reports: Vec<PetReport>,
        current_user_id: &str,
    ) -> Vec<EnrichedFeedItem> {
        let lookups = reports.into_iter().map(|report| async move {
            if report.owner_id == current_user_id {
                EnrichedFeedItem {
                    display_name: SELF_DISPLAY_NAME.to_string(),
                    avatar_url: None,
                    report,
                }
            } else {
                let identity = resolver.resolve(&report.owner_id).await;
                EnrichedFeedItem {
                    display_name: identity.display_name,
                    avatar_url: identity.avatar_url,
                    report,
                }
            }
        });
        futures::future::join_all(lookups).await
    }

    /// One-shot merged, enriched snapshot of both sources as they stand.
    pub async fn snapshot(&self, current_user_id: &str) -> Vec<EnrichedFeedItem> {
        let merged = merge_reports(&self.lost.current(), &self.found.current());
        Self::enrich(&self.resolver, merged, current_user_id).await
    }

    /// Start a live subscription for one viewer.
    pub fn subscribe(&self, current_user_id: String) -> FeedSubscription {
        let (tx, rx) = mpsc::channel(FEED_CHANNEL_CAPACITY);
        let lost_stream = self.lost.subscribe();
        let found_stream = self.found.subscribe();
        let resolver = Arc::clone(&self.resolver);

        let task = tokio::spawn(async move {
            let mut events = futures::stream::select(
                lost_stream.map(|e| (FeedSource::Lost, e)),
                found_stream.map(|e| (FeedSource::Found, e)),
            );

            let mut lost_cache: Vec<PetReport> = Vec::new();
            let mut found_cache: Vec<PetReport> = Vec::new();

            while let Some((source, event)) = events.next().await {
                let outgoing = match event {
                    SourceEvent::Snapshot(reports) => {
                        match source {
                            FeedSource::Lost => lost_cache = reports,
                            FeedSource::Found => found_cache = reports,
                        }
                        let merged = merge_reports(&lost_cache, &found_cache);
                        let items = Self::enrich(&resolver, merged, &current_user_id).await;
                        FeedEvent::Items { items }
                    }
                    SourceEvent::Error(message) => {
                        tracing::warn!("Feed source {} failed: {}", source, message);
                        FeedEvent::SourceError { source, message }
                    }
                };

                if tx.send(outgoing).await.is_err() {
                    break;
                }
            }
        });

        FeedSubscription {
            events: rx,
            worker: AbortOnDrop(task),
        }
    }
}

struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Handle owned by one feed viewer. Dropping it (or calling `unsubscribe`)
/// aborts the worker task along with any in-flight identity lookups; no
/// events are delivered afterwards.
pub struct FeedSubscription {
    events: mpsc::Receiver<FeedEvent>,
    worker: AbortOnDrop,
}

impl FeedSubscription {
    pub async fn next_event(&mut self) -> Option<FeedEvent> {
        self.events.recv().await
    }

    pub fn unsubscribe(self) {}

    /// Adapt the subscription into a stream; the worker stays alive for as
    /// long as the stream does.
    pub fn into_stream(self) -> impl Stream<Item = FeedEvent> + Send {
        let FeedSubscription { events, worker } = self;
        ReceiverStream::new(events).map(move |event| {
            let _keep_worker = &worker;
            event
        })
    }
}
