use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::PetReport;

/// Which of the two live collections an event originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedSource {
    Lost,
    Found,
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::Lost => write!(f, "lost"),
            FeedSource::Found => write!(f, "found"),
        }
    }
}

/// What one upstream source delivers: its full current set, or a failure
/// signal that leaves the last-known-good set in use.
#[derive(Debug, Clone)]
pub enum SourceEvent {
    Snapshot(Vec<PetReport>),
    Error(String),
}

/// A report with its owner's display identity attached.
///
/// Ephemeral: recomputed on every emission, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrichedFeedItem {
    #[serde(flatten)]
    pub report: PetReport,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// One emission to a feed subscriber
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEvent {
    Items { items: Vec<EnrichedFeedItem> },
    SourceError { source: FeedSource, message: String },
}
