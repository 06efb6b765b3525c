mod aggregator;
mod merge;
mod source;

pub use aggregator::{FeedAggregator, FeedSubscription};
pub use merge::merge_reports;
pub use source::{CollectionReportSource, ReportSource};
