use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt};
use tokio_stream::wrappers::WatchStream;

use crate::features::feed::models::SourceEvent;
use crate::features::reports::models::PetReport;
use crate::modules::store::DocumentCollection;

/// One live upstream collection feeding the aggregator.
///
/// `subscribe` delivers the source's full current set immediately, then a
/// fresh full set on every change, in store order.
pub trait ReportSource: Send + Sync {
    fn current(&self) -> Vec<PetReport>;
    fn subscribe(&self) -> BoxStream<'static, SourceEvent>;
}

/// Source backed by a document-store collection's snapshot channel
pub struct CollectionReportSource {
    collection: Arc<DocumentCollection<PetReport>>,
}

impl CollectionReportSource {
    pub fn new(collection: Arc<DocumentCollection<PetReport>>) -> Self {
        Self { collection }
    }
}

impl ReportSource for CollectionReportSource {
    fn current(&self) -> Vec<PetReport> {
        self.collection.all()
    }

    fn subscribe(&self) -> BoxStream<'static, SourceEvent> {
        WatchStream::new(self.collection.watch())
            .map(SourceEvent::Snapshot)
            .boxed()
    }
}
