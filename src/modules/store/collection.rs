use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;
use uuid::Uuid;

/// A stored document with a stable identifier.
pub trait Document: Clone + PartialEq + Send + Sync + 'static {
    fn id(&self) -> Uuid;
}

/// One logical collection of the external document store.
///
/// Writes go through this handle; every mutation publishes the collection's
/// full current snapshot to live subscribers, matching the store's
/// "snapshot per change" delivery model. New subscribers receive the current
/// snapshot immediately.
pub struct DocumentCollection<T: Document> {
    inner: RwLock<Vec<T>>,
    snapshots: watch::Sender<Vec<T>>,
}

impl<T: Document> DocumentCollection<T> {
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(Vec::new());
        Self {
            inner: RwLock::new(Vec::new()),
            snapshots,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, docs: &[T]) {
        self.snapshots.send_replace(docs.to_vec());
    }

    /// Insert a document and publish the new snapshot.
    pub fn insert(&self, doc: T) -> T {
        let mut docs = self.write();
        docs.push(doc.clone());
        self.publish(&docs);
        doc
    }

    pub fn get(&self, id: Uuid) -> Option<T> {
        self.read().iter().find(|d| d.id() == id).cloned()
    }

    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.read().iter().find(|d| pred(d)).cloned()
    }

    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.read().iter().filter(|d| pred(d)).cloned().collect()
    }

    pub fn all(&self) -> Vec<T> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Mutate a document in place under the collection lock and publish the
    /// updated snapshot. A closure that leaves the document unchanged
    /// publishes nothing, so no-op updates never wake subscribers.
    /// Returns the updated document, or `None` if absent.
    pub fn update(&self, id: Uuid, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut docs = self.write();
        let doc = docs.iter_mut().find(|d| d.id() == id)?;
        let before = doc.clone();
        f(doc);
        let updated = doc.clone();
        if updated != before {
            self.publish(&docs);
        }
        Some(updated)
    }

    /// Live snapshot subscription. The receiver holds the current snapshot
    /// and observes every subsequent change in store order.
    pub fn watch(&self) -> watch::Receiver<Vec<T>> {
        self.snapshots.subscribe()
    }
}

impl<T: Document> Default for DocumentCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Doc {
        id: Uuid,
        value: i32,
    }

    impl Document for Doc {
        fn id(&self) -> Uuid {
            self.id
        }
    }

    fn doc(value: i32) -> Doc {
        Doc {
            id: Uuid::new_v4(),
            value,
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let coll = DocumentCollection::new();
        let d = coll.insert(doc(7));
        assert_eq!(coll.get(d.id), Some(d));
        assert_eq!(coll.len(), 1);
    }

    #[test]
    fn update_mutates_in_place() {
        let coll = DocumentCollection::new();
        let d = coll.insert(doc(1));
        let updated = coll.update(d.id, |d| d.value = 2).unwrap();
        assert_eq!(updated.value, 2);
        assert_eq!(coll.get(d.id).unwrap().value, 2);
    }

    #[test]
    fn update_missing_returns_none() {
        let coll: DocumentCollection<Doc> = DocumentCollection::new();
        assert!(coll.update(Uuid::new_v4(), |d| d.value = 9).is_none());
    }

    #[tokio::test]
    async fn noop_update_does_not_wake_subscribers() {
        use tokio_stream::wrappers::WatchStream;
        use tokio_test::{assert_pending, task};

        let coll = DocumentCollection::new();
        let d = coll.insert(doc(1));

        let mut stream = task::spawn(WatchStream::new(coll.watch()));
        assert!(stream.poll_next().is_ready());

        coll.update(d.id, |_| {});
        assert_pending!(stream.poll_next());

        coll.update(d.id, |d| d.value = 5);
        assert!(stream.poll_next().is_ready());
    }

    #[tokio::test]
    async fn watch_sees_current_snapshot_and_changes() {
        let coll = DocumentCollection::new();
        coll.insert(doc(1));

        let mut rx = coll.watch();
        assert_eq!(rx.borrow().len(), 1);

        coll.insert(doc(2));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 2);
    }
}
