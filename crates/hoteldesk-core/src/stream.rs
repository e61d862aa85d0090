// ── Reactive snapshot streams ──
//
// Subscription handles vended by the SnapshotStore.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::Snapshot;

/// A subscription to one collection.
///
/// Offers point-in-time access plus change notification via
/// [`changed()`](Self::changed) or by converting into a `Stream`.
pub struct SnapshotStream<T> {
    current: Arc<Snapshot<T>>,
    receiver: watch::Receiver<Arc<Snapshot<T>>>,
}

impl<T: Send + Sync + 'static> SnapshotStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Arc<Snapshot<T>>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Snapshot captured at creation (or at the last `changed()`).
    pub fn current(&self) -> &Arc<Snapshot<T>> {
        &self.current
    }

    /// Latest snapshot, which may be newer than `current()`.
    pub fn latest(&self) -> Arc<Snapshot<T>> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next replacement. `None` once the store is dropped.
    pub async fn changed(&mut self) -> Option<Arc<Snapshot<T>>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Convert into a `Stream`. Yields the current snapshot first.
    pub fn into_stream(self) -> SnapshotWatchStream<T> {
        SnapshotWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct SnapshotWatchStream<T> {
    inner: WatchStream<Arc<Snapshot<T>>>,
}

impl<T: Send + Sync + 'static> Stream for SnapshotWatchStream<T> {
    type Item = Arc<Snapshot<T>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::store::SnapshotStore;
    use crate::store::tests::room;

    #[tokio::test]
    async fn changed_yields_new_snapshot() {
        let store = SnapshotStore::new();
        let mut stream = store.subscribe_rooms();
        assert!(stream.current().is_empty());

        let seq = store.next_sequence();
        store.apply_rooms(seq, vec![room("r1", "101")]);

        let snap = stream.changed().await.unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(stream.current().len(), 1);
    }

    #[tokio::test]
    async fn changed_ends_when_store_dropped() {
        let store = SnapshotStore::new();
        let mut stream = store.subscribe_guests();
        drop(store);
        assert!(stream.changed().await.is_none());
    }
}
