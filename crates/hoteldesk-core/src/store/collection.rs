// ── Sequenced snapshot collection ──
//
// One collection (rooms, guests, or bookings) held as an immutable
// snapshot behind a `watch` channel. Replacements carry the reload
// sequence that produced them; anything older than what is already
// applied is dropped.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::model::{EntityId, Identified};

/// Immutable, fully-replaced view of one collection.
#[derive(Debug)]
pub struct Snapshot<T> {
    items: Vec<Arc<T>>,
    index: HashMap<EntityId, usize>,
    seq: u64,
}

impl<T: Identified> Snapshot<T> {
    pub(crate) fn new(seq: u64, items: Vec<T>) -> Self {
        let items: Vec<Arc<T>> = items.into_iter().map(Arc::new).collect();
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            // First occurrence wins if the server ever repeats an id.
            index.entry(item.id().clone()).or_insert(pos);
        }
        Self { items, index, seq }
    }

    /// Build a snapshot outside the store (tests, offline rendering).
    pub fn from_items(items: Vec<T>) -> Self {
        Self::new(0, items)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<T>> {
        self.index.get(id).and_then(|&pos| self.items.get(pos))
    }
}

impl<T> Snapshot<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
            seq: 0,
        }
    }

    /// Items in server order.
    pub fn items(&self) -> &[Arc<T>] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reload sequence that produced this snapshot (0 = never loaded).
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Reactive holder for one collection's current snapshot.
pub(crate) struct SnapshotCollection<T> {
    name: &'static str,
    snapshot: watch::Sender<Arc<Snapshot<T>>>,
}

impl<T: Identified + Send + Sync + 'static> SnapshotCollection<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Snapshot::empty()));
        Self { name, snapshot }
    }

    /// Replace the whole collection with `items` tagged `seq`.
    ///
    /// Returns `false` (and leaves the snapshot untouched) when a newer
    /// sequence has already been applied.
    pub(crate) fn replace(&self, seq: u64, items: Vec<T>) -> bool {
        let name = self.name;
        let mut incoming = Some(items);
        // `send_if_modified` updates even with zero receivers and only
        // notifies when the closure reports a change.
        self.snapshot.send_if_modified(|current| {
            if seq < current.seq {
                debug!(
                    collection = name,
                    seq,
                    applied = current.seq,
                    "discarding stale reload response"
                );
                return false;
            }
            let items = incoming.take().unwrap_or_default();
            *current = Arc::new(Snapshot::new(seq, items));
            true
        })
    }

    /// Current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Snapshot<T>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Snapshot<T>>> {
        self.snapshot.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        id: EntityId,
        label: &'static str,
    }

    impl Identified for Item {
        fn id(&self) -> &EntityId {
            &self.id
        }
    }

    fn item(id: &str, label: &'static str) -> Item {
        Item {
            id: EntityId::from(id),
            label,
        }
    }

    #[test]
    fn replace_swaps_whole_collection() {
        let col = SnapshotCollection::new("items");
        assert!(col.replace(1, vec![item("a", "x"), item("b", "y")]));
        assert!(col.replace(2, vec![item("c", "z")]));

        let snap = col.snapshot();
        assert_eq!(snap.len(), 1);
        assert!(snap.get("a").is_none());
        assert_eq!(snap.get("c").unwrap().label, "z");
        assert_eq!(snap.seq(), 2);
    }

    #[test]
    fn stale_sequence_is_discarded() {
        let col = SnapshotCollection::new("items");
        assert!(col.replace(5, vec![item("new", "fresh")]));
        assert!(!col.replace(4, vec![item("old", "stale")]));

        let snap = col.snapshot();
        assert!(snap.get("new").is_some());
        assert!(snap.get("old").is_none());
        assert_eq!(snap.seq(), 5);
    }

    #[test]
    fn subscribers_see_replacements_but_not_stale_ones() {
        let col = SnapshotCollection::new("items");
        let mut rx = col.subscribe();

        col.replace(2, vec![item("a", "x")]);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        col.replace(1, vec![]);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn duplicate_ids_resolve_to_first() {
        let snap = Snapshot::from_items(vec![item("a", "first"), item("a", "second")]);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get("a").unwrap().label, "first");
    }
}
