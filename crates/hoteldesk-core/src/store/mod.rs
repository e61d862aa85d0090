// ── Local snapshot store ──
//
// Holds the last-fetched rooms, guests, and bookings. Each collection is
// replaced wholesale, never merged. A monotonically increasing sequence
// number orders reloads so a slow, older response can't overwrite a newer
// one.

mod collection;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use collection::Snapshot;
use collection::SnapshotCollection;

use crate::model::{Booking, Guest, Room};
use crate::stream::SnapshotStream;

/// In-memory copy of the three remote collections.
pub struct SnapshotStore {
    rooms: SnapshotCollection<Room>,
    guests: SnapshotCollection<Guest>,
    bookings: SnapshotCollection<Booking>,
    sequence: AtomicU64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            rooms: SnapshotCollection::new("rooms"),
            guests: SnapshotCollection::new("guests"),
            bookings: SnapshotCollection::new("bookings"),
            sequence: AtomicU64::new(0),
        }
    }

    /// Allocate the tag for a new reload. Strictly increasing.
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    // ── Replacement ──────────────────────────────────────────────────

    /// Returns `false` if a newer reload already replaced rooms.
    pub fn apply_rooms(&self, seq: u64, rooms: Vec<Room>) -> bool {
        self.rooms.replace(seq, rooms)
    }

    pub fn apply_guests(&self, seq: u64, guests: Vec<Guest>) -> bool {
        self.guests.replace(seq, guests)
    }

    pub fn apply_bookings(&self, seq: u64, bookings: Vec<Booking>) -> bool {
        self.bookings.replace(seq, bookings)
    }

    /// Empty every collection locally. Reloads started before the clear
    /// can no longer repopulate it.
    pub fn clear(&self) {
        let seq = self.next_sequence();
        self.rooms.replace(seq, Vec::new());
        self.guests.replace(seq, Vec::new());
        self.bookings.replace(seq, Vec::new());
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn rooms(&self) -> Arc<Snapshot<Room>> {
        self.rooms.snapshot()
    }

    pub fn guests(&self) -> Arc<Snapshot<Guest>> {
        self.guests.snapshot()
    }

    pub fn bookings(&self) -> Arc<Snapshot<Booking>> {
        self.bookings.snapshot()
    }

    /// All three collections at once, for projections that join them.
    pub fn current(&self) -> HotelSnapshot {
        HotelSnapshot {
            rooms: self.rooms(),
            guests: self.guests(),
            bookings: self.bookings(),
        }
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn room(&self, id: &str) -> Option<Arc<Room>> {
        self.rooms.snapshot().get(id).cloned()
    }

    pub fn guest(&self, id: &str) -> Option<Arc<Guest>> {
        self.guests.snapshot().get(id).cloned()
    }

    pub fn booking(&self, id: &str) -> Option<Arc<Booking>> {
        self.bookings.snapshot().get(id).cloned()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_rooms(&self) -> SnapshotStream<Room> {
        SnapshotStream::new(self.rooms.subscribe())
    }

    pub fn subscribe_guests(&self) -> SnapshotStream<Guest> {
        SnapshotStream::new(self.guests.subscribe())
    }

    pub fn subscribe_bookings(&self) -> SnapshotStream<Booking> {
        SnapshotStream::new(self.bookings.subscribe())
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The three collections captured together.
///
/// Each part is an independent snapshot; they may come from different
/// reloads when one list request failed.
#[derive(Debug, Clone, Default)]
pub struct HotelSnapshot {
    pub rooms: Arc<Snapshot<Room>>,
    pub guests: Arc<Snapshot<Guest>>,
    pub bookings: Arc<Snapshot<Booking>>,
}

impl HotelSnapshot {
    pub fn from_parts(rooms: Vec<Room>, guests: Vec<Guest>, bookings: Vec<Booking>) -> Self {
        Self {
            rooms: Arc::new(Snapshot::from_items(rooms)),
            guests: Arc::new(Snapshot::from_items(guests)),
            bookings: Arc::new(Snapshot::from_items(bookings)),
        }
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id).map(AsRef::as_ref)
    }

    pub fn guest(&self, id: &str) -> Option<&Guest> {
        self.guests.get(id).map(AsRef::as_ref)
    }

    pub fn booking(&self, id: &str) -> Option<&Booking> {
        self.bookings.get(id).map(AsRef::as_ref)
    }
}
