// ── Room table filters ──
//
// Optional status AND optional type, applied to the in-memory snapshot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{Room, RoomStatus, RoomType};

/// Filter criteria for the rooms table. An unset field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomFilter {
    pub status: Option<RoomStatus>,
    pub room_type: Option<RoomType>,
}

impl RoomFilter {
    pub fn new(status: Option<RoomStatus>, room_type: Option<RoomType>) -> Self {
        Self { status, room_type }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.room_type.is_none()
    }

    pub fn matches(&self, room: &Room) -> bool {
        self.status.as_ref().is_none_or(|s| room.status == *s)
            && self.room_type.as_ref().is_none_or(|t| room.room_type == *t)
    }

    /// Matching rooms, in snapshot order.
    pub fn apply(&self, rooms: &[Arc<Room>]) -> Vec<Arc<Room>> {
        rooms.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
