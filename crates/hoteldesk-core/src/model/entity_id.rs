// ── Record identity ──
//
// Every record is keyed by the backend's document id (`_id`). References
// between records (booking → guest, booking → room) are weak: they hold the
// id only and may point at something that no longer exists.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque backend document id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First eight characters, as shown in the bookings table.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Anything stored in a snapshot collection.
pub trait Identified {
    fn id(&self) -> &EntityId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_takes_first_eight_chars() {
        let id = EntityId::from("65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(id.short(), "65a1f0c2");
    }

    #[test]
    fn short_keeps_short_ids_whole() {
        assert_eq!(EntityId::from("abc").short(), "abc");
        assert_eq!(EntityId::from("12345678").short(), "12345678");
    }
}
