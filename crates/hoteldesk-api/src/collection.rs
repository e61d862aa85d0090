// Resource collections exposed by the hotel API
//
// Every collection lives under `{base}/api/{path}` and shares the same
// list / create / update / delete verbs.

use std::fmt;

/// One of the three server-side resource collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Rooms,
    Guests,
    Bookings,
}

impl Collection {
    /// All collections, in reload order.
    pub const ALL: [Collection; 3] = [Self::Rooms, Self::Guests, Self::Bookings];

    /// URL path segment under `/api/`.
    pub fn path(self) -> &'static str {
        match self {
            Self::Rooms => "rooms",
            Self::Guests => "guests",
            Self::Bookings => "bookings",
        }
    }

    /// Singular noun used in messages ("room", "guest", "booking").
    pub fn singular(self) -> &'static str {
        match self {
            Self::Rooms => "room",
            Self::Guests => "guest",
            Self::Bookings => "booking",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
