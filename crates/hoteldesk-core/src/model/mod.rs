// ── Domain model ──

pub mod booking;
pub mod entity_id;
pub mod guest;
pub mod room;

pub use booking::{Booking, BookingStatus, PaymentStatus};
pub use entity_id::{EntityId, Identified};
pub use guest::{Address, Guest};
pub use room::{Room, RoomStatus, RoomType};

/// First letter upper-cased, as the tables show wire values ("family" →
/// "Family").
pub(crate) fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
