// ── View projections ──
//
// Pure functions from the snapshot (plus filters) to display rows. The CLI
// and TUI only adapt these rows to their widgets; every placeholder and
// default lives here so both front ends render identically.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::filter::RoomFilter;
use crate::model::{Booking, BookingStatus, EntityId, Guest, Room, RoomStatus};
use crate::pricing::{self, Quote};
use crate::store::{HotelSnapshot, Snapshot};

// ── Placeholders ─────────────────────────────────────────────────────

pub const GUEST_NOT_FOUND: &str = "Guest not found";
pub const ROOM_NOT_FOUND: &str = "Room not found";
pub const NO_ROOMS: &str = "No rooms found";
pub const NO_GUESTS: &str = "No guests found";
pub const NO_BOOKINGS: &str = "No bookings found";

// ── Formatting ───────────────────────────────────────────────────────

/// Thousands-separated amount with at most two decimals: `4000` → `4,000`,
/// `2500.5` → `2,500.5`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    match frac {
        0 => format!("{sign}{grouped}"),
        f if f % 10 == 0 => format!("{sign}{grouped}.{}", f / 10),
        f => format!("{sign}{grouped}.{f:02}"),
    }
}

/// `₱4,000`
pub fn format_peso(value: f64) -> String {
    format!("₱{}", format_amount(value))
}

/// `YYYY-MM-DD`, or `-` when unknown.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_owned(), |d| d.format("%Y-%m-%d").to_string())
}

// ── Rooms ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomRow {
    pub id: EntityId,
    pub number: String,
    pub room_type: String,
    pub price: String,
    pub status: RoomStatus,
    pub capacity: String,
    pub amenities: String,
}

impl RoomRow {
    pub fn from_room(room: &Room) -> Self {
        Self {
            id: room.id.clone(),
            number: room.number.clone(),
            room_type: room.room_type.label().into_owned(),
            price: format_peso(room.price),
            status: room.status.clone(),
            capacity: format!("{} guest(s)", room.capacity),
            amenities: room.amenities.join(", "),
        }
    }
}

/// Room table rows matching `filter`, in snapshot order.
pub fn room_rows(rooms: &Snapshot<Room>, filter: &RoomFilter) -> Vec<RoomRow> {
    rooms
        .iter()
        .filter(|r| filter.matches(r))
        .map(RoomRow::from_room)
        .collect()
}

// ── Guests ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestRow {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub id_document: String,
    pub address: String,
}

impl GuestRow {
    pub fn from_guest(guest: &Guest) -> Self {
        Self {
            id: guest.id.clone(),
            name: guest.name.clone(),
            email: guest.email.clone(),
            phone: guest.phone.clone(),
            id_document: guest.id_document(),
            address: guest.address_line(),
        }
    }
}

pub fn guest_rows(guests: &Snapshot<Guest>) -> Vec<GuestRow> {
    guests.iter().map(GuestRow::from_guest).collect()
}

// ── Bookings ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRow {
    pub id: EntityId,
    /// First 8 characters of the id, or "N/A".
    pub short_id: String,
    pub guest_name: String,
    pub room_number: String,
    pub check_in: String,
    pub check_out: String,
    pub status: BookingStatus,
    pub amount: String,
}

impl BookingRow {
    /// Row for one booking with guest and room references resolved against
    /// `snapshot`. Dangling references render as placeholders.
    pub fn from_booking(snapshot: &HotelSnapshot, b: &Booking) -> Self {
        let guest_name = snapshot
            .guest(b.guest_id.as_str())
            .map(|g| g.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| GUEST_NOT_FOUND.to_owned());
        let room_number = snapshot
            .room(b.room_id.as_str())
            .map(|r| r.number.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| ROOM_NOT_FOUND.to_owned());

        Self {
            id: b.id.clone(),
            short_id: if b.id.is_empty() {
                "N/A".to_owned()
            } else {
                b.id.short().to_owned()
            },
            guest_name,
            room_number,
            check_in: format_date(b.check_in),
            check_out: format_date(b.check_out),
            status: b.effective_status(),
            amount: format_peso(b.amount()),
        }
    }
}

/// Booking table rows, in snapshot order.
pub fn booking_rows(snapshot: &HotelSnapshot) -> Vec<BookingRow> {
    snapshot
        .bookings
        .iter()
        .map(|b| BookingRow::from_booking(snapshot, b))
        .collect()
}

// ── Booking form options ─────────────────────────────────────────────

/// One entry in a selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub id: EntityId,
    pub label: String,
}

/// Bookable rooms only:
/// "101 - double (₱2,000/night, Capacity: 2)".
pub fn room_options(rooms: &Snapshot<Room>) -> Vec<SelectOption> {
    rooms
        .iter()
        .filter(|r| r.status.is_bookable())
        .map(|r| SelectOption {
            id: r.id.clone(),
            label: format!(
                "{} - {} ({}/night, Capacity: {})",
                r.number,
                r.room_type,
                format_peso(r.price),
                r.capacity
            ),
        })
        .collect()
}

/// "Ana Cruz (ana@example.com)"
pub fn guest_options(guests: &Snapshot<Guest>) -> Vec<SelectOption> {
    guests
        .iter()
        .map(|g| SelectOption {
            id: g.id.clone(),
            label: format!("{} ({})", g.name, g.email),
        })
        .collect()
}

// ── Booking preview ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestPreview {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub id_document: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomPreview {
    pub number: String,
    pub room_type: String,
    pub price: String,
    pub capacity: u32,
    pub amenities: String,
}

/// Everything the new-booking form shows beside the inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingPreview {
    pub guest: Option<GuestPreview>,
    pub room: Option<RoomPreview>,
    pub quote: Option<Quote>,
}

pub fn booking_preview(
    snapshot: &HotelSnapshot,
    guest_id: &str,
    room_id: &str,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
) -> BookingPreview {
    let guest = snapshot.guest(guest_id).map(|g| GuestPreview {
        name: g.name.clone(),
        email: g.email.clone(),
        phone: g.phone.clone(),
        id_document: g.id_document(),
    });
    let room = snapshot.room(room_id);
    let quote = match (room, check_in, check_out) {
        (Some(r), Some(ci), Some(co)) => pricing::quote(r.price, ci, co),
        _ => None,
    };
    let room = room.map(|r| RoomPreview {
        number: r.number.clone(),
        room_type: r.room_type.label().into_owned(),
        price: format_amount(r.price),
        capacity: r.capacity,
        amenities: r.amenities.join(", "),
    });

    BookingPreview { guest, room, quote }
}

// ── Guest bookings ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestBookingEntry {
    pub booking_id: EntityId,
    /// Room number, or "N/A" when the room is gone.
    pub room_number: String,
    pub status: BookingStatus,
    pub check_in: String,
    pub check_out: String,
    pub amount: String,
}

/// A guest's bookings, rendered as a summary message via `Display`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestBookings {
    pub guest_name: String,
    pub entries: Vec<GuestBookingEntry>,
}

impl fmt::Display for GuestBookings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "{} has no bookings.", self.guest_name);
        }

        write!(f, "Bookings for {}:", self.guest_name)?;
        for (i, e) in self.entries.iter().enumerate() {
            write!(
                f,
                "\n\n{}. Room {} - {}\n   Check-in: {}\n   Check-out: {}\n   Amount: {}",
                i + 1,
                e.room_number,
                e.status,
                e.check_in,
                e.check_out,
                e.amount
            )?;
        }
        Ok(())
    }
}

/// Bookings belonging to `guest_id`. `None` when the guest is not in the
/// snapshot.
pub fn guest_bookings(snapshot: &HotelSnapshot, guest_id: &str) -> Option<GuestBookings> {
    let guest = snapshot.guest(guest_id)?;
    let entries = snapshot
        .bookings
        .iter()
        .filter(|b| b.guest_id.as_str() == guest_id)
        .map(|b| GuestBookingEntry {
            booking_id: b.id.clone(),
            room_number: snapshot
                .room(b.room_id.as_str())
                .map_or_else(|| "N/A".to_owned(), |r| r.number.clone()),
            status: b.effective_status(),
            check_in: format_date(b.check_in),
            check_out: format_date(b.check_out),
            amount: format_peso(b.amount()),
        })
        .collect();

    Some(GuestBookings {
        guest_name: guest.name.clone(),
        entries,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Address, Booking, PaymentStatus, RoomType};
    use crate::store::tests::room;
    use pretty_assertions::assert_eq;

    fn guest(id: &str, name: &str) -> Guest {
        Guest {
            id: EntityId::from(id),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "0917".into(),
            id_proof: "passport".into(),
            id_number: "P1".into(),
            address: Some(Address {
                street: None,
                city: Some("Manila".into()),
                country: Some("PH".into()),
            }),
        }
    }

    fn booking(id: &str, guest_id: &str, room_id: &str) -> Booking {
        Booking {
            id: EntityId::from(id),
            guest_id: EntityId::from(guest_id),
            room_id: EntityId::from(room_id),
            check_in: NaiveDate::from_ymd_opt(2024, 1, 1),
            check_out: NaiveDate::from_ymd_opt(2024, 1, 3),
            number_of_guests: 2,
            payment_status: Some(PaymentStatus::Paid),
            special_requests: None,
            status: None,
            total_amount: Some(4000.0),
        }
    }

    #[test]
    fn amounts_group_thousands() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(4000.0), "4,000");
        assert_eq!(format_amount(1_234_567.0), "1,234,567");
        assert_eq!(format_amount(2500.5), "2,500.5");
        assert_eq!(format_amount(2500.25), "2,500.25");
        assert_eq!(format_peso(4000.0), "₱4,000");
    }

    #[test]
    fn booking_rows_resolve_references() {
        let snap = HotelSnapshot::from_parts(
            vec![room("r1", "101")],
            vec![guest("g1", "Ana")],
            vec![booking("65a1f0c2e4b0a1b2", "g1", "r1")],
        );
        let rows = booking_rows(&snap);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].short_id, "65a1f0c2");
        assert_eq!(rows[0].guest_name, "Ana");
        assert_eq!(rows[0].room_number, "101");
        assert_eq!(rows[0].status, BookingStatus::Confirmed);
        assert_eq!(rows[0].amount, "₱4,000");
        assert_eq!(rows[0].check_in, "2024-01-01");
    }

    #[test]
    fn dangling_references_render_placeholders() {
        let snap = HotelSnapshot::from_parts(vec![], vec![], vec![booking("b1", "gone", "gone")]);
        let rows = booking_rows(&snap);
        assert_eq!(rows[0].guest_name, GUEST_NOT_FOUND);
        assert_eq!(rows[0].room_number, ROOM_NOT_FOUND);
    }

    #[test]
    fn missing_amount_renders_zero() {
        let mut b = booking("b1", "g1", "r1");
        b.total_amount = None;
        let snap = HotelSnapshot::from_parts(vec![], vec![], vec![b]);
        assert_eq!(booking_rows(&snap)[0].amount, "₱0");
    }

    #[test]
    fn room_rows_apply_filter() {
        let mut busy = room("r2", "102");
        busy.status = RoomStatus::Occupied;
        let rooms = Snapshot::from_items(vec![room("r1", "101"), busy]);

        let rows = room_rows(&rooms, &RoomFilter::new(Some(RoomStatus::Occupied), None));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number, "102");
        assert_eq!(rows[0].capacity, "2 guest(s)");
        assert_eq!(rows[0].room_type, "Double");
    }

    #[test]
    fn unlisted_room_type_shows_capitalized() {
        let mut family = room("r1", "101");
        family.room_type = RoomType::from_wire("family");
        let rows = room_rows(&Snapshot::from_items(vec![family]), &RoomFilter::default());
        assert_eq!(rows[0].room_type, "Family");
    }

    #[test]
    fn room_options_only_available() {
        let mut busy = room("r2", "102");
        busy.status = RoomStatus::Occupied;
        let mut suite = room("r3", "301");
        suite.room_type = RoomType::Suite;
        suite.price = 4500.0;
        suite.capacity = 4;
        let rooms = Snapshot::from_items(vec![room("r1", "101"), busy, suite]);

        let labels: Vec<String> = room_options(&rooms).into_iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            vec![
                "101 - double (₱2,000/night, Capacity: 2)",
                "301 - suite (₱4,500/night, Capacity: 4)",
            ]
        );
    }

    #[test]
    fn guest_option_label() {
        let guests = Snapshot::from_items(vec![guest("g1", "Ana")]);
        assert_eq!(guest_options(&guests)[0].label, "Ana (ana@example.com)");
    }

    #[test]
    fn preview_includes_quote_when_complete() {
        let snap =
            HotelSnapshot::from_parts(vec![room("r1", "101")], vec![guest("g1", "Ana")], vec![]);
        let preview = booking_preview(
            &snap,
            "g1",
            "r1",
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 1, 3),
        );
        assert_eq!(preview.guest.unwrap().id_document, "passport: P1");
        assert_eq!(preview.room.unwrap().amenities, "wifi");
        assert_eq!(preview.quote.unwrap().nights, 2);

        let partial = booking_preview(&snap, "", "r1", NaiveDate::from_ymd_opt(2024, 1, 1), None);
        assert!(partial.guest.is_none());
        assert!(partial.quote.is_none());
    }

    #[test]
    fn guest_bookings_summary() {
        let snap = HotelSnapshot::from_parts(
            vec![room("r1", "101")],
            vec![guest("g1", "Ana"), guest("g2", "Ben")],
            vec![booking("b1", "g1", "r1"), booking("b2", "g1", "gone")],
        );

        let ana = guest_bookings(&snap, "g1").unwrap();
        assert_eq!(ana.entries.len(), 2);
        assert_eq!(ana.entries[1].room_number, "N/A");
        let text = ana.to_string();
        assert!(text.starts_with("Bookings for Ana:\n\n1. Room 101 - confirmed"));
        assert!(text.contains("   Amount: ₱4,000"));

        let ben = guest_bookings(&snap, "g2").unwrap();
        assert_eq!(ben.to_string(), "Ben has no bookings.");

        assert!(guest_bookings(&snap, "nobody").is_none());
    }
}
