// ── Wire → domain conversion ──
//
// Maps the lenient `hoteldesk-api` records onto canonical domain types.
// Unknown enum values are kept verbatim in `Other`; unparseable dates
// become `None`.

use chrono::{DateTime, NaiveDate};

use hoteldesk_api::{AddressRecord, BookingRecord, GuestRecord, RoomRecord};

use crate::model::{
    Address, Booking, BookingStatus, EntityId, Guest, PaymentStatus, Room, RoomStatus, RoomType,
};

/// Parse a wire date. Accepts `YYYY-MM-DD` and full ISO-8601 timestamps;
/// only the calendar date written in the string is kept.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<RoomRecord> for Room {
    fn from(r: RoomRecord) -> Self {
        Room {
            id: EntityId::from(r.id),
            number: r.number,
            room_type: RoomType::from_wire(&r.room_type),
            price: r.price.max(0.0),
            status: RoomStatus::from_wire(&r.status),
            capacity: r.capacity,
            amenities: r.amenities,
        }
    }
}

impl From<AddressRecord> for Address {
    fn from(a: AddressRecord) -> Self {
        Address {
            street: non_blank(a.street),
            city: non_blank(a.city),
            country: non_blank(a.country),
        }
    }
}

impl From<GuestRecord> for Guest {
    fn from(g: GuestRecord) -> Self {
        Guest {
            id: EntityId::from(g.id),
            name: g.name,
            email: g.email,
            phone: g.phone,
            id_proof: g.id_proof,
            id_number: g.id_number,
            address: g.address.map(Address::from),
        }
    }
}

impl From<BookingRecord> for Booking {
    fn from(b: BookingRecord) -> Self {
        Booking {
            id: EntityId::from(b.id),
            guest_id: EntityId::from(b.guest_id),
            room_id: EntityId::from(b.room_id),
            check_in: b.check_in.as_deref().and_then(parse_wire_date),
            check_out: b.check_out.as_deref().and_then(parse_wire_date),
            number_of_guests: b.number_of_guests,
            payment_status: non_blank(b.payment_status).map(|s| PaymentStatus::from_wire(&s)),
            special_requests: non_blank(b.special_requests),
            status: non_blank(b.status).map(|s| BookingStatus::from_wire(&s)),
            total_amount: b.total_amount,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_iso_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(parse_wire_date("2024-01-01"), Some(expected));
        assert_eq!(parse_wire_date("2024-01-01T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_wire_date("2024-01-01T23:30:00+08:00"), Some(expected));
        assert_eq!(parse_wire_date("01/01/2024"), None);
        assert_eq!(parse_wire_date(""), None);
    }

    #[test]
    fn booking_conversion_keeps_missing_status_absent() {
        let record = BookingRecord {
            id: "b1".into(),
            guest_id: "g1".into(),
            room_id: "r1".into(),
            check_in: Some("2024-01-01T00:00:00.000Z".into()),
            check_out: Some("2024-01-03".into()),
            number_of_guests: 2,
            payment_status: Some("pending".into()),
            special_requests: Some(String::new()),
            status: None,
            total_amount: None,
        };
        let booking = Booking::from(record);
        assert_eq!(booking.status, None);
        assert_eq!(booking.effective_status(), BookingStatus::Confirmed);
        assert_eq!(booking.payment_status, Some(PaymentStatus::Pending));
        assert_eq!(booking.special_requests, None);
        assert_eq!(booking.amount(), 0.0);
    }

    #[test]
    fn negative_prices_are_clamped() {
        let room = Room::from(RoomRecord {
            id: "r1".into(),
            number: "101".into(),
            room_type: "suite".into(),
            price: -5.0,
            status: "available".into(),
            capacity: 2,
            amenities: vec![],
        });
        assert_eq!(room.price, 0.0);
        assert_eq!(room.room_type, RoomType::Suite);
    }
}
