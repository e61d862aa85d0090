// ── Booking validation ──
//
// Checks run before a booking create is sent, in this order: a guest and a
// room are selected, at least one guest, check-out after check-in, and the
// party fits the room. The capacity check is skipped when the room is not
// in the current snapshot.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::{EntityId, PaymentStatus, Room};

/// A parsed booking request, ready for validation and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub guest_id: EntityId,
    pub room_id: EntityId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub number_of_guests: u32,
    pub payment_status: PaymentStatus,
    pub special_requests: String,
}

/// Validate `request` against the selected room, if it is known.
pub fn validate_booking(
    request: &BookingRequest,
    room: Option<&Room>,
) -> Result<(), ValidationError> {
    if request.guest_id.is_empty() {
        return Err(ValidationError::MissingGuest);
    }
    if request.room_id.is_empty() {
        return Err(ValidationError::MissingRoom);
    }
    if request.number_of_guests == 0 {
        return Err(ValidationError::NoGuests);
    }
    if request.check_in >= request.check_out {
        return Err(ValidationError::CheckOutNotAfterCheckIn);
    }
    if let Some(room) = room.filter(|r| request.number_of_guests > r.capacity) {
        return Err(ValidationError::CapacityExceeded { max: room.capacity });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::tests::room;

    type Ymd = (i32, u32, u32);

    fn date((y, m, d): Ymd) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(guests: u32, check_in: Ymd, check_out: Ymd) -> BookingRequest {
        BookingRequest {
            guest_id: EntityId::from("g1"),
            room_id: EntityId::from("r1"),
            check_in: date(check_in),
            check_out: date(check_out),
            number_of_guests: guests,
            payment_status: PaymentStatus::Pending,
            special_requests: String::new(),
        }
    }

    #[test]
    fn valid_request_passes() {
        let r = room("r1", "101");
        let req = request(2, (2024, 1, 1), (2024, 1, 3));
        assert_eq!(validate_booking(&req, Some(&r)), Ok(()));
    }

    #[test]
    fn check_out_must_follow_check_in() {
        let r = room("r1", "101");
        let req = request(1, (2024, 1, 3), (2024, 1, 3));
        let err = validate_booking(&req, Some(&r)).unwrap_err();
        assert_eq!(err, ValidationError::CheckOutNotAfterCheckIn);
        assert_eq!(err.to_string(), "Check-out date must be after check-in date");
    }

    #[test]
    fn capacity_exceeded_blocks() {
        let r = room("r1", "101");
        let req = request(3, (2024, 1, 1), (2024, 1, 2));
        let err = validate_booking(&req, Some(&r)).unwrap_err();
        assert_eq!(err.to_string(), "Number of guests exceeds room capacity (max: 2)");
    }

    #[test]
    fn equal_capacity_is_allowed() {
        let r = room("r1", "101");
        let req = request(2, (2024, 1, 1), (2024, 1, 2));
        assert!(validate_booking(&req, Some(&r)).is_ok());
    }

    #[test]
    fn unknown_room_skips_capacity() {
        let req = request(40, (2024, 1, 1), (2024, 1, 2));
        assert!(validate_booking(&req, None).is_ok());
    }

    #[test]
    fn selections_are_required() {
        let mut req = request(1, (2024, 1, 1), (2024, 1, 2));
        req.guest_id = EntityId::from("");
        assert_eq!(validate_booking(&req, None), Err(ValidationError::MissingGuest));

        let mut req = request(1, (2024, 1, 1), (2024, 1, 2));
        req.room_id = EntityId::from("");
        assert_eq!(validate_booking(&req, None), Err(ValidationError::MissingRoom));

        let req = request(0, (2024, 1, 1), (2024, 1, 2));
        assert_eq!(validate_booking(&req, None), Err(ValidationError::NoGuests));
    }
}
