// ── Form state ──
//
// Editable, string-backed state for the room, guest, and booking forms.
// Forms pre-fill from snapshot lookups; a missing id leaves them in create
// mode. Parsing into request payloads happens on submit.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use hoteldesk_api::{AddressPayload, BookingPayload, GuestPayload, RoomPayload};

use crate::error::ValidationError;
use crate::model::{
    BookingStatus, EntityId, Guest, PaymentStatus, Room, RoomStatus, RoomType,
};
use crate::pricing::{self, Quote};
use crate::store::HotelSnapshot;
use crate::validation::{self, BookingRequest};

/// Amenities offered as toggles in the room form.
pub const AMENITY_CHOICES: [&str; 6] = ["wifi", "tv", "ac", "minibar", "balcony", "jacuzzi"];

/// Identity documents offered in the guest form.
pub const ID_PROOF_CHOICES: [&str; 4] = ["passport", "drivers-license", "national-id", "other"];

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(value.to_owned())
    }
}

fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate { field })
}

// ── Room form ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomForm {
    /// `Some` when editing an existing room.
    pub id: Option<EntityId>,
    pub number: String,
    pub room_type: RoomType,
    pub price: String,
    pub capacity: String,
    pub status: RoomStatus,
    pub amenities: Vec<String>,
}

impl RoomForm {
    pub fn from_room(room: &Room) -> Self {
        Self {
            id: Some(room.id.clone()),
            number: room.number.clone(),
            room_type: room.room_type.clone(),
            price: room.price.to_string(),
            capacity: room.capacity.to_string(),
            status: room.status.clone(),
            amenities: room.amenities.clone(),
        }
    }

    /// Edit form for `id` if it is in the snapshot, else a blank create form.
    pub fn prefill(snapshot: &HotelSnapshot, id: Option<&str>) -> Self {
        id.and_then(|id| snapshot.room(id))
            .map_or_else(Self::default, Self::from_room)
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.iter().any(|a| a == amenity)
    }

    pub fn toggle_amenity(&mut self, amenity: &str) {
        if self.has_amenity(amenity) {
            self.amenities.retain(|a| a != amenity);
        } else {
            self.amenities.push(amenity.to_owned());
        }
    }

    pub fn to_payload(&self) -> Result<RoomPayload, ValidationError> {
        let number = required(&self.number, "Room number")?;
        let price: f64 = required(&self.price, "Price")?
            .parse()
            .ok()
            .filter(|p: &f64| p.is_finite() && *p >= 0.0)
            .ok_or(ValidationError::InvalidNumber { field: "Price" })?;
        let capacity: u32 = required(&self.capacity, "Capacity")?
            .parse()
            .ok()
            .filter(|c| *c > 0)
            .ok_or(ValidationError::InvalidNumber { field: "Capacity" })?;

        Ok(RoomPayload {
            number,
            room_type: self.room_type.to_string(),
            price,
            capacity,
            status: self.status.to_string(),
            amenities: self.amenities.clone(),
        })
    }
}

// ── Guest form ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestForm {
    pub id: Option<EntityId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub id_proof: String,
    pub id_number: String,
    pub street: String,
    pub city: String,
    pub country: String,
}

impl Default for GuestForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            id_proof: ID_PROOF_CHOICES[0].to_owned(),
            id_number: String::new(),
            street: String::new(),
            city: String::new(),
            country: String::new(),
        }
    }
}

impl GuestForm {
    pub fn from_guest(guest: &Guest) -> Self {
        let address = guest.address.clone().unwrap_or_default();
        Self {
            id: Some(guest.id.clone()),
            name: guest.name.clone(),
            email: guest.email.clone(),
            phone: guest.phone.clone(),
            id_proof: guest.id_proof.clone(),
            id_number: guest.id_number.clone(),
            street: address.street.unwrap_or_default(),
            city: address.city.unwrap_or_default(),
            country: address.country.unwrap_or_default(),
        }
    }

    pub fn prefill(snapshot: &HotelSnapshot, id: Option<&str>) -> Self {
        id.and_then(|id| snapshot.guest(id))
            .map_or_else(Self::default, Self::from_guest)
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn to_payload(&self) -> Result<GuestPayload, ValidationError> {
        Ok(GuestPayload {
            name: required(&self.name, "Name")?,
            email: required(&self.email, "Email")?,
            phone: required(&self.phone, "Phone")?,
            id_proof: required(&self.id_proof, "ID proof")?,
            id_number: required(&self.id_number, "ID number")?,
            address: AddressPayload {
                street: self.street.trim().to_owned(),
                city: self.city.trim().to_owned(),
                country: self.country.trim().to_owned(),
            },
        })
    }
}

// ── Booking form ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    pub guest_id: String,
    pub room_id: String,
    /// `YYYY-MM-DD`
    pub check_in: String,
    /// `YYYY-MM-DD`
    pub check_out: String,
    pub number_of_guests: String,
    pub payment_status: PaymentStatus,
    pub special_requests: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            guest_id: String::new(),
            room_id: String::new(),
            check_in: String::new(),
            check_out: String::new(),
            number_of_guests: "1".to_owned(),
            payment_status: PaymentStatus::Pending,
            special_requests: String::new(),
        }
    }
}

impl BookingForm {
    /// Blank form with check-in today and check-out tomorrow.
    pub fn with_default_dates(today: NaiveDate) -> Self {
        let mut form = Self::default();
        form.reset_dates(today);
        form
    }

    /// Check-in = `today`, check-out = the day after.
    pub fn reset_dates(&mut self, today: NaiveDate) {
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
        self.check_in = today.format("%Y-%m-%d").to_string();
        self.check_out = tomorrow.format("%Y-%m-%d").to_string();
    }

    pub fn check_in_date(&self) -> Option<NaiveDate> {
        parse_date(&self.check_in, "Check-in").ok()
    }

    pub fn check_out_date(&self) -> Option<NaiveDate> {
        parse_date(&self.check_out, "Check-out").ok()
    }

    /// Live quote for the selected room and dates, if all are present.
    pub fn quote(&self, snapshot: &HotelSnapshot) -> Option<Quote> {
        let room = snapshot.room(self.room_id.trim())?;
        pricing::quote(room.price, self.check_in_date()?, self.check_out_date()?)
    }

    /// Parse the string fields into a typed request.
    pub fn parse(&self) -> Result<BookingRequest, ValidationError> {
        let guest_id = self.guest_id.trim();
        if guest_id.is_empty() {
            return Err(ValidationError::MissingGuest);
        }
        let room_id = self.room_id.trim();
        if room_id.is_empty() {
            return Err(ValidationError::MissingRoom);
        }
        let number_of_guests: u32 = self
            .number_of_guests
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidNumber {
                field: "Number of guests",
            })?;

        Ok(BookingRequest {
            guest_id: EntityId::from(guest_id),
            room_id: EntityId::from(room_id),
            check_in: parse_date(&self.check_in, "Check-in")?,
            check_out: parse_date(&self.check_out, "Check-out")?,
            number_of_guests,
            payment_status: self.payment_status.clone(),
            special_requests: self.special_requests.trim().to_owned(),
        })
    }

    /// Parse, validate against the snapshot, and build the create payload.
    ///
    /// The payload always carries status `confirmed` and, when the room is
    /// known, the computed `totalAmount`.
    pub fn submission(&self, snapshot: &HotelSnapshot) -> Result<BookingPayload, ValidationError> {
        let request = self.parse()?;
        let room = snapshot.room(request.room_id.as_str());
        validation::validate_booking(&request, room)?;

        let total_amount = room
            .and_then(|r| pricing::quote(r.price, request.check_in, request.check_out))
            .map(|q| q.total);

        Ok(BookingPayload {
            guest_id: request.guest_id.to_string(),
            room_id: request.room_id.to_string(),
            check_in: request.check_in.format("%Y-%m-%d").to_string(),
            check_out: request.check_out.format("%Y-%m-%d").to_string(),
            number_of_guests: request.number_of_guests,
            payment_status: request.payment_status.to_string(),
            special_requests: request.special_requests,
            status: BookingStatus::Confirmed.to_string(),
            total_amount,
        })
    }
}
