// ── Booking domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::{EntityId, Identified};

/// Payment state of a booking. Unknown values are kept verbatim in
/// `Other`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Partial,
    Refunded,
    #[serde(untagged)]
    #[strum(default)]
    Other(String),
}

impl PaymentStatus {
    pub fn from_wire(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| Self::Other(raw.to_owned()))
    }
}

/// Lifecycle state of a booking. The wire form is kebab-case
/// (`checked-in`).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    #[serde(untagged)]
    #[strum(default)]
    Other(String),
}

impl BookingStatus {
    pub fn from_wire(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| Self::Other(raw.to_owned()))
    }

    /// Confirmed or checked-in bookings count as active on the dashboard.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn)
    }
}

/// A reservation of one room by one guest.
///
/// `guest_id` and `room_id` are weak references; resolve them against the
/// current snapshot and expect misses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: EntityId,
    pub guest_id: EntityId,
    pub room_id: EntityId,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub number_of_guests: u32,
    pub payment_status: Option<PaymentStatus>,
    pub special_requests: Option<String>,
    /// `None` when the server omitted it; displayed as confirmed.
    pub status: Option<BookingStatus>,
    pub total_amount: Option<f64>,
}

impl Booking {
    pub fn effective_status(&self) -> BookingStatus {
        self.status.clone().unwrap_or_default()
    }

    pub fn amount(&self) -> f64 {
        self.total_amount.unwrap_or(0.0)
    }
}

impl Identified for Booking {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_status_uses_kebab_case() {
        assert_eq!(BookingStatus::from_wire("checked-in"), BookingStatus::CheckedIn);
        assert_eq!(BookingStatus::CheckedOut.to_string(), "checked-out");
        assert_eq!(
            BookingStatus::from_wire("on-hold"),
            BookingStatus::Other("on-hold".into())
        );
        assert_eq!(BookingStatus::from_wire("on-hold").to_string(), "on-hold");
    }

    #[test]
    fn active_statuses() {
        assert!(BookingStatus::Confirmed.is_active());
        assert!(BookingStatus::CheckedIn.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
        assert!(!BookingStatus::CheckedOut.is_active());
    }

    #[test]
    fn payment_status_is_case_sensitive() {
        assert_eq!(PaymentStatus::from_wire("paid"), PaymentStatus::Paid);
        assert_eq!(
            PaymentStatus::from_wire("PENDING"),
            PaymentStatus::Other("PENDING".into())
        );
        assert_eq!(PaymentStatus::from_wire("later").to_string(), "later");
    }
}
