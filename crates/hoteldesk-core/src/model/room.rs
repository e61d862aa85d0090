// ── Room domain types ──

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::capitalize;
use super::entity_id::{EntityId, Identified};

/// Room category. Values are matched exactly; anything else is kept
/// verbatim in `Other` and written back unchanged on update.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoomType {
    #[default]
    Single,
    Double,
    Suite,
    Deluxe,
    #[serde(untagged)]
    #[strum(default)]
    Other(String),
}

impl RoomType {
    pub fn from_wire(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| Self::Other(raw.to_owned()))
    }

    /// Capitalized label for tables ("Suite").
    pub fn label(&self) -> Cow<'static, str> {
        match self {
            Self::Single => "Single".into(),
            Self::Double => "Double".into(),
            Self::Suite => "Suite".into(),
            Self::Deluxe => "Deluxe".into(),
            Self::Other(raw) => capitalize(raw).into(),
        }
    }
}

/// Operational status. Only `Available` rooms are offered for booking.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
    #[serde(untagged)]
    #[strum(default)]
    Other(String),
}

impl RoomStatus {
    pub fn from_wire(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| Self::Other(raw.to_owned()))
    }

    pub fn label(&self) -> Cow<'static, str> {
        match self {
            Self::Available => "Available".into(),
            Self::Occupied => "Occupied".into(),
            Self::Maintenance => "Maintenance".into(),
            Self::Other(raw) => capitalize(raw).into(),
        }
    }

    pub fn is_bookable(&self) -> bool {
        *self == Self::Available
    }
}

/// A hotel room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: EntityId,
    pub number: String,
    pub room_type: RoomType,
    /// Nightly price in pesos. Never negative.
    pub price: f64,
    pub status: RoomStatus,
    pub capacity: u32,
    pub amenities: Vec<String>,
}

impl Identified for Room {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_match_exactly() {
        assert_eq!(RoomType::from_wire("suite"), RoomType::Suite);
        assert_eq!(RoomStatus::from_wire("maintenance"), RoomStatus::Maintenance);
        assert_eq!(
            RoomStatus::from_wire("Maintenance"),
            RoomStatus::Other("Maintenance".into())
        );
    }

    #[test]
    fn unknown_values_keep_their_text() {
        let family = RoomType::from_wire("family");
        assert_eq!(family, RoomType::Other("family".into()));
        assert_eq!(family.to_string(), "family");
        assert_eq!(family.label(), "Family");

        let cleaning = RoomStatus::from_wire("cleaning");
        assert_eq!(cleaning.to_string(), "cleaning");
        assert_eq!(cleaning.label(), "Cleaning");
        assert!(!cleaning.is_bookable());
        assert_eq!(RoomStatus::from_wire("").label(), "");
    }

    #[test]
    fn display_is_the_wire_value() {
        assert_eq!(RoomType::Deluxe.to_string(), "deluxe");
        assert_eq!(RoomStatus::Occupied.to_string(), "occupied");
        assert_eq!(RoomStatus::Occupied.label(), "Occupied");
    }

    #[test]
    fn serde_writes_unknown_values_bare() {
        let json = serde_json::to_string(&RoomType::Other("family".into())).unwrap();
        assert_eq!(json, "\"family\"");
        let back: RoomType = serde_json::from_str("\"family\"").unwrap();
        assert_eq!(back, RoomType::Other("family".into()));
        let known: RoomStatus = serde_json::from_str("\"occupied\"").unwrap();
        assert_eq!(known, RoomStatus::Occupied);
    }
}
