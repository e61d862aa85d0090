// Wire types for the hotel management API.
//
// Records are decoded leniently: the backend is a loosely-typed document
// store, so numbers sometimes arrive as strings, optional fields go missing,
// and `amenities` is not always an array. Payloads are what we send back.

use serde::{Deserialize, Serialize};

// ── Records (responses) ──────────────────────────────────────────────

/// A room as returned by `GET /api/rooms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    #[serde(rename = "_id", deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub number: String,
    #[serde(rename = "type", default, deserialize_with = "de::string_lenient")]
    pub room_type: String,
    #[serde(default, deserialize_with = "de::f64_lenient")]
    pub price: f64,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub status: String,
    #[serde(default, deserialize_with = "de::u32_lenient")]
    pub capacity: u32,
    #[serde(default, deserialize_with = "de::string_list")]
    pub amenities: Vec<String>,
}

/// A guest's postal address. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// A guest as returned by `GET /api/guests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    #[serde(rename = "_id", deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub email: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub phone: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub id_proof: String,
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub id_number: String,
    #[serde(default)]
    pub address: Option<AddressRecord>,
}

/// A booking as returned by `GET /api/bookings`.
///
/// `guest_id` / `room_id` accept either a bare id or a populated
/// `{ "_id": ... }` document. Dates are kept as the raw ISO strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    #[serde(rename = "_id", deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::reference")]
    pub guest_id: String,
    #[serde(default, deserialize_with = "de::reference")]
    pub room_id: String,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default, deserialize_with = "de::u32_lenient")]
    pub number_of_guests: u32,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    pub total_amount: Option<f64>,
}

// ── Payloads (requests) ──────────────────────────────────────────────

/// Body for `POST /api/rooms` and `PUT /api/rooms/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price: f64,
    pub capacity: u32,
    pub status: String,
    pub amenities: Vec<String>,
}

/// Address part of a guest payload. Empty strings are sent as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressPayload {
    pub street: String,
    pub city: String,
    pub country: String,
}

/// Body for `POST /api/guests` and `PUT /api/guests/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub id_proof: String,
    pub id_number: String,
    pub address: AddressPayload,
}

/// Body for `POST /api/bookings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub guest_id: String,
    pub room_id: String,
    /// `YYYY-MM-DD`
    pub check_in: String,
    /// `YYYY-MM-DD`
    pub check_out: String,
    pub number_of_guests: u32,
    pub payment_status: String,
    pub special_requests: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
}

// ── Lenient deserializers ────────────────────────────────────────────

mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn scalar_to_string(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Document id: string or number, never missing or null.
    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        let value = Value::deserialize(d)?;
        scalar_to_string(value)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| serde::de::Error::custom("expected a non-empty string or numeric id"))
    }

    /// String, number, or bool rendered as text; null becomes empty.
    pub fn string_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(scalar_to_string(value).unwrap_or_default())
    }

    /// Bare id string, or a populated document carrying `_id`.
    pub fn reference<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(match value {
            Value::Object(mut map) => map
                .remove("_id")
                .and_then(scalar_to_string)
                .unwrap_or_default(),
            other => scalar_to_string(other).unwrap_or_default(),
        })
    }

    fn to_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn f64_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(to_f64(&value).unwrap_or_default())
    }

    pub fn opt_f64_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(to_f64(&value))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::as_conversions
    )]
    pub fn u32_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(to_f64(&value)
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map_or(0, |n| n.min(f64::from(u32::MAX)) as u32))
    }

    /// Array of scalars; anything else (string, null, object) is empty.
    pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(match value {
            Value::Array(items) => items.into_iter().filter_map(scalar_to_string).collect(),
            _ => Vec::new(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn room_decodes_lenient_fields() {
        let room: RoomRecord = serde_json::from_value(json!({
            "_id": "r1",
            "number": 101,
            "type": "suite",
            "price": "2500",
            "status": "available",
            "capacity": "3",
            "amenities": "wifi"
        }))
        .unwrap();

        assert_eq!(room.number, "101");
        assert_eq!(room.price, 2500.0);
        assert_eq!(room.capacity, 3);
        assert!(room.amenities.is_empty());
    }

    #[test]
    fn room_without_id_is_rejected() {
        let result = serde_json::from_value::<RoomRecord>(json!({"number": "101"}));
        assert!(result.is_err());
    }

    #[test]
    fn booking_accepts_populated_references() {
        let booking: BookingRecord = serde_json::from_value(json!({
            "_id": "b1",
            "guestId": {"_id": "g1", "name": "Ana"},
            "roomId": "r1",
            "checkIn": "2024-01-01T00:00:00.000Z",
            "checkOut": "2024-01-03",
            "numberOfGuests": 2,
            "paymentStatus": "pending"
        }))
        .unwrap();

        assert_eq!(booking.guest_id, "g1");
        assert_eq!(booking.room_id, "r1");
        assert_eq!(booking.status, None);
        assert_eq!(booking.total_amount, None);
    }

    #[test]
    fn booking_payload_uses_camel_case() {
        let payload = BookingPayload {
            guest_id: "g1".into(),
            room_id: "r1".into(),
            check_in: "2024-01-01".into(),
            check_out: "2024-01-03".into(),
            number_of_guests: 2,
            payment_status: "pending".into(),
            special_requests: String::new(),
            status: "confirmed".into(),
            total_amount: Some(4000.0),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["guestId"], "g1");
        assert_eq!(value["numberOfGuests"], 2);
        assert_eq!(value["totalAmount"], 4000.0);
        assert_eq!(value["status"], "confirmed");
    }
}
