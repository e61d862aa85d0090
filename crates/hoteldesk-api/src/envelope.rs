// ── Response envelope handling ──
//
// List endpoints answer with either a bare JSON array or `{ "data": [...] }`.
// Anything else is treated as an empty collection. Write endpoints answer
// with the affected record, sometimes wrapped the same way.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::collection::Collection;

/// First ~200 bytes of a body for log messages, cut on a char boundary.
pub(crate) fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Normalize a decoded list body into its items.
///
/// `[a, b]` and `{"data": [a, b]}` yield the same items; every other shape
/// yields an empty vector.
pub fn normalize_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Parse a raw list body. Malformed JSON yields an empty list.
pub fn parse_list_body(collection: Collection, body: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => normalize_list(value),
        Err(e) => {
            warn!(
                %collection,
                error = %e,
                "malformed list body, treating as empty: {:?}",
                preview(body)
            );
            Vec::new()
        }
    }
}

/// Decode each item independently, skipping the ones that don't fit `T`.
pub fn decode_items<T: DeserializeOwned>(collection: Collection, items: Vec<Value>) -> Vec<T> {
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(%collection, index, error = %e, "skipping undecodable record");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        warn!(
            %collection,
            skipped = total - decoded.len(),
            total,
            "some records could not be decoded"
        );
    }
    decoded
}

/// Unwrap a single-record response: either the record itself or
/// `{ "data": record }`.
pub fn unwrap_record(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_and_data_wrapper_normalize_identically() {
        let bare = normalize_list(json!([{"_id": "a"}, {"_id": "b"}]));
        let wrapped = normalize_list(json!({"data": [{"_id": "a"}, {"_id": "b"}]}));
        assert_eq!(bare, wrapped);
        assert_eq!(bare.len(), 2);
    }

    #[test]
    fn other_shapes_are_empty() {
        assert!(normalize_list(json!({})).is_empty());
        assert!(normalize_list(json!({"data": {"_id": "a"}})).is_empty());
        assert!(normalize_list(json!("rooms")).is_empty());
        assert!(normalize_list(Value::Null).is_empty());
    }

    #[test]
    fn malformed_body_is_empty() {
        assert!(parse_list_body(Collection::Rooms, "<html>oops</html>").is_empty());
        assert!(parse_list_body(Collection::Rooms, "").is_empty());
    }

    #[test]
    fn decode_skips_bad_items() {
        #[derive(serde::Deserialize)]
        struct Item {
            #[serde(rename = "_id")]
            id: String,
        }

        let items = vec![json!({"_id": "a"}), json!({"nope": 1}), json!({"_id": "c"})];
        let decoded: Vec<Item> = decode_items(Collection::Guests, items);
        let ids: Vec<_> = decoded.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "₱".repeat(100);
        let cut = preview(&body);
        assert!(cut.len() <= 200);
        assert!(cut.chars().all(|c| c == '₱'));
    }

    #[test]
    fn unwrap_record_strips_data_only_wrapper() {
        assert_eq!(
            unwrap_record(json!({"data": {"_id": "a"}})),
            json!({"_id": "a"})
        );
        assert_eq!(
            unwrap_record(json!({"_id": "a", "data": 1})),
            json!({"_id": "a", "data": 1})
        );
    }
}
