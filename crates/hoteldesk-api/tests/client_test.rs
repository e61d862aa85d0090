#![allow(clippy::unwrap_used, clippy::float_cmp)]
// Integration tests for `HotelClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hoteldesk_api::{
    AddressPayload, BookingPayload, Error, GuestPayload, GuestRecord, HotelClient, RoomPayload,
    RoomRecord,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HotelClient) {
    let server = MockServer::start().await;
    let client = HotelClient::with_client(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn room_json(id: &str, number: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "number": number,
        "type": "double",
        "price": 2000,
        "status": "available",
        "capacity": 2,
        "amenities": ["wifi", "tv"]
    })
}

fn room_payload() -> RoomPayload {
    RoomPayload {
        number: "101".into(),
        room_type: "double".into(),
        price: 2000.0,
        capacity: 2,
        status: "available".into(),
        amenities: vec!["wifi".into()],
    }
}

// ── List tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_rooms_bare_array() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([room_json("r1", "101"), room_json("r2", "102")])),
        )
        .mount(&server)
        .await;

    let rooms = client.list_rooms().await.unwrap();
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0].id, "r1");
    assert_eq!(rooms[1].number, "102");
    assert_eq!(rooms[0].amenities, vec!["wifi", "tv"]);
}

#[tokio::test]
async fn test_list_rooms_data_wrapper_matches_bare_array() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [room_json("r1", "101"), room_json("r2", "102")] })),
        )
        .mount(&server)
        .await;

    let rooms: Vec<RoomRecord> = client.list_rooms().await.unwrap();
    let ids: Vec<_> = rooms.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["r1", "r2"]);
}

#[tokio::test]
async fn test_list_unexpected_shape_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/guests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let guests: Vec<GuestRecord> = client.list_guests().await.unwrap();
    assert!(guests.is_empty());
}

#[tokio::test]
async fn test_list_malformed_json_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let bookings = client.list_bookings().await.unwrap();
    assert!(bookings.is_empty());
}

#[tokio::test]
async fn test_list_skips_undecodable_records() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            room_json("r1", "101"),
            { "number": "no-id" },
            room_json("r3", "103")
        ])))
        .mount(&server)
        .await;

    let rooms = client.list_rooms().await.unwrap();
    let ids: Vec<_> = rooms.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["r1", "r3"]);
}

#[tokio::test]
async fn test_list_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/guests"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "db down" })))
        .mount(&server)
        .await;

    let result = client.list_guests().await;
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message.as_deref(), Some("db down"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Write tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_room_sends_json() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/rooms"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "number": "101",
            "type": "double",
            "price": 2000.0,
            "capacity": 2,
            "status": "available",
            "amenities": ["wifi"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(room_json("r9", "101")))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_room(&room_payload()).await.unwrap();
    assert_eq!(created.map(|r| r.id), Some("r9".to_owned()));
}

#[tokio::test]
async fn test_create_room_error_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/rooms"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Room number exists" })),
        )
        .mount(&server)
        .await;

    let err = client.create_room(&room_payload()).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.server_message(), Some("Room number exists"));
    assert!(!err.is_network());
}

#[tokio::test]
async fn test_error_without_payload_has_no_message() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/guests/g1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&server)
        .await;

    let guest = GuestPayload {
        name: "Ana Cruz".into(),
        email: "ana@example.com".into(),
        phone: "0917".into(),
        id_proof: "passport".into(),
        id_number: "P123".into(),
        address: AddressPayload::default(),
    };
    let err = client.update_guest("g1", &guest).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_create_booking_sends_total_and_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_json(json!({
            "guestId": "g1",
            "roomId": "r1",
            "checkIn": "2024-01-01",
            "checkOut": "2024-01-03",
            "numberOfGuests": 2,
            "paymentStatus": "pending",
            "specialRequests": "",
            "status": "confirmed",
            "totalAmount": 4000.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "created" })))
        .expect(1)
        .mount(&server)
        .await;

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
    // A success body that isn't a record is still a success.
    let created = client.create_booking(&payload).await.unwrap();
    assert!(created.is_none());
}

#[tokio::test]
async fn test_delete_booking() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/bookings/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_booking("b1").await.unwrap();
}

#[tokio::test]
async fn test_delete_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/rooms/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
        .mount(&server)
        .await;

    let err = client.delete_room("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.server_message(), Some("Not found"));
}

// ── Transport tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_ping() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Hotel API running"))
        .mount(&server)
        .await;

    assert!(client.ping().await.unwrap());
}

#[tokio::test]
async fn test_ping_error_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(!client.ping().await.unwrap());
}

/// A loopback address nothing listens on. A dropped `MockServer` would
/// not do: wiremock pools it and it keeps answering 404.
fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn test_network_failure() {
    let client = HotelClient::with_client(&unreachable_url(), reqwest::Client::new()).unwrap();

    let err = client.list_rooms().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "expected transport error, got: {err:?}");
    assert!(err.is_network());
    assert_eq!(err.status(), None);

    let err = client.ping().await.unwrap_err();
    assert!(err.is_network(), "expected transport error, got: {err:?}");
}
