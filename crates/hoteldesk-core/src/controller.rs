// ── Controller ──
//
// Facade owning the HTTP client and the snapshot store. Every mutation is a
// round-trip followed by a full reload; the store is only written by the
// completion of each collection's list call.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use hoteldesk_api::{Collection, HotelClient};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::form::{BookingForm, GuestForm, RoomForm};
use crate::model::{Booking, EntityId, Guest, Room};
use crate::pricing::Quote;
use crate::store::{HotelSnapshot, SnapshotStore};
use crate::stream::SnapshotStream;

// ── ApiStatus ────────────────────────────────────────────────────────

/// Result of the liveness probe against the API root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiStatus {
    /// Not probed yet.
    #[default]
    Unknown,
    Connected,
    /// The server answered with a non-success status.
    Error,
    /// No response at all.
    Offline,
}

impl ApiStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Checking API...",
            Self::Connected => "API Connected",
            Self::Error => "API Error",
            Self::Offline => "API Offline",
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── ReloadReport ─────────────────────────────────────────────────────

/// Outcome of one reload. Collections that failed keep their previous
/// snapshot.
#[derive(Debug)]
pub struct ReloadReport {
    pub sequence: u64,
    pub failures: Vec<(Collection, CoreError)>,
}

impl ReloadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, collection: Collection) -> Option<&CoreError> {
        self.failures
            .iter()
            .find(|(c, _)| *c == collection)
            .map(|(_, e)| e)
    }

    /// One notice per failed collection, e.g. "Failed to load guests: ...".
    pub fn notices(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|(collection, err)| format!("Failed to load {collection}: {err}"))
            .collect()
    }
}

// ── Mutations ────────────────────────────────────────────────────────

/// What a write did, for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    CreateRoom,
    UpdateRoom,
    CreateGuest,
    UpdateGuest,
    CreateBooking,
    DeleteRoom,
    DeleteGuest,
    DeleteBooking,
}

impl MutationKind {
    pub fn collection(self) -> Collection {
        match self {
            Self::CreateRoom | Self::UpdateRoom | Self::DeleteRoom => Collection::Rooms,
            Self::CreateGuest | Self::UpdateGuest | Self::DeleteGuest => Collection::Guests,
            Self::CreateBooking | Self::DeleteBooking => Collection::Bookings,
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Self::CreateRoom => "Room created successfully!",
            Self::UpdateRoom => "Room updated successfully!",
            Self::CreateGuest => "Guest created successfully!",
            Self::UpdateGuest => "Guest updated successfully!",
            Self::CreateBooking => "Booking created successfully!",
            Self::DeleteRoom => "Room deleted successfully!",
            Self::DeleteGuest => "Guest deleted successfully!",
            Self::DeleteBooking => "Booking deleted successfully!",
        }
    }

    /// Message used when the server rejects without its own error text.
    pub fn failure_fallback(self) -> &'static str {
        match self {
            Self::CreateRoom | Self::UpdateRoom => "Failed to save room",
            Self::CreateGuest | Self::UpdateGuest => "Failed to save guest",
            Self::CreateBooking => "Failed to create booking",
            Self::DeleteRoom => "Failed to delete room",
            Self::DeleteGuest => "Failed to delete guest",
            Self::DeleteBooking => "Failed to delete booking",
        }
    }
}

/// A completed write and the reload that followed it.
#[derive(Debug)]
pub struct Mutation {
    pub kind: MutationKind,
    /// Id of the affected record, when known.
    pub id: Option<EntityId>,
    pub reload: ReloadReport,
}

impl Mutation {
    pub fn message(&self) -> &'static str {
        self.kind.success_message()
    }
}

// ── Controller ───────────────────────────────────────────────────────

/// Entry point for the CLI and TUI.
///
/// Cheaply cloneable via `Arc<ControllerInner>`.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ClientConfig,
    client: HotelClient,
    store: Arc<SnapshotStore>,
    api_status: watch::Sender<ApiStatus>,
}

impl Controller {
    /// Build the HTTP client. Does not touch the network.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let client = HotelClient::new(config.api_url.as_str(), &config.transport())?;
        Ok(Self::with_client(config, client))
    }

    /// Use an already-built client.
    pub fn with_client(config: ClientConfig, client: HotelClient) -> Self {
        let (api_status, _) = watch::channel(ApiStatus::Unknown);
        Self {
            inner: Arc::new(ControllerInner {
                config,
                client,
                store: Arc::new(SnapshotStore::new()),
                api_status,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &HotelClient {
        &self.inner.client
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.inner.store
    }

    /// Point-in-time view of all three collections.
    pub fn snapshot(&self) -> HotelSnapshot {
        self.inner.store.current()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn rooms(&self) -> SnapshotStream<Room> {
        self.inner.store.subscribe_rooms()
    }

    pub fn guests(&self) -> SnapshotStream<Guest> {
        self.inner.store.subscribe_guests()
    }

    pub fn bookings(&self) -> SnapshotStream<Booking> {
        self.inner.store.subscribe_bookings()
    }

    pub fn api_status(&self) -> watch::Receiver<ApiStatus> {
        self.inner.api_status.subscribe()
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Fetch all three collections concurrently.
    ///
    /// Each collection is applied as soon as its own request completes. A
    /// failed collection keeps its previous snapshot and is listed in the
    /// report.
    pub async fn reload(&self) -> ReloadReport {
        let store = &self.inner.store;
        let client = &self.inner.client;
        let sequence = store.next_sequence();
        debug!(sequence, "reload started");

        let rooms = async {
            let rooms: Vec<Room> = client
                .list_rooms()
                .await?
                .into_iter()
                .map(Room::from)
                .collect();
            let count = rooms.len();
            store.apply_rooms(sequence, rooms);
            Ok::<_, CoreError>(count)
        };
        let guests = async {
            let guests: Vec<Guest> = client
                .list_guests()
                .await?
                .into_iter()
                .map(Guest::from)
                .collect();
            let count = guests.len();
            store.apply_guests(sequence, guests);
            Ok::<_, CoreError>(count)
        };
        let bookings = async {
            let bookings: Vec<Booking> = client
                .list_bookings()
                .await?
                .into_iter()
                .map(Booking::from)
                .collect();
            let count = bookings.len();
            store.apply_bookings(sequence, bookings);
            Ok::<_, CoreError>(count)
        };

        let (rooms, guests, bookings) = tokio::join!(rooms, guests, bookings);

        let mut failures = Vec::new();
        for (collection, result) in [
            (Collection::Rooms, rooms),
            (Collection::Guests, guests),
            (Collection::Bookings, bookings),
        ] {
            match result {
                Ok(count) => debug!(%collection, count, "collection loaded"),
                Err(e) => {
                    warn!(%collection, error = %e, "collection load failed");
                    failures.push((collection, e));
                }
            }
        }

        if failures.is_empty() {
            info!(
                sequence,
                rooms = store.rooms().len(),
                guests = store.guests().len(),
                bookings = store.bookings().len(),
                "reload complete"
            );
        }

        ReloadReport { sequence, failures }
    }

    /// Probe `{base}/` and publish the result.
    pub async fn ping(&self) -> ApiStatus {
        let status = match self.inner.client.ping().await {
            Ok(true) => ApiStatus::Connected,
            Ok(false) => ApiStatus::Error,
            Err(e) => {
                debug!(error = %e, "liveness check failed");
                ApiStatus::Offline
            }
        };
        self.inner.api_status.send_replace(status);
        status
    }

    /// Empty the local snapshot without contacting the server.
    pub fn clear(&self) {
        self.inner.store.clear();
        info!("local data cleared");
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Create or update a room depending on whether the form carries an id.
    pub async fn save_room(&self, form: &RoomForm) -> Result<Mutation, CoreError> {
        let payload = form.to_payload()?;
        let client = &self.inner.client;
        let (kind, record) = match &form.id {
            Some(id) => (
                MutationKind::UpdateRoom,
                client.update_room(id.as_str(), &payload).await?,
            ),
            None => (MutationKind::CreateRoom, client.create_room(&payload).await?),
        };
        let id = record
            .map(|r| EntityId::from(r.id))
            .or_else(|| form.id.clone());
        Ok(self.finish(kind, id).await)
    }

    pub async fn save_guest(&self, form: &GuestForm) -> Result<Mutation, CoreError> {
        let payload = form.to_payload()?;
        let client = &self.inner.client;
        let (kind, record) = match &form.id {
            Some(id) => (
                MutationKind::UpdateGuest,
                client.update_guest(id.as_str(), &payload).await?,
            ),
            None => (MutationKind::CreateGuest, client.create_guest(&payload).await?),
        };
        let id = record
            .map(|r| EntityId::from(r.id))
            .or_else(|| form.id.clone());
        Ok(self.finish(kind, id).await)
    }

    /// Validate against the current snapshot, then create the booking with
    /// its computed total. Nothing is sent if validation fails.
    pub async fn create_booking(&self, form: &BookingForm) -> Result<Mutation, CoreError> {
        let payload = form.submission(&self.snapshot())?;
        let record = self.inner.client.create_booking(&payload).await?;
        let id = record.map(|r| EntityId::from(r.id));
        Ok(self.finish(MutationKind::CreateBooking, id).await)
    }

    pub async fn delete_room(&self, id: &str) -> Result<Mutation, CoreError> {
        self.inner.client.delete_room(id).await?;
        Ok(self.finish(MutationKind::DeleteRoom, Some(id.into())).await)
    }

    pub async fn delete_guest(&self, id: &str) -> Result<Mutation, CoreError> {
        self.inner.client.delete_guest(id).await?;
        Ok(self.finish(MutationKind::DeleteGuest, Some(id.into())).await)
    }

    pub async fn delete_booking(&self, id: &str) -> Result<Mutation, CoreError> {
        self.inner.client.delete_booking(id).await?;
        Ok(self.finish(MutationKind::DeleteBooking, Some(id.into())).await)
    }

    /// Live total for the booking form against the current snapshot.
    pub fn quote(&self, form: &BookingForm) -> Option<Quote> {
        form.quote(&self.snapshot())
    }

    async fn finish(&self, kind: MutationKind, id: Option<EntityId>) -> Mutation {
        info!(
            ?kind,
            id = id.as_ref().map_or("-", EntityId::as_str),
            "write accepted"
        );
        let reload = self.reload().await;
        Mutation { kind, id, reload }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, Controller) {
        let server = MockServer::start().await;
        let config = ClientConfig::parse(&server.uri()).unwrap();
        let controller = Controller::new(config).unwrap();
        (server, controller)
    }

    fn room_json(id: &str, number: &str) -> serde_json::Value {
        json!({
            "_id": id, "number": number, "type": "double", "price": 2000,
            "status": "available", "capacity": 2, "amenities": ["wifi"]
        })
    }

    async fn mount_list(server: &MockServer, collection: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/{collection}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn load_one_room(server: &MockServer, controller: &Controller) {
        mount_list(server, "rooms", json!([room_json("r1", "101")])).await;
        mount_list(server, "guests", json!([])).await;
        mount_list(server, "bookings", json!([])).await;
        controller.reload().await;
    }

    fn booking_form(guests: &str) -> BookingForm {
        BookingForm {
            guest_id: "g1".into(),
            room_id: "r1".into(),
            check_in: "2024-01-01".into(),
            check_out: "2024-01-03".into(),
            number_of_guests: guests.into(),
            ..BookingForm::default()
        }
    }

    #[tokio::test]
    async fn failed_collection_is_isolated() {
        let (server, controller) = setup().await;
        mount_list(&server, "rooms", json!([room_json("r1", "101")])).await;
        mount_list(&server, "bookings", json!({ "data": [] })).await;
        Mock::given(method("GET"))
            .and(path("/api/guests"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
            .mount(&server)
            .await;

        let report = controller.reload().await;

        assert_eq!(report.failures.len(), 1);
        assert_eq!(
            report.failed(Collection::Guests).and_then(CoreError::status),
            Some(500)
        );
        assert!(report.notices()[0].starts_with("Failed to load guests: "));

        let snap = controller.snapshot();
        assert_eq!(snap.rooms.len(), 1);
        assert!(snap.guests.is_empty());
        assert!(snap.bookings.is_empty());
    }

    #[tokio::test]
    async fn delete_then_reload_drops_room() {
        let (server, controller) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/rooms"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([room_json("r1", "101"), room_json("r2", "102")])),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        mount_list(&server, "guests", json!([])).await;
        mount_list(&server, "bookings", json!([])).await;

        controller.reload().await;
        assert!(controller.store().room("r1").is_some());

        Mock::given(method("DELETE"))
            .and(path("/api/rooms/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .mount(&server)
            .await;
        mount_list(&server, "rooms", json!([room_json("r2", "102")])).await;

        let mutation = controller.delete_room("r1").await.unwrap();
        assert_eq!(mutation.message(), "Room deleted successfully!");
        assert!(mutation.reload.is_complete());
        assert!(controller.store().room("r1").is_none());
        assert!(controller.store().room("r2").is_some());
    }

    #[tokio::test]
    async fn booking_total_is_submitted() {
        let (server, controller) = setup().await;
        load_one_room(&server, &controller).await;

        Mock::given(method("POST"))
            .and(path("/api/bookings"))
            .and(body_partial_json(json!({
                "guestId": "g1",
                "roomId": "r1",
                "checkIn": "2024-01-01",
                "checkOut": "2024-01-03",
                "status": "confirmed",
                "totalAmount": 4000.0
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "_id": "b1", "guestId": "g1", "roomId": "r1", "numberOfGuests": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let form = booking_form("2");
        assert_eq!(controller.quote(&form).map(|q| q.total), Some(4000.0));

        let mutation = controller.create_booking(&form).await.unwrap();
        assert_eq!(mutation.kind, MutationKind::CreateBooking);
        assert_eq!(mutation.id.as_ref().map(EntityId::as_str), Some("b1"));
    }

    #[tokio::test]
    async fn invalid_booking_sends_nothing() {
        let (server, controller) = setup().await;
        load_one_room(&server, &controller).await;

        Mock::given(method("POST"))
            .and(path("/api/bookings"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let err = controller
            .create_booking(&booking_form("3"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::ValidationFailure(ValidationError::CapacityExceeded { max: 2 })
        ));
        assert_eq!(
            err.notice(MutationKind::CreateBooking.failure_fallback()),
            "Number of guests exceeds room capacity (max: 2)"
        );
    }

    #[tokio::test]
    async fn rejected_save_uses_server_message() {
        let (server, controller) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/rooms"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "error": "Room exists" })),
            )
            .mount(&server)
            .await;

        let form = RoomForm {
            number: "101".into(),
            price: "2000".into(),
            capacity: "2".into(),
            ..RoomForm::default()
        };
        let err = controller.save_room(&form).await.unwrap_err();
        assert_eq!(
            err.notice(MutationKind::CreateRoom.failure_fallback()),
            "Error: Room exists"
        );
    }

    #[tokio::test]
    async fn ping_reports_status() {
        let (server, controller) = setup().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let rx = controller.api_status();
        assert_eq!(controller.ping().await, ApiStatus::Error);
        assert_eq!(*rx.borrow(), ApiStatus::Error);
        assert_eq!(ApiStatus::Error.to_string(), "API Error");
    }

    /// A loopback address nothing listens on. A dropped `MockServer` stays
    /// pooled by wiremock and keeps answering 404.
    fn offline_controller() -> Controller {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        Controller::new(ClientConfig::parse(&url).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn unreachable_server_is_offline() {
        let controller = offline_controller();
        let rx = controller.api_status();
        assert_eq!(controller.ping().await, ApiStatus::Offline);
        assert_eq!(*rx.borrow(), ApiStatus::Offline);
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_failure() {
        let controller = offline_controller();
        let err = controller.delete_room("r1").await.unwrap_err();
        assert!(
            matches!(err, CoreError::NetworkFailure { .. }),
            "expected network failure, got: {err:?}"
        );
        assert!(err.notice("Failed to delete room").starts_with("Network error: "));
    }

    #[tokio::test]
    async fn clear_empties_snapshot() {
        let (server, controller) = setup().await;
        load_one_room(&server, &controller).await;
        assert_eq!(controller.snapshot().rooms.len(), 1);

        controller.clear();
        assert!(controller.snapshot().rooms.is_empty());
    }
}
