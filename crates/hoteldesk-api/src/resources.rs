// Typed endpoint methods for rooms, guests, and bookings.

use crate::client::HotelClient;
use crate::collection::Collection;
use crate::error::Error;
use crate::models::{
    BookingPayload, BookingRecord, GuestPayload, GuestRecord, RoomPayload, RoomRecord,
};

impl HotelClient {
    // ── Rooms ────────────────────────────────────────────────────────

    pub async fn list_rooms(&self) -> Result<Vec<RoomRecord>, Error> {
        self.list(Collection::Rooms).await
    }

    pub async fn create_room(&self, room: &RoomPayload) -> Result<Option<RoomRecord>, Error> {
        self.create(Collection::Rooms, room).await
    }

    pub async fn update_room(
        &self,
        id: &str,
        room: &RoomPayload,
    ) -> Result<Option<RoomRecord>, Error> {
        self.update(Collection::Rooms, id, room).await
    }

    pub async fn delete_room(&self, id: &str) -> Result<(), Error> {
        self.delete(Collection::Rooms, id).await
    }

    // ── Guests ───────────────────────────────────────────────────────

    pub async fn list_guests(&self) -> Result<Vec<GuestRecord>, Error> {
        self.list(Collection::Guests).await
    }

    pub async fn create_guest(&self, guest: &GuestPayload) -> Result<Option<GuestRecord>, Error> {
        self.create(Collection::Guests, guest).await
    }

    pub async fn update_guest(
        &self,
        id: &str,
        guest: &GuestPayload,
    ) -> Result<Option<GuestRecord>, Error> {
        self.update(Collection::Guests, id, guest).await
    }

    pub async fn delete_guest(&self, id: &str) -> Result<(), Error> {
        self.delete(Collection::Guests, id).await
    }

    // ── Bookings ─────────────────────────────────────────────────────

    pub async fn list_bookings(&self) -> Result<Vec<BookingRecord>, Error> {
        self.list(Collection::Bookings).await
    }

    pub async fn create_booking(
        &self,
        booking: &BookingPayload,
    ) -> Result<Option<BookingRecord>, Error> {
        self.create(Collection::Bookings, booking).await
    }

    pub async fn update_booking(
        &self,
        id: &str,
        booking: &BookingPayload,
    ) -> Result<Option<BookingRecord>, Error> {
        self.update(Collection::Bookings, id, booking).await
    }

    pub async fn delete_booking(&self, id: &str) -> Result<(), Error> {
        self.delete(Collection::Bookings, id).await
    }
}
