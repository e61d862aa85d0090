// hoteldesk-api: Async Rust client for the hotel management REST API

pub mod client;
pub mod collection;
pub mod envelope;
pub mod error;
pub mod models;
mod resources;
pub mod transport;

pub use client::HotelClient;
pub use collection::Collection;
pub use error::Error;
pub use models::{
    AddressPayload, AddressRecord, BookingPayload, BookingRecord, GuestPayload, GuestRecord,
    RoomPayload, RoomRecord,
};
pub use transport::TransportConfig;
