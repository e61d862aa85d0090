//! Data layer between `hoteldesk-api` and the CLI / TUI.
//!
//! - **[`Controller`]**: facade over the HTTP client and the snapshot store.
//!   [`reload()`](Controller::reload) fetches rooms, guests, and bookings
//!   concurrently; every write is followed by a full reload.
//!
//! - **[`SnapshotStore`]**: the last-fetched collections, each held in a
//!   `tokio::sync::watch` channel and replaced wholesale. Reloads carry a
//!   sequence number so an older response never overwrites a newer one.
//!
//! - **[`SnapshotStream<T>`]**: subscription handle for reactive rendering.
//!
//! - **Derived data**: [`pricing`] (booking totals), [`validation`],
//!   [`filter`], [`dashboard`] (stats and alerts), and [`view`] (table rows,
//!   select options, previews).
//!
//! - **Domain model** ([`model`]): `Room`, `Guest`, `Booking` with typed
//!   statuses and weak [`EntityId`] references.

pub mod config;
pub mod controller;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod form;
pub mod model;
pub mod pricing;
pub mod store;
pub mod stream;
pub mod validation;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use controller::{ApiStatus, Controller, Mutation, MutationKind, ReloadReport};
pub use dashboard::{Alert, Dashboard, DashboardStats};
pub use error::{CoreError, ValidationError};
pub use filter::RoomFilter;
pub use form::{BookingForm, GuestForm, RoomForm};
pub use pricing::Quote;
pub use store::{HotelSnapshot, Snapshot, SnapshotStore};
pub use stream::SnapshotStream;
pub use validation::BookingRequest;

pub use model::{
    Address, Booking, BookingStatus, EntityId, Guest, Identified, PaymentStatus, Room, RoomStatus,
    RoomType,
};

pub use hoteldesk_api::Collection;
