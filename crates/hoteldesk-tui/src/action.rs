//! Actions flowing through the app loop.

use std::fmt;
use std::sync::Arc;

use hoteldesk_core::{
    ApiStatus, Booking, BookingForm, EntityId, Guest, GuestForm, MutationKind, Room, RoomForm,
    Snapshot,
};

use crate::screen::ScreenId;

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ────────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ───────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,
    /// Sent to the New Booking screen when it is entered.
    BookingFormOpened,

    // ── Data ─────────────────────────────────────────────────────────
    RoomsUpdated(Arc<Snapshot<Room>>),
    GuestsUpdated(Arc<Snapshot<Guest>>),
    BookingsUpdated(Arc<Snapshot<Booking>>),
    ApiStatusChanged(ApiStatus),
    Reload,
    ClearData,

    // ── Writes ───────────────────────────────────────────────────────
    SaveRoom(Box<RoomForm>),
    SaveGuest(Box<GuestForm>),
    SubmitBooking(Box<BookingForm>),
    RequestDelete(ConfirmAction),
    /// A write finished; screens close forms / release guards.
    MutationFinished { kind: MutationKind, ok: bool },

    // ── Dialogs & toasts ─────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,
    Notify(Notification),
    DismissNotification,
}

/// Destructive operations awaiting a y/n answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteRoom { id: EntityId, number: String },
    DeleteGuest { id: EntityId, name: String },
    DeleteBooking { id: EntityId },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteRoom { number, .. } => {
                write!(f, "Are you sure you want to delete room {number}?")
            }
            Self::DeleteGuest { name, .. } => {
                write!(f, "Are you sure you want to delete {name}?")
            }
            Self::DeleteBooking { id } => {
                write!(f, "Are you sure you want to delete booking {}?", id.short())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }
}
