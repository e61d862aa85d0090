//! Screen implementations. Each screen is a top-level Component.

pub mod bookings;
pub mod dashboard;
pub mod guests;
pub mod new_booking;
pub mod rooms;

use ratatui::widgets::{Block, BorderType, Borders};

use hoteldesk_core::HotelSnapshot;

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

/// One component per tab.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(dashboard::DashboardScreen::new()),
        ),
        (ScreenId::Rooms, Box::new(rooms::RoomsScreen::new())),
        (ScreenId::Guests, Box::new(guests::GuestsScreen::new())),
        (ScreenId::Bookings, Box::new(bookings::BookingsScreen::new())),
        (
            ScreenId::NewBooking,
            Box::new(new_booking::NewBookingScreen::new()),
        ),
    ]
}

/// Fold a data action into a screen's copy of the snapshot. Returns
/// `true` if anything changed.
pub(crate) fn apply_data(snapshot: &mut HotelSnapshot, action: &Action) -> bool {
    match action {
        Action::RoomsUpdated(rooms) => snapshot.rooms = rooms.clone(),
        Action::GuestsUpdated(guests) => snapshot.guests = guests.clone(),
        Action::BookingsUpdated(bookings) => snapshot.bookings = bookings.clone(),
        _ => return false,
    }
    true
}

/// Rounded panel with the focus-dependent border used by every screen.
pub(crate) fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        })
}

/// Clamp-move a table selection within `len` rows.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap, clippy::as_conversions)]
pub(crate) fn step(selected: Option<usize>, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = selected.unwrap_or(0) as isize;
    Some((current + delta).clamp(0, len as isize - 1) as usize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use hoteldesk_core::{
        Booking, BookingStatus, Guest, HotelSnapshot, PaymentStatus, Room, RoomStatus, RoomType,
        Snapshot,
    };

    use crate::action::Action;
    use crate::component::Component;

    pub fn room(id: &str, number: &str, status: RoomStatus) -> Room {
        Room {
            id: id.into(),
            number: number.into(),
            room_type: RoomType::Double,
            price: 2000.0,
            status,
            capacity: 2,
            amenities: vec!["wifi".into()],
        }
    }

    pub fn guest(id: &str, name: &str) -> Guest {
        Guest {
            id: id.into(),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "0917".into(),
            id_proof: "passport".into(),
            id_number: "P1".into(),
            address: None,
        }
    }

    pub fn booking(id: &str, guest_id: &str, room_id: &str) -> Booking {
        Booking {
            id: id.into(),
            guest_id: guest_id.into(),
            room_id: room_id.into(),
            check_in: NaiveDate::from_ymd_opt(2026, 3, 10),
            check_out: NaiveDate::from_ymd_opt(2026, 3, 12),
            number_of_guests: 2,
            payment_status: Some(PaymentStatus::Pending),
            special_requests: None,
            status: Some(BookingStatus::Confirmed),
            total_amount: Some(4000.0),
        }
    }

    pub fn snapshot() -> HotelSnapshot {
        HotelSnapshot::from_parts(
            vec![
                room("r1", "101", RoomStatus::Available),
                room("r2", "201", RoomStatus::Maintenance),
            ],
            vec![guest("g1", "Ana Cruz")],
            vec![booking("b1aaaaaaaaaa", "g1", "r1")],
        )
    }

    /// Feed every collection of `snap` to a screen.
    pub fn load(screen: &mut dyn Component, snap: &HotelSnapshot) {
        for action in [
            Action::RoomsUpdated(Arc::clone(&snap.rooms)),
            Action::GuestsUpdated(Arc::clone(&snap.guests)),
            Action::BookingsUpdated(Arc::clone(&snap.bookings)),
        ] {
            screen.update(&action).unwrap();
        }
    }

    pub fn empty_rooms() -> Action {
        Action::RoomsUpdated(Arc::new(Snapshot::empty()))
    }

    /// Render into an off-screen buffer and return its text, row by row.
    pub fn render_text(screen: &dyn Component, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}
