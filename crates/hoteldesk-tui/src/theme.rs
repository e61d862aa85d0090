//! Palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use hoteldesk_core::{BookingStatus, PaymentStatus, RoomStatus};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Neutrals ──────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(TEXT)
}

pub fn key_hint() -> Style {
    Style::default().fg(BORDER)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

// ── Status badges ─────────────────────────────────────────────────────

pub fn room_status(status: &RoomStatus) -> Style {
    let color = match status {
        RoomStatus::Available => GREEN,
        RoomStatus::Occupied => CORAL,
        RoomStatus::Maintenance => YELLOW,
        RoomStatus::Other(_) => TEXT,
    };
    Style::default().fg(color)
}

pub fn booking_status(status: &BookingStatus) -> Style {
    let color = match status {
        BookingStatus::Confirmed => GREEN,
        BookingStatus::CheckedIn => CYAN,
        BookingStatus::CheckedOut => BORDER,
        BookingStatus::Cancelled => RED,
        BookingStatus::Other(_) => TEXT,
    };
    Style::default().fg(color)
}

pub fn payment_status(status: &PaymentStatus) -> Style {
    let color = match status {
        PaymentStatus::Paid => GREEN,
        PaymentStatus::Pending => YELLOW,
        PaymentStatus::Partial => CORAL,
        PaymentStatus::Refunded | PaymentStatus::Other(_) => TEXT,
    };
    Style::default().fg(color)
}
