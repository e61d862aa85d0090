//! Screen identifiers and tab order.

use std::fmt;

/// Identifies each tab, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard, // 1
    Rooms,      // 2
    Guests,     // 3
    Bookings,   // 4
    NewBooking, // 5
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 5] = [
        Self::Dashboard,
        Self::Rooms,
        Self::Guests,
        Self::Bookings,
        Self::NewBooking,
    ];

    /// Numeric key (1-5) for this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Dashboard => 1,
            Self::Rooms => 2,
            Self::Guests => 3,
            Self::Bookings => 4,
            Self::NewBooking => 5,
        }
    }

    /// Screen from a numeric key (1-5). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Rooms => "Rooms",
            Self::Guests => "Guests",
            Self::Bookings => "Bookings",
            Self::NewBooking => "New Booking",
        }
    }

    /// Compact label for narrow terminals (< 80 cols).
    pub fn label_short(self) -> &'static str {
        match self {
            Self::Dashboard => "Dash",
            Self::Rooms => "Rooms",
            Self::Guests => "Guests",
            Self::Bookings => "Book",
            Self::NewBooking => "New",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn next_wraps_to_dashboard() {
        assert_eq!(ScreenId::Dashboard.next(), ScreenId::Rooms);
        assert_eq!(ScreenId::NewBooking.next(), ScreenId::Dashboard);
    }

    #[test]
    fn prev_wraps_to_new_booking() {
        assert_eq!(ScreenId::Dashboard.prev(), ScreenId::NewBooking);
        assert_eq!(ScreenId::Bookings.prev(), ScreenId::Guests);
    }

    #[test]
    fn full_cycle_returns_home() {
        let mut screen = ScreenId::Guests;
        for _ in 0..ScreenId::ALL.len() {
            screen = screen.next();
        }
        assert_eq!(screen, ScreenId::Guests);
    }

    #[test]
    fn number_keys_round_trip() {
        for screen in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(screen.number()), Some(screen));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(6), None);
    }
}
