// ── Dashboard stats & alerts ──
//
// Counts and threshold notices derived from the current snapshot.

use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::model::{BookingStatus, PaymentStatus, RoomStatus};
use crate::store::HotelSnapshot;

/// Headline counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub available_rooms: usize,
    pub occupied_rooms: usize,
    pub total_guests: usize,
    /// Confirmed or checked-in.
    pub active_bookings: usize,
}

/// A dashboard notice. Rendered via `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum Alert {
    Maintenance(usize),
    PendingPayments(usize),
    CheckInsToday(usize),
    AllClear,
}

impl Alert {
    /// Whether this alert needs attention.
    pub fn is_warning(self) -> bool {
        !matches!(self, Self::AllClear)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maintenance(n) => write!(f, "{n} room(s) under maintenance"),
            Self::PendingPayments(n) => write!(f, "{n} booking(s) with pending payment"),
            Self::CheckInsToday(n) => write!(f, "{n} check-in(s) today"),
            Self::AllClear => f.write_str("All systems operational"),
        }
    }
}

/// Stats plus alerts, computed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub alerts: Vec<Alert>,
}

impl Dashboard {
    pub fn compute(snapshot: &HotelSnapshot, today: NaiveDate) -> Self {
        Self {
            stats: compute_stats(snapshot),
            alerts: compute_alerts(snapshot, today),
        }
    }
}

/// Today's calendar date in UTC, matching how check-in dates are written
/// by the backend.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn compute_stats(snapshot: &HotelSnapshot) -> DashboardStats {
    let rooms_with = |status: RoomStatus| {
        snapshot
            .rooms
            .iter()
            .filter(|r| r.status == status)
            .count()
    };

    DashboardStats {
        available_rooms: rooms_with(RoomStatus::Available),
        occupied_rooms: rooms_with(RoomStatus::Occupied),
        total_guests: snapshot.guests.len(),
        active_bookings: snapshot
            .bookings
            .iter()
            .filter(|b| b.status.as_ref().is_some_and(BookingStatus::is_active))
            .count(),
    }
}

/// Alerts in fixed order; `AllClear` only when nothing else applies.
pub fn compute_alerts(snapshot: &HotelSnapshot, today: NaiveDate) -> Vec<Alert> {
    let maintenance = snapshot
        .rooms
        .iter()
        .filter(|r| r.status == RoomStatus::Maintenance)
        .count();
    let pending = snapshot
        .bookings
        .iter()
        .filter(|b| b.payment_status == Some(PaymentStatus::Pending))
        .count();
    let check_ins = snapshot
        .bookings
        .iter()
        .filter(|b| b.check_in == Some(today))
        .count();

    let mut alerts = Vec::new();
    if maintenance > 0 {
        alerts.push(Alert::Maintenance(maintenance));
    }
    if pending > 0 {
        alerts.push(Alert::PendingPayments(pending));
    }
    if check_ins > 0 {
        alerts.push(Alert::CheckInsToday(check_ins));
    }
    if alerts.is_empty() {
        alerts.push(Alert::AllClear);
    }
    alerts
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Booking, BookingStatus, EntityId};
    use crate::store::tests::room;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(
        id: &str,
        status: Option<BookingStatus>,
        payment: PaymentStatus,
        check_in: NaiveDate,
    ) -> Booking {
        Booking {
            id: EntityId::from(id),
            guest_id: EntityId::from("g1"),
            room_id: EntityId::from("r1"),
            check_in: Some(check_in),
            check_out: check_in.succ_opt(),
            number_of_guests: 1,
            payment_status: Some(payment),
            special_requests: None,
            status,
            total_amount: Some(2000.0),
        }
    }

    #[test]
    fn one_maintenance_room_gives_one_alert() {
        let mut fixing = room("r2", "102");
        fixing.status = RoomStatus::Maintenance;
        let snap = HotelSnapshot::from_parts(vec![room("r1", "101"), fixing], vec![], vec![]);

        let alerts = compute_alerts(&snap, date(2024, 6, 1));
        assert_eq!(alerts, vec![Alert::Maintenance(1)]);
        assert_eq!(alerts[0].to_string(), "1 room(s) under maintenance");
    }

    #[test]
    fn all_clear_only_when_nothing_applies() {
        let snap = HotelSnapshot::from_parts(vec![room("r1", "101")], vec![], vec![]);
        let alerts = compute_alerts(&snap, date(2024, 6, 1));
        assert_eq!(alerts, vec![Alert::AllClear]);
        assert_eq!(alerts[0].to_string(), "All systems operational");
    }

    #[test]
    fn alerts_keep_fixed_order() {
        let today = date(2024, 6, 1);
        let mut fixing = room("r2", "102");
        fixing.status = RoomStatus::Maintenance;
        let bookings = vec![
            booking("b1", Some(BookingStatus::Confirmed), PaymentStatus::Pending, today),
            booking("b2", None, PaymentStatus::Paid, today),
            booking("b3", None, PaymentStatus::Pending, date(2024, 6, 5)),
        ];
        let snap = HotelSnapshot::from_parts(vec![fixing], vec![], bookings);

        let rendered: Vec<String> = compute_alerts(&snap, today)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec![
                "1 room(s) under maintenance",
                "2 booking(s) with pending payment",
                "2 check-in(s) today",
            ]
        );
    }

    #[test]
    fn stats_count_rooms_guests_and_active_bookings() {
        let mut occupied = room("r2", "102");
        occupied.status = RoomStatus::Occupied;
        let today = date(2024, 6, 1);
        let bookings = vec![
            booking("b1", Some(BookingStatus::Confirmed), PaymentStatus::Paid, today),
            booking("b2", Some(BookingStatus::CheckedIn), PaymentStatus::Paid, today),
            booking("b3", Some(BookingStatus::Cancelled), PaymentStatus::Paid, today),
            booking("b4", None, PaymentStatus::Paid, today),
        ];
        let snap = HotelSnapshot::from_parts(vec![room("r1", "101"), occupied], vec![], bookings);

        assert_eq!(
            compute_stats(&snap),
            DashboardStats {
                available_rooms: 1,
                occupied_rooms: 1,
                total_guests: 0,
                active_bookings: 2,
            }
        );
    }
}
