// ── Booking total calculator ──
//
// nights = check_out - check_in in whole days; total = price × nights.
// A stay of zero or negative nights has no total (incomplete input, not an
// error).

use chrono::NaiveDate;
use serde::Serialize;

/// Priced stay for a given room and date range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub nights: u32,
    pub nightly_price: f64,
    pub total: f64,
}

/// Nights between two dates. `None` when check-out is not after check-in.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> Option<u32> {
    u32::try_from((check_out - check_in).num_days())
        .ok()
        .filter(|&nights| nights > 0)
}

/// Quote a stay at `nightly_price`.
pub fn quote(nightly_price: f64, check_in: NaiveDate, check_out: NaiveDate) -> Option<Quote> {
    let nights = nights_between(check_in, check_out)?;
    Some(Quote {
        nights,
        nightly_price,
        total: nightly_price * f64::from(nights),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn two_nights_at_two_thousand() {
        let q = quote(2000.0, date(2024, 1, 1), date(2024, 1, 3)).unwrap();
        assert_eq!(q.nights, 2);
        assert_eq!(q.total, 4000.0);
    }

    #[test]
    fn same_day_or_reversed_has_no_total() {
        assert!(quote(2000.0, date(2024, 1, 3), date(2024, 1, 3)).is_none());
        assert!(quote(2000.0, date(2024, 1, 3), date(2024, 1, 1)).is_none());
    }

    #[test]
    fn spans_month_and_leap_day() {
        assert_eq!(nights_between(date(2024, 2, 28), date(2024, 3, 1)), Some(2));
        assert_eq!(nights_between(date(2023, 12, 31), date(2024, 1, 1)), Some(1));
    }

    #[test]
    fn nights_are_whole_calendar_days() {
        assert_eq!(nights_between(date(2024, 1, 1), date(2024, 1, 3)), Some(2));
        assert_eq!(nights_between(date(2024, 1, 1), date(2025, 1, 1)), Some(366));
        assert_eq!(nights_between(date(2024, 1, 2), date(2024, 1, 1)), None);
    }
}
