//! Booking command handlers.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tabled::Tabled;

use hoteldesk_core::dashboard;
use hoteldesk_core::view::{self, BookingRow};
use hoteldesk_core::{
    Booking, BookingForm, Collection, Controller, HotelSnapshot, MutationKind, Quote,
};

use crate::cli::{BookingsArgs, BookingsCommand, GlobalOpts, PaymentArg};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BookingTableRow {
    #[tabled(rename = "Booking")]
    short_id: String,
    #[tabled(rename = "Guest")]
    guest: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Check-in")]
    check_in: String,
    #[tabled(rename = "Check-out")]
    check_out: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<BookingRow> for BookingTableRow {
    fn from(row: BookingRow) -> Self {
        Self {
            short_id: row.short_id,
            guest: row.guest_name,
            room: row.room_number,
            check_in: row.check_in,
            check_out: row.check_out,
            status: row.status.to_string(),
            amount: row.amount,
        }
    }
}

fn detail(snapshot: &HotelSnapshot, booking: &Booking) -> String {
    let row = BookingRow::from_booking(snapshot, booking);
    let mut lines = vec![
        format!("ID:        {}", row.id),
        format!("Guest:     {}", row.guest_name),
        format!("Room:      {}", row.room_number),
        format!("Check-in:  {}", row.check_in),
        format!("Check-out: {}", row.check_out),
        format!("Guests:    {}", booking.number_of_guests),
        format!("Status:    {}", row.status),
        format!(
            "Payment:   {}",
            booking
                .payment_status
                .as_ref()
                .map_or_else(|| "-".to_owned(), ToString::to_string)
        ),
        format!("Amount:    {}", row.amount),
    ];
    if let Some(requests) = booking.special_requests.as_deref().filter(|r| !r.is_empty()) {
        lines.push(format!("Requests:  {requests}"));
    }
    lines.join("\n")
}

// ── Quote output ────────────────────────────────────────────────────

#[derive(Serialize)]
struct QuoteView {
    room_id: String,
    room_number: String,
    check_in: NaiveDate,
    check_out: NaiveDate,
    #[serde(flatten)]
    quote: Quote,
}

fn quote_detail(q: &QuoteView) -> String {
    [
        format!("Room:      {}", q.room_number),
        format!("Check-in:  {}", q.check_in),
        format!("Check-out: {}", q.check_out),
        format!("Nights:    {}", q.quote.nights),
        format!("Per night: {}", view::format_peso(q.quote.nightly_price)),
        format!("Total:     {}", view::format_peso(q.quote.total)),
    ]
    .join("\n")
}

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })
}

// ── Form building ───────────────────────────────────────────────────

struct CreateArgs {
    guest: String,
    room: String,
    check_in: Option<String>,
    check_out: Option<String>,
    number_of_guests: String,
    payment: PaymentArg,
    requests: String,
}

/// Missing check-in means today; missing check-out means the night after
/// check-in.
fn create_form(args: CreateArgs, today: NaiveDate) -> BookingForm {
    let mut form = BookingForm::with_default_dates(today);
    form.guest_id = args.guest;
    form.room_id = args.room;
    form.number_of_guests = args.number_of_guests;
    form.payment_status = args.payment.into();
    form.special_requests = args.requests;

    if let Some(check_in) = args.check_in {
        form.check_in = check_in;
        if let Some(date) = form.check_in_date() {
            form.reset_dates(date);
        }
    }
    if let Some(check_out) = args.check_out {
        form.check_out = check_out;
    }
    form
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: BookingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BookingsCommand::List => {
            let snap = util::load(controller, &[Collection::Bookings], global).await?;
            let out = output::render_list(
                global.format(),
                snap.bookings.items(),
                |b: &Arc<Booking>| BookingTableRow::from(BookingRow::from_booking(&snap, b)),
                |b| b.id.to_string(),
                view::NO_BOOKINGS,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BookingsCommand::Get { id } => {
            let snap = util::load(controller, &[Collection::Bookings], global).await?;
            let booking = snap
                .bookings
                .get(&id)
                .ok_or_else(|| util::not_found("booking", &id))?;
            let out = output::render_single(
                global.format(),
                booking,
                |b| detail(&snap, b),
                |b| b.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BookingsCommand::Create {
            guest,
            room,
            check_in,
            check_out,
            number_of_guests,
            payment,
            requests,
        } => {
            // Rooms must be loaded: validation checks capacity and the total
            // is priced from the room.
            util::load(controller, &[Collection::Rooms], global).await?;
            let form = create_form(
                CreateArgs {
                    guest,
                    room,
                    check_in,
                    check_out,
                    number_of_guests,
                    payment,
                    requests,
                },
                dashboard::today(),
            );
            let mutation = controller.create_booking(&form).await.map_err(|e| {
                CliError::from_core(e, MutationKind::CreateBooking.failure_fallback())
            })?;
            output::notice(mutation.message(), global.quiet);
            for notice in mutation.reload.notices() {
                output::notice(&notice, global.quiet);
            }
            if let Some(id) = mutation.id {
                output::print_output(id.as_str(), global.quiet);
            }
            Ok(())
        }

        BookingsCommand::Quote {
            room,
            check_in,
            check_out,
        } => {
            let check_in = parse_date(&check_in, "check-in")?;
            let check_out = parse_date(&check_out, "check-out")?;
            let snap = util::load(controller, &[Collection::Rooms], global).await?;
            let found = snap
                .room(&room)
                .ok_or_else(|| util::not_found("room", &room))?;
            let quote = hoteldesk_core::pricing::quote(found.price, check_in, check_out)
                .ok_or_else(|| CliError::Validation {
                    field: "check-out".into(),
                    reason: "Check-out date must be after check-in date".into(),
                })?;
            let priced = QuoteView {
                room_id: found.id.to_string(),
                room_number: found.number.clone(),
                check_in,
                check_out,
                quote,
            };
            let out = output::render_single(global.format(), &priced, quote_detail, |q| {
                view::format_amount(q.quote.total)
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BookingsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Are you sure you want to delete booking {id}?"),
                global.yes,
            )? {
                return Ok(());
            }
            let mutation = controller.delete_booking(&id).await.map_err(|e| {
                CliError::from_core(e, MutationKind::DeleteBooking.failure_fallback())
            })?;
            output::notice(mutation.message(), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(check_in: Option<&str>, check_out: Option<&str>) -> CreateArgs {
        CreateArgs {
            guest: "g1".into(),
            room: "r1".into(),
            check_in: check_in.map(Into::into),
            check_out: check_out.map(Into::into),
            number_of_guests: "2".into(),
            payment: PaymentArg::Paid,
            requests: String::new(),
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn dates_default_to_tonight() {
        let form = create_form(args(None, None), day("2026-03-10"));
        assert_eq!(form.check_in, "2026-03-10");
        assert_eq!(form.check_out, "2026-03-11");
    }

    #[test]
    fn check_out_follows_explicit_check_in() {
        let form = create_form(args(Some("2026-04-01"), None), day("2026-03-10"));
        assert_eq!(form.check_in, "2026-04-01");
        assert_eq!(form.check_out, "2026-04-02");
    }

    #[test]
    fn explicit_dates_are_kept() {
        let form = create_form(args(Some("2026-04-01"), Some("2026-04-05")), day("2026-03-10"));
        assert_eq!(form.check_out, "2026-04-05");
        assert_eq!(form.number_of_guests, "2");
    }

    #[test]
    fn bad_quote_date_is_a_validation_error() {
        assert!(matches!(
            parse_date("03/10/2026", "check-in"),
            Err(CliError::Validation { .. })
        ));
    }
}
