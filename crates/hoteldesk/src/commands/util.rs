//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use hoteldesk_core::{
    Collection, Controller, HotelSnapshot, PaymentStatus, RoomStatus, RoomType,
};

use crate::cli::{GlobalOpts, PaymentArg, RoomStatusArg, RoomTypeArg};
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to prompt on, `--yes` is mandatory.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.to_owned(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Reload all collections and return the snapshot.
///
/// A failure in one of `needed` aborts the command; other failures only
/// produce a notice, since the rest of the output is still usable.
pub async fn load(
    controller: &Controller,
    needed: &[Collection],
    global: &GlobalOpts,
) -> Result<HotelSnapshot, CliError> {
    let spinner = spinner(global, "Loading hotel data...");
    let mut report = controller.reload().await;
    spinner.finish_and_clear();

    if let Some(pos) = report
        .failures
        .iter()
        .position(|(collection, _)| needed.contains(collection))
    {
        let (collection, err) = report.failures.swap_remove(pos);
        tracing::debug!(%collection, "required collection failed to load");
        return Err(CliError::from_core(
            err,
            &format!("Failed to load {collection}"),
        ));
    }
    for notice in report.notices() {
        output::notice(&notice, global.quiet);
    }
    Ok(controller.snapshot())
}

/// Spinner on stderr while a request is in flight. Hidden when quiet or
/// not attached to a terminal.
pub fn spinner(global: &GlobalOpts, message: &str) -> ProgressBar {
    if global.quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn not_found(resource_type: &str, identifier: &str) -> CliError {
    CliError::NotFound {
        resource_type: resource_type.into(),
        identifier: identifier.into(),
        list_command: format!("{resource_type}s list"),
    }
}

// ── Arg → domain conversions ────────────────────────────────────────

impl From<RoomTypeArg> for RoomType {
    fn from(arg: RoomTypeArg) -> Self {
        match arg {
            RoomTypeArg::Single => Self::Single,
            RoomTypeArg::Double => Self::Double,
            RoomTypeArg::Suite => Self::Suite,
            RoomTypeArg::Deluxe => Self::Deluxe,
        }
    }
}

impl From<RoomStatusArg> for RoomStatus {
    fn from(arg: RoomStatusArg) -> Self {
        match arg {
            RoomStatusArg::Available => Self::Available,
            RoomStatusArg::Occupied => Self::Occupied,
            RoomStatusArg::Maintenance => Self::Maintenance,
        }
    }
}

impl From<PaymentArg> for PaymentStatus {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Pending => Self::Pending,
            PaymentArg::Paid => Self::Paid,
            PaymentArg::Partial => Self::Partial,
            PaymentArg::Refunded => Self::Refunded,
        }
    }
}
