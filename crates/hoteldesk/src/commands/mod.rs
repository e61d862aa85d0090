//! Command dispatch: bridges CLI args -> Controller calls -> output formatting.

pub mod bookings;
pub mod config_cmd;
pub mod dashboard;
pub mod guests;
pub mod rooms;
pub mod status;
pub mod util;

use hoteldesk_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(controller, global).await,
        Command::Dashboard => dashboard::handle(controller, global).await,
        Command::Rooms(args) => rooms::handle(controller, args, global).await,
        Command::Guests(args) => guests::handle(controller, args, global).await,
        Command::Bookings(args) => bookings::handle(controller, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are handled before dispatch".into(),
        )),
    }
}
