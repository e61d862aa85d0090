//! API reachability check.

use serde::Serialize;

use hoteldesk_core::{ApiStatus, Controller};

use crate::cli::GlobalOpts;
use crate::config::color_mode;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct StatusView {
    api_url: String,
    status: &'static str,
    connected: bool,
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let spinner = util::spinner(global, "Checking API...");
    let status = controller.ping().await;
    spinner.finish_and_clear();

    let api_url = controller.config().api_url.to_string();
    if status != ApiStatus::Connected {
        return Err(CliError::ApiUnavailable {
            url: api_url,
            status: status.label().to_owned(),
        });
    }

    let view = StatusView {
        api_url,
        status: status.label(),
        connected: true,
    };
    let color = output::should_color(color_mode(global));
    let out = output::render_single(
        global.format(),
        &view,
        |v| format!("{} ({})", output::paint(v.status, false, color), v.api_url),
        |v| v.status.to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
