//! `hoteldesk-tui`: terminal front desk for the hotel management API.
//!
//! Five tabs (Dashboard, Rooms, Guests, Bookings, New Booking) over the
//! snapshots held by `hoteldesk-core`'s [`Controller`]. A background data
//! bridge forwards every snapshot change into the action loop.
//!
//! Logs go to a daily-rolling file under the platform data directory so
//! they never touch the terminal.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use hoteldesk_core::{ClientConfig, Controller};

use crate::app::App;

/// Terminal dashboard for rooms, guests, and bookings.
#[derive(Parser, Debug)]
#[command(name = "hoteldesk-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short = 'p', long, env = "HOTELDESK_PROFILE")]
    profile: Option<String>,

    /// API root, overrides the profile (e.g. http://localhost:5000)
    #[arg(short = 'u', long, env = "HOTELDESK_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(long)]
    timeout: Option<u64>,

    /// Log directory (defaults to the platform data dir)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing. Hold the guard until exit so buffered lines flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "hoteldesk_tui={log_level},hoteldesk_core={log_level},hoteldesk_api={log_level}"
        ))
    });

    let log_dir = cli.log_dir.clone().unwrap_or_else(hoteldesk_config::log_dir);
    let file_appender = tracing_appender::rolling::daily(log_dir, "hoteldesk-tui.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Profile from the config file, then `--api-url` / `--timeout` on top.
fn build_client_config(cli: &Cli) -> Result<ClientConfig> {
    let config = hoteldesk_config::load_config_or_default();
    let mut client = config.client_config(cli.profile.as_deref())?;

    if let Some(raw) = cli.api_url.as_deref() {
        let url = hoteldesk_config::validate_api_url(raw)?;
        client.api_url = url;
    }
    if let Some(secs) = cli.timeout {
        client = client.with_timeout_secs(secs);
    }
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    color_eyre::install()?;

    let _log_guard = setup_tracing(&cli);

    let client_config = build_client_config(&cli)?;
    info!(
        api_url = %client_config.api_url,
        profile = cli.profile.as_deref().unwrap_or("(default)"),
        "starting hoteldesk-tui"
    );

    let controller = Controller::new(client_config)?;
    let mut app = App::new(controller);
    app.run().await?;

    Ok(())
}
