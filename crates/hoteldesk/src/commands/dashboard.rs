//! Front desk dashboard: counts and alerts.

use hoteldesk_core::{Controller, Dashboard, dashboard};

use crate::cli::GlobalOpts;
use crate::config::color_mode;
use crate::error::CliError;
use crate::output;

use super::util;

fn render(dash: &Dashboard, color: bool) -> String {
    let s = &dash.stats;
    let mut lines = vec![
        format!("Available Rooms:  {}", s.available_rooms),
        format!("Occupied Rooms:   {}", s.occupied_rooms),
        format!("Total Guests:     {}", s.total_guests),
        format!("Active Bookings:  {}", s.active_bookings),
        String::new(),
        "Alerts".to_owned(),
    ];
    lines.extend(
        dash.alerts
            .iter()
            .map(|a| format!("  {}", output::paint(&a.to_string(), a.is_warning(), color))),
    );
    lines.join("\n")
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    // Stats over partial data are still useful; nothing is required.
    let snap = util::load(controller, &[], global).await?;
    let dash = Dashboard::compute(&snap, dashboard::today());
    let color = output::should_color(color_mode(global));
    let out = output::render_single(
        global.format(),
        &dash,
        |d| render(d, color),
        |d| {
            format!(
                "{}\n{}\n{}\n{}",
                d.stats.available_rooms,
                d.stats.occupied_rooms,
                d.stats.total_guests,
                d.stats.active_bookings
            )
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoteldesk_core::{Alert, DashboardStats};

    #[test]
    fn renders_counts_then_alerts() {
        let dash = Dashboard {
            stats: DashboardStats {
                available_rooms: 3,
                occupied_rooms: 1,
                total_guests: 4,
                active_bookings: 2,
            },
            alerts: vec![Alert::Maintenance(1), Alert::CheckInsToday(2)],
        };
        let text = render(&dash, false);
        assert!(text.starts_with("Available Rooms:  3\n"));
        assert!(text.ends_with("Alerts\n  1 room(s) under maintenance\n  2 check-in(s) today"));
    }
}
