//! Dashboard screen: headline counters, alerts, and API status.
//!
//! Layout:
//! ┌─ Available ─┐ ┌─ Occupied ─┐ ┌─ Guests ─┐ ┌─ Active Bookings ─┐
//! ├─ Alerts ──────────────────────────┤ ├─ Status ─────────────────┤
//! └───────────────────────────────────┘ └──────────────────────────┘

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use hoteldesk_core::{ApiStatus, Dashboard, HotelSnapshot, dashboard};

use crate::action::Action;
use crate::component::Component;
use crate::screens::{apply_data, panel};
use crate::theme;

pub struct DashboardScreen {
    focused: bool,
    snapshot: HotelSnapshot,
    api_status: ApiStatus,
    /// Recomputed whenever a collection changes.
    dashboard: Dashboard,
}

impl DashboardScreen {
    pub fn new() -> Self {
        let snapshot = HotelSnapshot::default();
        Self {
            focused: false,
            dashboard: Dashboard::compute(&snapshot, dashboard::today()),
            snapshot,
            api_status: ApiStatus::Unknown,
        }
    }

    fn api_color(&self) -> Color {
        match self.api_status {
            ApiStatus::Connected => theme::GREEN,
            ApiStatus::Error => theme::YELLOW,
            ApiStatus::Offline => theme::RED,
            ApiStatus::Unknown => theme::BORDER,
        }
    }

    fn render_stat(frame: &mut Frame, area: Rect, label: &str, value: usize, color: Color) {
        let block = Block::default()
            .title(Span::styled(format!(" {label} "), theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let value = Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);
        frame.render_widget(value, middle);
    }

    fn render_alerts(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Alerts ".into(), false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = self
            .dashboard
            .alerts
            .iter()
            .map(|alert| {
                let (icon, color) = if alert.is_warning() {
                    ("!", theme::YELLOW)
                } else {
                    ("✓", theme::GREEN)
                };
                Line::from(vec![
                    Span::styled(format!(" {icon} "), Style::default().fg(color)),
                    Span::styled(alert.to_string(), theme::table_row()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Status ".into(), false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let row = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!(" {label:<10}"), theme::key_hint()),
                Span::styled(value, theme::table_row()),
            ])
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(" ● ", Style::default().fg(self.api_color())),
                Span::styled(
                    self.api_status.label(),
                    Style::default().fg(self.api_color()),
                ),
            ]),
            Line::from(""),
            row("Today", dashboard::today().format("%Y-%m-%d").to_string()),
            row("Rooms", self.snapshot.rooms.len().to_string()),
            row("Guests", self.snapshot.guests.len().to_string()),
            row("Bookings", self.snapshot.bookings.len().to_string()),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if apply_data(&mut self.snapshot, action) {
            self.dashboard = Dashboard::compute(&self.snapshot, dashboard::today());
        } else if let Action::ApiStatusChanged(status) = action {
            self.api_status = *status;
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Hotel Management ".into(), self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [cards, body] =
            Layout::vertical([Constraint::Length(5), Constraint::Min(4)]).areas(inner);

        let stats = self.dashboard.stats;
        let stat_cards = [
            ("Available Rooms", stats.available_rooms, theme::GREEN),
            ("Occupied Rooms", stats.occupied_rooms, theme::CORAL),
            ("Total Guests", stats.total_guests, theme::CYAN),
            ("Active Bookings", stats.active_bookings, theme::ACCENT),
        ];
        let card_areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(cards);
        for (card, (label, value, color)) in card_areas.iter().zip(stat_cards) {
            Self::render_stat(frame, *card, label, value, color);
        }

        let [alerts, status] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(body);
        self.render_alerts(frame, alerts);
        self.render_status(frame, status);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static str {
        "r reload  c clear"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::screens::fixtures;

    #[test]
    fn counts_and_maintenance_alert() {
        let mut screen = DashboardScreen::new();
        fixtures::load(&mut screen, &fixtures::snapshot());

        let stats = screen.dashboard.stats;
        assert_eq!(stats.available_rooms, 1);
        assert_eq!(stats.total_guests, 1);
        assert_eq!(stats.active_bookings, 1);

        let text = fixtures::render_text(&screen, 110, 20);
        assert!(text.contains("1 room(s) under maintenance"));
        assert!(text.contains("1 booking(s) with pending payment"));
        assert!(!text.contains("All systems operational"));
    }

    #[test]
    fn empty_snapshot_is_all_clear() {
        let mut screen = DashboardScreen::new();
        screen
            .update(&Action::ApiStatusChanged(ApiStatus::Offline))
            .unwrap();
        let text = fixtures::render_text(&screen, 110, 20);
        assert!(text.contains("All systems operational"));
        assert!(text.contains("API Offline"));
    }
}
