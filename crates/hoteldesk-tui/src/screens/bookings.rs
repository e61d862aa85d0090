//! Bookings screen: all bookings with resolved guest and room names.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use hoteldesk_core::view::{self, BookingRow};
use hoteldesk_core::{Booking, HotelSnapshot};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::screen::ScreenId;
use crate::screens::{apply_data, panel, step};
use crate::theme;
use crate::widgets::sub_tabs;

pub struct BookingsScreen {
    focused: bool,
    snapshot: HotelSnapshot,
    rows: Vec<BookingRow>,
    table_state: TableState,
    detail_open: bool,
}

impl BookingsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            snapshot: HotelSnapshot::default(),
            rows: Vec::new(),
            table_state: TableState::default(),
            detail_open: false,
        }
    }

    fn recompute(&mut self) {
        self.rows = view::booking_rows(&self.snapshot);
        let clamped = step(self.table_state.selected(), self.rows.len(), 0);
        self.table_state.select(clamped);
        if clamped.is_none() {
            self.detail_open = false;
        }
    }

    fn selected_row(&self) -> Option<&BookingRow> {
        self.table_state.selected().and_then(|i| self.rows.get(i))
    }

    fn selected_booking(&self) -> Option<&Booking> {
        self.selected_row()
            .and_then(|row| self.snapshot.booking(row.id.as_str()))
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(
            ["Booking", "Guest", "Room", "Check-in", "Check-out", "Status", "Amount"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|b| {
                Row::new(vec![
                    Cell::from(b.short_id.clone()),
                    Cell::from(b.guest_name.clone()),
                    Cell::from(b.room_number.clone()),
                    Cell::from(b.check_in.clone()),
                    Cell::from(b.check_out.clone()),
                    Cell::from(b.status.to_string()).style(theme::booking_status(&b.status)),
                    Cell::from(b.amount.clone()),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Length(10),
            Constraint::Fill(2),
            Constraint::Length(14),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(12),
            Constraint::Length(12),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Booking Detail ".into(), false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (Some(row), Some(booking)) = (self.selected_row(), self.selected_booking()) else {
            return;
        };
        let row_line = |label: &'static str, value: Span<'static>| {
            Line::from(vec![Span::styled(format!(" {label:<12}"), theme::key_hint()), value])
        };
        let plain = |s: String| Span::styled(s, theme::table_row());

        let payment = booking
            .payment_status
            .as_ref()
            .map_or_else(|| "-".to_owned(), ToString::to_string);
        let payment_style = booking
            .payment_status
            .as_ref()
            .map_or_else(theme::table_row, theme::payment_status);
        let requests = booking
            .special_requests
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or("-")
            .to_owned();

        let lines = vec![
            row_line("Booking", plain(booking.id.to_string())),
            row_line("Guest", plain(row.guest_name.clone())),
            row_line("Room", plain(row.room_number.clone())),
            row_line("Stay", plain(format!("{} → {}", row.check_in, row.check_out))),
            row_line("Guests", plain(booking.number_of_guests.to_string())),
            row_line("Payment", Span::styled(payment, payment_style)),
            row_line("Amount", plain(row.amount.clone())),
            row_line("Requests", plain(requests)),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for BookingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for BookingsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let len = self.rows.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.table_state.select(step(self.table_state.selected(), len, 1));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.table_state.select(step(self.table_state.selected(), len, -1));
            }
            KeyCode::Char('g') => self.table_state.select(step(Some(0), len, 0)),
            KeyCode::Char('G') => self.table_state.select(len.checked_sub(1)),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.table_state.select(step(self.table_state.selected(), len, 10));
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.table_state.select(step(self.table_state.selected(), len, -10));
            }
            KeyCode::Enter => {
                self.detail_open = !self.detail_open && self.selected_row().is_some();
            }
            KeyCode::Char('n') => return Ok(Some(Action::SwitchScreen(ScreenId::NewBooking))),
            KeyCode::Char('d') => {
                if let Some(row) = self.selected_row() {
                    return Ok(Some(Action::RequestDelete(ConfirmAction::DeleteBooking {
                        id: row.id.clone(),
                    })));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if apply_data(&mut self.snapshot, action) {
            self.recompute();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel(format!(" Bookings ({}) ", self.rows.len()), self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [body, hints] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
        let (table, detail) = if self.detail_open {
            let [table, detail] =
                Layout::vertical([Constraint::Min(3), Constraint::Length(10)]).areas(body);
            (table, Some(detail))
        } else {
            (body, None)
        };

        if self.rows.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(" {}", view::NO_BOOKINGS),
                    Style::default().fg(theme::BORDER),
                )),
                table,
            );
        } else {
            self.render_table(frame, table);
        }
        if let Some(detail) = detail {
            self.render_detail(frame, detail);
        }

        frame.render_widget(
            Paragraph::new(sub_tabs::render_hints(&[
                ("j/k", "navigate"),
                ("Enter", "detail"),
                ("n", "new booking"),
                ("d", "delete"),
            ])),
            hints,
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static str {
        "Enter detail  n new  d delete"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::screens::fixtures;
    use hoteldesk_core::Snapshot;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn press(screen: &mut BookingsScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn rows_resolve_names_and_placeholders() {
        let mut screen = BookingsScreen::new();
        fixtures::load(&mut screen, &fixtures::snapshot());
        let text = fixtures::render_text(&screen, 110, 10);
        assert!(text.contains("b1aaaaaa"));
        assert!(text.contains("Ana Cruz"));
        assert!(text.contains("₱4,000"));

        screen
            .update(&Action::GuestsUpdated(Arc::new(Snapshot::empty())))
            .unwrap();
        let text = fixtures::render_text(&screen, 110, 10);
        assert!(text.contains("Guest not found"));
    }

    #[test]
    fn keys_map_to_actions() {
        let mut screen = BookingsScreen::new();
        fixtures::load(&mut screen, &fixtures::snapshot());

        assert!(matches!(
            press(&mut screen, KeyCode::Char('n')),
            Some(Action::SwitchScreen(ScreenId::NewBooking))
        ));
        let Some(Action::RequestDelete(confirm)) = press(&mut screen, KeyCode::Char('d')) else {
            panic!("expected RequestDelete");
        };
        assert_eq!(
            confirm.to_string(),
            "Are you sure you want to delete booking b1aaaaaa?"
        );
    }

    #[test]
    fn detail_shows_payment_and_guests() {
        let mut screen = BookingsScreen::new();
        fixtures::load(&mut screen, &fixtures::snapshot());
        press(&mut screen, KeyCode::Enter);
        let text = fixtures::render_text(&screen, 110, 24);
        assert!(text.contains("Booking Detail"));
        assert!(text.contains("pending"));
    }

    #[test]
    fn empty_state() {
        let mut screen = BookingsScreen::new();
        screen
            .update(&Action::BookingsUpdated(Arc::new(Snapshot::empty())))
            .unwrap();
        assert!(press(&mut screen, KeyCode::Char('d')).is_none());
        let text = fixtures::render_text(&screen, 80, 8);
        assert!(text.contains("No bookings found"));
    }
}
