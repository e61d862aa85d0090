//! Rooms screen: filterable room table with an add/edit form overlay.

use std::borrow::Cow;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use hoteldesk_core::form::AMENITY_CHOICES;
use hoteldesk_core::view::{self, RoomRow};
use hoteldesk_core::{MutationKind, Room, RoomFilter, RoomForm, RoomStatus, RoomType, Snapshot};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::screens::{panel, step};
use crate::theme;
use crate::widgets::form::{self, TextField};
use crate::widgets::sub_tabs;

const ROOM_TYPES: [RoomType; 4] = [
    RoomType::Single,
    RoomType::Double,
    RoomType::Suite,
    RoomType::Deluxe,
];

const ROOM_STATUSES: [RoomStatus; 3] = [
    RoomStatus::Available,
    RoomStatus::Occupied,
    RoomStatus::Maintenance,
];

/// Advance an optional filter: None → first → … → last → None.
fn cycle_filter<T: Clone + PartialEq>(current: Option<&T>, all: &[T]) -> Option<T> {
    match current.and_then(|c| all.iter().position(|x| x == c)) {
        None => all.first().cloned(),
        Some(i) => all.get(i + 1).cloned(),
    }
}

/// Step an enum value through `all`, wrapping. Unknown values restart at
/// the first entry.
fn cycle_value<T: Clone + PartialEq>(current: &T, all: &[T], delta: isize) -> T {
    let idx = all.iter().position(|x| x == current);
    match idx {
        Some(i) => all[form::cycle(i, all.len(), delta)].clone(),
        None => all[0].clone(),
    }
}

// ── Form overlay ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoomField {
    Number,
    Type,
    Price,
    Capacity,
    Status,
    Amenities,
}

impl RoomField {
    const ALL: [Self; 6] = [
        Self::Number,
        Self::Type,
        Self::Price,
        Self::Capacity,
        Self::Status,
        Self::Amenities,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Number => "Room Number",
            Self::Type => "Type",
            Self::Price => "Price/Night",
            Self::Capacity => "Capacity",
            Self::Status => "Status",
            Self::Amenities => "Amenities",
        }
    }

    fn step(self, delta: isize) -> Self {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[form::cycle(idx, Self::ALL.len(), delta)]
    }
}

struct RoomEditor {
    /// Carries the id, enum fields, and amenities; text lives in the inputs.
    form: RoomForm,
    number: TextField,
    price: TextField,
    capacity: TextField,
    field: RoomField,
    amenity_cursor: usize,
    saving: bool,
}

impl RoomEditor {
    fn new(form: RoomForm) -> Self {
        Self {
            number: TextField::new(&form.number),
            price: TextField::new(&form.price),
            capacity: TextField::new(&form.capacity),
            form,
            field: RoomField::Number,
            amenity_cursor: 0,
            saving: false,
        }
    }

    fn to_form(&self) -> RoomForm {
        RoomForm {
            number: self.number.value().to_owned(),
            price: self.price.value().to_owned(),
            capacity: self.capacity.value().to_owned(),
            ..self.form.clone()
        }
    }

    fn title(&self) -> String {
        if self.form.is_edit() {
            format!("Edit Room {}", self.form.number)
        } else {
            "Add New Room".to_owned()
        }
    }

    fn text_field(&mut self) -> Option<&mut TextField> {
        match self.field {
            RoomField::Number => Some(&mut self.number),
            RoomField::Price => Some(&mut self.price),
            RoomField::Capacity => Some(&mut self.capacity),
            _ => None,
        }
    }

    /// Field navigation and editing. Enter and Esc are handled by the screen.
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.field = self.field.step(1),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.step(-1),
            code => match self.field {
                RoomField::Type => {
                    if let Some(delta) = choice_delta(code) {
                        self.form.room_type = cycle_value(&self.form.room_type, &ROOM_TYPES, delta);
                    }
                }
                RoomField::Status => {
                    if let Some(delta) = choice_delta(code) {
                        self.form.status = cycle_value(&self.form.status, &ROOM_STATUSES, delta);
                    }
                }
                RoomField::Amenities => match code {
                    KeyCode::Left => {
                        self.amenity_cursor =
                            form::cycle(self.amenity_cursor, AMENITY_CHOICES.len(), -1);
                    }
                    KeyCode::Right => {
                        self.amenity_cursor =
                            form::cycle(self.amenity_cursor, AMENITY_CHOICES.len(), 1);
                    }
                    KeyCode::Char(' ') => {
                        self.form.toggle_amenity(AMENITY_CHOICES[self.amenity_cursor]);
                    }
                    _ => {}
                },
                _ => {
                    if let Some(input) = self.text_field() {
                        input.handle_key(key);
                    }
                }
            },
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let inner = form::popup(frame, area, &self.title(), 64, 12);
        let rows = Layout::vertical([
            Constraint::Length(1), // number
            Constraint::Length(1), // type
            Constraint::Length(1), // price
            Constraint::Length(1), // capacity
            Constraint::Length(1), // status
            Constraint::Length(1), // amenities
            Constraint::Min(1),
            Constraint::Length(1), // hints
        ])
        .split(inner);

        for (i, field) in RoomField::ALL.into_iter().enumerate() {
            let active = self.field == field;
            let area = rows[i];
            match field {
                RoomField::Number => {
                    form::render_text_field(frame, area, field.label(), &self.number, active);
                }
                RoomField::Price => {
                    form::render_text_field(frame, area, field.label(), &self.price, active);
                }
                RoomField::Capacity => {
                    form::render_text_field(frame, area, field.label(), &self.capacity, active);
                }
                RoomField::Type => {
                    form::render_choice(frame, area, field.label(), &self.form.room_type.label(), active);
                }
                RoomField::Status => {
                    form::render_choice(frame, area, field.label(), &self.form.status.label(), active);
                }
                RoomField::Amenities => self.render_amenities(frame, area, active),
            }
        }

        let hints = if self.saving {
            Line::from(Span::styled("  Saving…", theme::key_hint()))
        } else {
            sub_tabs::render_hints(&[
                ("Enter", "save"),
                ("Tab", "next field"),
                ("Space", "toggle"),
                ("Esc", "cancel"),
            ])
        };
        frame.render_widget(Paragraph::new(hints), rows[7]);
    }

    fn render_amenities(&self, frame: &mut Frame, area: Rect, active: bool) {
        let [label_area, value_area] =
            Layout::horizontal([Constraint::Length(form::LABEL_WIDTH), Constraint::Min(1)])
                .areas(area);
        let label_style = Style::default().fg(if active { theme::CYAN } else { theme::TEXT });
        let marker = if active { "▸ " } else { "  " };
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{marker}{}", RoomField::Amenities.label()),
                label_style,
            )),
            label_area,
        );

        let mut spans = Vec::with_capacity(AMENITY_CHOICES.len() * 2);
        for (i, amenity) in AMENITY_CHOICES.iter().enumerate() {
            let mark = if self.form.has_amenity(amenity) { "■" } else { "□" };
            let style = if active && i == self.amenity_cursor {
                theme::table_selected()
            } else if self.form.has_amenity(amenity) {
                Style::default().fg(theme::ACCENT)
            } else {
                theme::table_row()
            };
            spans.push(Span::styled(format!("{mark} {amenity}"), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), value_area);
    }
}

fn choice_delta(code: KeyCode) -> Option<isize> {
    match code {
        KeyCode::Left => Some(-1),
        KeyCode::Right | KeyCode::Char(' ') => Some(1),
        _ => None,
    }
}

// ── Screen ──────────────────────────────────────────────────────────

pub struct RoomsScreen {
    focused: bool,
    rooms: Arc<Snapshot<Room>>,
    filter: RoomFilter,
    rows: Vec<RoomRow>,
    table_state: TableState,
    editor: Option<RoomEditor>,
}

impl RoomsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            rooms: Arc::new(Snapshot::empty()),
            filter: RoomFilter::default(),
            rows: Vec::new(),
            table_state: TableState::default(),
            editor: None,
        }
    }

    fn recompute(&mut self) {
        self.rows = view::room_rows(&self.rooms, &self.filter);
        let selected = self.table_state.selected();
        let clamped = step(selected, self.rows.len(), 0);
        self.table_state.select(clamped);
    }

    fn selected_row(&self) -> Option<&RoomRow> {
        self.table_state.selected().and_then(|i| self.rows.get(i))
    }

    fn open_editor(&mut self, room_id: Option<&str>) {
        let form = room_id
            .and_then(|id| self.rooms.get(id))
            .map_or_else(RoomForm::default, |room| RoomForm::from_room(room));
        self.editor = Some(RoomEditor::new(form));
    }

    fn handle_editor_key(&mut self, key: KeyEvent) -> Option<Action> {
        let editor = self.editor.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.editor = None;
                None
            }
            KeyCode::Enter if !editor.saving => {
                editor.saving = true;
                Some(Action::SaveRoom(Box::new(editor.to_form())))
            }
            KeyCode::Enter => None,
            _ => {
                editor.handle_key(key);
                None
            }
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(
            ["Room", "Type", "Price", "Status", "Capacity", "Amenities"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.number.clone()),
                    Cell::from(r.room_type.clone()),
                    Cell::from(r.price.clone()),
                    Cell::from(r.status.label()).style(theme::room_status(&r.status)),
                    Cell::from(r.capacity.clone()),
                    Cell::from(r.amenities.clone()),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Fill(1),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }
}

impl Default for RoomsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RoomsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editor.is_some() {
            return Ok(self.handle_editor_key(key));
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.table_state
                    .select(step(self.table_state.selected(), self.rows.len(), 1));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.table_state
                    .select(step(self.table_state.selected(), self.rows.len(), -1));
            }
            KeyCode::Char('g') => self.table_state.select(step(Some(0), self.rows.len(), 0)),
            KeyCode::Char('G') => {
                self.table_state
                    .select(self.rows.len().checked_sub(1));
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.table_state
                    .select(step(self.table_state.selected(), self.rows.len(), 10));
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.table_state
                    .select(step(self.table_state.selected(), self.rows.len(), -10));
            }
            KeyCode::Char('s') => {
                self.filter.status = cycle_filter(self.filter.status.as_ref(), &ROOM_STATUSES);
                self.recompute();
            }
            KeyCode::Char('t') => {
                self.filter.room_type = cycle_filter(self.filter.room_type.as_ref(), &ROOM_TYPES);
                self.recompute();
            }
            KeyCode::Char('x') => {
                self.filter = RoomFilter::default();
                self.recompute();
            }
            KeyCode::Char('n') => self.open_editor(None),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_row().map(|r| r.id.clone()) {
                    self.open_editor(Some(id.as_str()));
                }
            }
            KeyCode::Char('d') => {
                if let Some(row) = self.selected_row() {
                    return Ok(Some(Action::RequestDelete(ConfirmAction::DeleteRoom {
                        id: row.id.clone(),
                        number: row.number.clone(),
                    })));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::RoomsUpdated(rooms) => {
                self.rooms = Arc::clone(rooms);
                self.recompute();
            }
            Action::MutationFinished { kind, ok }
                if matches!(kind, MutationKind::CreateRoom | MutationKind::UpdateRoom) =>
            {
                if *ok {
                    self.editor = None;
                } else if let Some(editor) = self.editor.as_mut() {
                    editor.saving = false;
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" Rooms ({}/{}) ", self.rows.len(), self.rooms.len());
        let block = panel(title, self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [filters, table, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let status = self
            .filter
            .status
            .as_ref()
            .map_or(Cow::Borrowed("All"), RoomStatus::label);
        let room_type = self
            .filter
            .room_type
            .as_ref()
            .map_or(Cow::Borrowed("All"), RoomType::label);
        frame.render_widget(
            Paragraph::new(sub_tabs::render_filter_bar(&[
                ("Status", &status),
                ("Type", &room_type),
            ])),
            filters,
        );

        if self.rows.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {}", view::NO_ROOMS), theme::key_hint())),
                table,
            );
        } else {
            self.render_table(frame, table);
        }

        frame.render_widget(
            Paragraph::new(sub_tabs::render_hints(&[
                ("j/k", "navigate"),
                ("n", "new"),
                ("e", "edit"),
                ("d", "delete"),
                ("s", "status"),
                ("t", "type"),
                ("x", "clear filters"),
            ])),
            hints,
        );

        if let Some(editor) = &self.editor {
            editor.render(frame, area);
        }
    }

    fn captures_input(&self) -> bool {
        self.editor.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static str {
        "n new  e edit  d delete  s/t filter"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::screens::fixtures;
    use pretty_assertions::assert_eq;

    fn press(screen: &mut RoomsScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_text(screen: &mut RoomsScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn loaded() -> RoomsScreen {
        let mut screen = RoomsScreen::new();
        fixtures::load(&mut screen, &fixtures::snapshot());
        screen
    }

    #[test]
    fn filter_cycle_ends_at_all() {
        assert_eq!(
            cycle_filter(None, &ROOM_STATUSES),
            Some(RoomStatus::Available)
        );
        assert_eq!(
            cycle_filter(Some(&RoomStatus::Maintenance), &ROOM_STATUSES),
            None
        );
    }

    #[test]
    fn status_filter_narrows_rows() {
        let mut screen = loaded();
        assert_eq!(screen.rows.len(), 2);

        press(&mut screen, KeyCode::Char('s'));
        assert_eq!(screen.filter.status, Some(RoomStatus::Available));
        assert_eq!(screen.rows.len(), 1);
        assert_eq!(screen.rows[0].number, "101");

        press(&mut screen, KeyCode::Char('x'));
        assert_eq!(screen.rows.len(), 2);
    }

    #[test]
    fn new_room_form_submits_typed_values() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('n'));
        assert!(screen.captures_input());

        type_text(&mut screen, "301");
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Right); // Single → Double
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "3500");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "3");
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Char(' ')); // wifi

        let Some(Action::SaveRoom(form)) = press(&mut screen, KeyCode::Enter) else {
            panic!("expected SaveRoom");
        };
        assert!(!form.is_edit());
        assert_eq!(form.number, "301");
        assert_eq!(form.room_type, RoomType::Double);
        assert_eq!(form.price, "3500");
        assert_eq!(form.capacity, "3");
        assert_eq!(form.amenities, vec!["wifi"]);

        // In flight: a second Enter sends nothing.
        assert!(press(&mut screen, KeyCode::Enter).is_none());
    }

    #[test]
    fn edit_prefills_and_failure_keeps_form_open() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('e'));
        let editor = screen.editor.as_ref().unwrap();
        assert!(editor.form.is_edit());
        assert_eq!(editor.number.value(), "101");

        press(&mut screen, KeyCode::Enter);
        screen
            .update(&Action::MutationFinished {
                kind: MutationKind::UpdateRoom,
                ok: false,
            })
            .unwrap();
        assert!(screen.editor.as_ref().is_some_and(|e| !e.saving));

        screen
            .update(&Action::MutationFinished {
                kind: MutationKind::UpdateRoom,
                ok: true,
            })
            .unwrap();
        assert!(screen.editor.is_none());
    }

    #[test]
    fn delete_asks_for_confirmation() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('j'));
        let action = press(&mut screen, KeyCode::Char('d'));
        assert!(matches!(
            action,
            Some(Action::RequestDelete(ConfirmAction::DeleteRoom { ref number, .. })) if number == "201"
        ));
    }

    #[test]
    fn empty_table_message() {
        let mut screen = RoomsScreen::new();
        screen.update(&fixtures::empty_rooms()).unwrap();
        let text = fixtures::render_text(&screen, 100, 12);
        assert!(text.contains("No rooms found"));
    }
}
