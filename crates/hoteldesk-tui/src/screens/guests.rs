//! Guests screen: guest table, add/edit form, and a per-guest bookings
//! popup.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState, Wrap};

use hoteldesk_core::form::ID_PROOF_CHOICES;
use hoteldesk_core::view::{self, GuestBookings, GuestRow};
use hoteldesk_core::{GuestForm, HotelSnapshot, MutationKind};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::screens::{apply_data, panel, step};
use crate::theme;
use crate::widgets::form::{self, TextField};
use crate::widgets::sub_tabs;

// ── Form overlay ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuestField {
    Name,
    Email,
    Phone,
    IdProof,
    IdNumber,
    Street,
    City,
    Country,
}

impl GuestField {
    const ALL: [Self; 8] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::IdProof,
        Self::IdNumber,
        Self::Street,
        Self::City,
        Self::Country,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::IdProof => "ID Proof",
            Self::IdNumber => "ID Number",
            Self::Street => "Street",
            Self::City => "City",
            Self::Country => "Country",
        }
    }

    fn step(self, delta: isize) -> Self {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[form::cycle(idx, Self::ALL.len(), delta)]
    }
}

struct GuestEditor {
    form: GuestForm,
    name: TextField,
    email: TextField,
    phone: TextField,
    id_number: TextField,
    street: TextField,
    city: TextField,
    country: TextField,
    field: GuestField,
    saving: bool,
}

impl GuestEditor {
    fn new(form: GuestForm) -> Self {
        Self {
            name: TextField::new(&form.name),
            email: TextField::new(&form.email),
            phone: TextField::new(&form.phone),
            id_number: TextField::new(&form.id_number),
            street: TextField::new(&form.street),
            city: TextField::new(&form.city),
            country: TextField::new(&form.country),
            form,
            field: GuestField::Name,
            saving: false,
        }
    }

    fn to_form(&self) -> GuestForm {
        GuestForm {
            name: self.name.value().to_owned(),
            email: self.email.value().to_owned(),
            phone: self.phone.value().to_owned(),
            id_number: self.id_number.value().to_owned(),
            street: self.street.value().to_owned(),
            city: self.city.value().to_owned(),
            country: self.country.value().to_owned(),
            ..self.form.clone()
        }
    }

    fn text(&self, field: GuestField) -> Option<&TextField> {
        match field {
            GuestField::Name => Some(&self.name),
            GuestField::Email => Some(&self.email),
            GuestField::Phone => Some(&self.phone),
            GuestField::IdNumber => Some(&self.id_number),
            GuestField::Street => Some(&self.street),
            GuestField::City => Some(&self.city),
            GuestField::Country => Some(&self.country),
            GuestField::IdProof => None,
        }
    }

    fn text_mut(&mut self, field: GuestField) -> Option<&mut TextField> {
        match field {
            GuestField::Name => Some(&mut self.name),
            GuestField::Email => Some(&mut self.email),
            GuestField::Phone => Some(&mut self.phone),
            GuestField::IdNumber => Some(&mut self.id_number),
            GuestField::Street => Some(&mut self.street),
            GuestField::City => Some(&mut self.city),
            GuestField::Country => Some(&mut self.country),
            GuestField::IdProof => None,
        }
    }

    fn cycle_id_proof(&mut self, delta: isize) {
        let next = ID_PROOF_CHOICES
            .iter()
            .position(|&p| p == self.form.id_proof)
            .map_or(0, |i| form::cycle(i, ID_PROOF_CHOICES.len(), delta));
        self.form.id_proof = ID_PROOF_CHOICES[next].to_owned();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.field = self.field.step(1),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.step(-1),
            KeyCode::Left if self.field == GuestField::IdProof => self.cycle_id_proof(-1),
            KeyCode::Right | KeyCode::Char(' ') if self.field == GuestField::IdProof => {
                self.cycle_id_proof(1);
            }
            _ => {
                let field = self.field;
                if let Some(input) = self.text_mut(field) {
                    input.handle_key(key);
                }
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = if self.form.is_edit() {
            format!("Edit Guest {}", self.form.name)
        } else {
            "Add New Guest".to_owned()
        };
        let inner = form::popup(frame, area, &title, 64, 13);
        let mut constraints = vec![Constraint::Length(1); GuestField::ALL.len()];
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        for (i, field) in GuestField::ALL.into_iter().enumerate() {
            let active = self.field == field;
            match self.text(field) {
                Some(input) => form::render_text_field(frame, rows[i], field.label(), input, active),
                None => form::render_choice(frame, rows[i], field.label(), &self.form.id_proof, active),
            }
        }

        let hints = if self.saving {
            Line::from(Span::styled("  Saving…", theme::key_hint()))
        } else {
            sub_tabs::render_hints(&[("Enter", "save"), ("Tab", "next field"), ("Esc", "cancel")])
        };
        frame.render_widget(Paragraph::new(hints), rows[rows.len() - 1]);
    }
}

// ── Screen ──────────────────────────────────────────────────────────

pub struct GuestsScreen {
    focused: bool,
    snapshot: HotelSnapshot,
    rows: Vec<GuestRow>,
    table_state: TableState,
    editor: Option<GuestEditor>,
    /// Open bookings popup and its scroll offset.
    bookings_popup: Option<(GuestBookings, u16)>,
}

impl GuestsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            snapshot: HotelSnapshot::default(),
            rows: Vec::new(),
            table_state: TableState::default(),
            editor: None,
            bookings_popup: None,
        }
    }

    fn recompute(&mut self) {
        self.rows = view::guest_rows(&self.snapshot.guests);
        let clamped = step(self.table_state.selected(), self.rows.len(), 0);
        self.table_state.select(clamped);
    }

    fn selected_row(&self) -> Option<&GuestRow> {
        self.table_state.selected().and_then(|i| self.rows.get(i))
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
                Some(Action::SaveGuest(Box::new(editor.to_form())))
            }
            KeyCode::Enter => None,
            _ => {
                editor.handle_key(key);
                None
            }
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        let Some((_, scroll)) = self.bookings_popup.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('b' | 'q') => self.bookings_popup = None,
            KeyCode::Char('j') | KeyCode::Down => *scroll = scroll.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => *scroll = scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(
            ["Name", "Email", "Phone", "ID Proof", "Address"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|g| {
                Row::new(vec![
                    Cell::from(g.name.clone()),
                    Cell::from(g.email.clone()),
                    Cell::from(g.phone.clone()),
                    Cell::from(g.id_document.clone()),
                    Cell::from(g.address.clone()),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(14),
            Constraint::Fill(2),
            Constraint::Fill(3),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_bookings_popup(frame: &mut Frame, area: Rect, bookings: &GuestBookings, scroll: u16) {
        let inner = form::popup(frame, area, "Guest Bookings", 60, 20);
        let [body, hints] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
        frame.render_widget(
            Paragraph::new(bookings.to_string())
                .style(theme::table_row())
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0)),
            body,
        );
        frame.render_widget(
            Paragraph::new(sub_tabs::render_hints(&[("j/k", "scroll"), ("Esc", "close")])),
            hints,
        );
    }
}

impl Default for GuestsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for GuestsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editor.is_some() {
            return Ok(self.handle_editor_key(key));
        }
        if self.bookings_popup.is_some() {
            self.handle_popup_key(key);
            return Ok(None);
        }

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
            KeyCode::Char('n') => self.editor = Some(GuestEditor::new(GuestForm::default())),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(row) = self.selected_row() {
                    let form = GuestForm::prefill(&self.snapshot, Some(row.id.as_str()));
                    self.editor = Some(GuestEditor::new(form));
                }
            }
            KeyCode::Char('b') => {
                if let Some(row) = self.selected_row() {
                    self.bookings_popup =
                        view::guest_bookings(&self.snapshot, row.id.as_str()).map(|b| (b, 0));
                }
            }
            KeyCode::Char('d') => {
                if let Some(row) = self.selected_row() {
                    return Ok(Some(Action::RequestDelete(ConfirmAction::DeleteGuest {
                        id: row.id.clone(),
                        name: row.name.clone(),
                    })));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if apply_data(&mut self.snapshot, action) {
            if matches!(action, Action::GuestsUpdated(_)) {
                self.recompute();
            }
            return Ok(None);
        }

        if let Action::MutationFinished { kind, ok } = action {
            if matches!(kind, MutationKind::CreateGuest | MutationKind::UpdateGuest) {
                if *ok {
                    self.editor = None;
                } else if let Some(editor) = self.editor.as_mut() {
                    editor.saving = false;
                }
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel(format!(" Guests ({}) ", self.rows.len()), self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [table, hints] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        if self.rows.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {}", view::NO_GUESTS), theme::key_hint())),
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
                ("b", "bookings"),
            ])),
            hints,
        );

        if let Some((bookings, scroll)) = &self.bookings_popup {
            Self::render_bookings_popup(frame, area, bookings, *scroll);
        }
        if let Some(editor) = &self.editor {
            editor.render(frame, area);
        }
    }

    fn captures_input(&self) -> bool {
        self.editor.is_some() || self.bookings_popup.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static str {
        "n new  e edit  d delete  b bookings"
    }
}
