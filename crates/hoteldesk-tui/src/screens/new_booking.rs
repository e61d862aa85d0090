//! New Booking screen: guest/room selectors, stay details, and a live
//! preview with the computed total.
//!
//! The screen owns the keyboard while active; Esc leaves it. A submission
//! blocks further submits until the app reports the outcome.

use chrono::NaiveDate;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use hoteldesk_core::view::{self, BookingPreview, SelectOption};
use hoteldesk_core::{BookingForm, EntityId, HotelSnapshot, MutationKind, PaymentStatus, dashboard};

use crate::action::Action;
use crate::component::Component;
use crate::screens::{apply_data, panel};
use crate::theme;
use crate::widgets::form::{self, TextField};
use crate::widgets::sub_tabs;

const PAYMENT_CHOICES: [PaymentStatus; 3] = [
    PaymentStatus::Pending,
    PaymentStatus::Paid,
    PaymentStatus::Partial,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BookingField {
    Guest,
    Room,
    CheckIn,
    CheckOut,
    Guests,
    Payment,
    Requests,
}

impl BookingField {
    const ALL: [Self; 7] = [
        Self::Guest,
        Self::Room,
        Self::CheckIn,
        Self::CheckOut,
        Self::Guests,
        Self::Payment,
        Self::Requests,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Guest => "Guest",
            Self::Room => "Room",
            Self::CheckIn => "Check-in",
            Self::CheckOut => "Check-out",
            Self::Guests => "No. of Guests",
            Self::Payment => "Payment",
            Self::Requests => "Requests",
        }
    }

    fn step(self, delta: isize) -> Self {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[form::cycle(idx, Self::ALL.len(), delta)]
    }
}

/// Move the selection through `options` by `delta`, starting from the
/// first entry when nothing (or something stale) is selected.
fn cycle_option(
    options: &[SelectOption],
    current: Option<&EntityId>,
    delta: isize,
) -> Option<EntityId> {
    if options.is_empty() {
        return None;
    }
    let idx = current.and_then(|id| options.iter().position(|o| &o.id == id));
    let next = match idx {
        Some(i) => form::cycle(i, options.len(), delta),
        None if delta < 0 => options.len() - 1,
        None => 0,
    };
    Some(options[next].id.clone())
}

pub struct NewBookingScreen {
    focused: bool,
    snapshot: HotelSnapshot,
    guest_options: Vec<SelectOption>,
    room_options: Vec<SelectOption>,
    guest_id: Option<EntityId>,
    room_id: Option<EntityId>,
    check_in: TextField,
    check_out: TextField,
    guests: TextField,
    requests: TextField,
    payment: PaymentStatus,
    field: BookingField,
    /// Set while a create request is in flight.
    submitting: bool,
}

impl NewBookingScreen {
    pub fn new() -> Self {
        let mut screen = Self {
            focused: false,
            snapshot: HotelSnapshot::default(),
            guest_options: Vec::new(),
            room_options: Vec::new(),
            guest_id: None,
            room_id: None,
            check_in: TextField::default(),
            check_out: TextField::default(),
            guests: TextField::default(),
            requests: TextField::default(),
            payment: PaymentStatus::Pending,
            field: BookingField::Guest,
            submitting: false,
        };
        screen.reset(dashboard::today());
        screen
    }

    /// Blank form with default dates.
    fn reset(&mut self, today: NaiveDate) {
        let form = BookingForm::with_default_dates(today);
        self.guest_id = None;
        self.room_id = None;
        self.check_in.set_value(&form.check_in);
        self.check_out.set_value(&form.check_out);
        self.guests.set_value(&form.number_of_guests);
        self.requests.set_value(&form.special_requests);
        self.payment = form.payment_status;
        self.field = BookingField::Guest;
    }

    /// Entering the tab: dates go back to today / tomorrow, the rest stays.
    fn reset_dates(&mut self, today: NaiveDate) {
        let mut form = self.to_form();
        form.reset_dates(today);
        self.check_in.set_value(&form.check_in);
        self.check_out.set_value(&form.check_out);
    }

    fn to_form(&self) -> BookingForm {
        BookingForm {
            guest_id: self.guest_id.as_ref().map(ToString::to_string).unwrap_or_default(),
            room_id: self.room_id.as_ref().map(ToString::to_string).unwrap_or_default(),
            check_in: self.check_in.value().to_owned(),
            check_out: self.check_out.value().to_owned(),
            number_of_guests: self.guests.value().to_owned(),
            payment_status: self.payment.clone(),
            special_requests: self.requests.value().to_owned(),
        }
    }

    fn refresh_options(&mut self) {
        self.guest_options = view::guest_options(&self.snapshot.guests);
        self.room_options = view::room_options(&self.snapshot.rooms);
        // Drop selections that vanished or stopped being bookable.
        if let Some(id) = &self.guest_id {
            if !self.guest_options.iter().any(|o| &o.id == id) {
                self.guest_id = None;
            }
        }
        if let Some(id) = &self.room_id {
            if !self.room_options.iter().any(|o| &o.id == id) {
                self.room_id = None;
            }
        }
    }

    fn preview(&self) -> BookingPreview {
        let form = self.to_form();
        view::booking_preview(
            &self.snapshot,
            &form.guest_id,
            &form.room_id,
            form.check_in_date(),
            form.check_out_date(),
        )
    }

    fn text_mut(&mut self) -> Option<&mut TextField> {
        match self.field {
            BookingField::CheckIn => Some(&mut self.check_in),
            BookingField::CheckOut => Some(&mut self.check_out),
            BookingField::Guests => Some(&mut self.guests),
            BookingField::Requests => Some(&mut self.requests),
            _ => None,
        }
    }

    fn cycle_choice(&mut self, delta: isize) {
        match self.field {
            BookingField::Guest => {
                self.guest_id = cycle_option(&self.guest_options, self.guest_id.as_ref(), delta);
            }
            BookingField::Room => {
                self.room_id = cycle_option(&self.room_options, self.room_id.as_ref(), delta);
            }
            BookingField::Payment => {
                let idx = PAYMENT_CHOICES
                    .iter()
                    .position(|p| *p == self.payment)
                    .map_or(0, |i| form::cycle(i, PAYMENT_CHOICES.len(), delta));
                self.payment = PAYMENT_CHOICES[idx].clone();
            }
            _ => {}
        }
    }

    fn is_choice(&self) -> bool {
        matches!(
            self.field,
            BookingField::Guest | BookingField::Room | BookingField::Payment
        )
    }

    fn selected_label(options: &[SelectOption], id: Option<&EntityId>, empty: &str) -> String {
        match id.and_then(|id| options.iter().find(|o| &o.id == id)) {
            Some(option) => option.label.clone(),
            None if options.is_empty() => empty.to_owned(),
            None => "Select…".to_owned(),
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Booking Details ".into(), self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = Vec::with_capacity(BookingField::ALL.len() * 2 + 1);
        for _ in BookingField::ALL {
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        for (i, field) in BookingField::ALL.into_iter().enumerate() {
            let area = rows[i * 2];
            let active = self.field == field;
            let label = field.label();
            match field {
                BookingField::Guest => {
                    let value = Self::selected_label(
                        &self.guest_options,
                        self.guest_id.as_ref(),
                        "No guests yet",
                    );
                    form::render_choice(frame, area, label, &value, active);
                }
                BookingField::Room => {
                    let value = Self::selected_label(
                        &self.room_options,
                        self.room_id.as_ref(),
                        "No available rooms",
                    );
                    form::render_choice(frame, area, label, &value, active);
                }
                BookingField::Payment => {
                    form::render_choice(frame, area, label, &self.payment.to_string(), active);
                }
                BookingField::CheckIn => {
                    form::render_text_field(frame, area, label, &self.check_in, active);
                }
                BookingField::CheckOut => {
                    form::render_text_field(frame, area, label, &self.check_out, active);
                }
                BookingField::Guests => {
                    form::render_text_field(frame, area, label, &self.guests, active);
                }
                BookingField::Requests => {
                    form::render_text_field(frame, area, label, &self.requests, active);
                }
            }
        }
    }

    fn render_preview(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Preview ".into(), false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let preview = self.preview();
        let heading = |text: &'static str| {
            Line::from(Span::styled(
                format!(" {text}"),
                Style::default().fg(theme::CYAN).add_modifier(Modifier::BOLD),
            ))
        };
        let detail = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("   {label:<10}"), theme::key_hint()),
                Span::styled(value, theme::table_row()),
            ])
        };
        let none = |text: &'static str| Line::from(Span::styled(format!("   {text}"), theme::key_hint()));

        let mut lines = vec![heading("Guest")];
        match &preview.guest {
            Some(g) => {
                lines.push(detail("Name", g.name.clone()));
                lines.push(detail("Email", g.email.clone()));
                lines.push(detail("Phone", g.phone.clone()));
                lines.push(detail("ID", g.id_document.clone()));
            }
            None => lines.push(none("No guest selected")),
        }

        lines.push(Line::from(""));
        lines.push(heading("Room"));
        match &preview.room {
            Some(r) => {
                lines.push(detail("Number", r.number.clone()));
                lines.push(detail("Type", r.room_type.clone()));
                lines.push(detail("Price", format!("₱{}/night", r.price)));
                lines.push(detail("Capacity", format!("{} guest(s)", r.capacity)));
                lines.push(detail("Amenities", r.amenities.clone()));
            }
            None => lines.push(none("No room selected")),
        }

        lines.push(Line::from(""));
        lines.push(heading("Total"));
        match preview.quote {
            Some(q) => {
                lines.push(detail("Nights", q.nights.to_string()));
                lines.push(Line::from(vec![
                    Span::styled(format!("   {:<10}", "Amount"), theme::key_hint()),
                    Span::styled(
                        view::format_peso(q.total),
                        Style::default().fg(theme::GREEN).add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
            None => lines.push(none("Select a room and valid dates")),
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for NewBookingScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for NewBookingScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Ok(Some(Action::GoBack)),
            KeyCode::Enter => {
                if self.submitting {
                    return Ok(None);
                }
                self.submitting = true;
                return Ok(Some(Action::SubmitBooking(Box::new(self.to_form()))));
            }
            KeyCode::Char('r') if ctrl => {
                if !self.submitting {
                    self.reset(dashboard::today());
                }
            }
            KeyCode::Tab | KeyCode::Down => self.field = self.field.step(1),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.step(-1),
            KeyCode::Left if self.is_choice() => self.cycle_choice(-1),
            KeyCode::Right | KeyCode::Char(' ') if self.is_choice() => self.cycle_choice(1),
            _ => {
                if let Some(input) = self.text_mut() {
                    input.handle_key(key);
                }
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if apply_data(&mut self.snapshot, action) {
            self.refresh_options();
            return Ok(None);
        }
        match action {
            Action::BookingFormOpened if !self.submitting => {
                self.reset_dates(dashboard::today());
            }
            Action::MutationFinished {
                kind: MutationKind::CreateBooking,
                ok,
            } => {
                self.submitting = false;
                if *ok {
                    self.reset(dashboard::today());
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [body, hints] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        let [form_area, preview_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(body);

        self.render_form(frame, form_area);
        self.render_preview(frame, preview_area);

        let hints_line = if self.submitting {
            Line::from(Span::styled("  Creating booking…", theme::key_hint()))
        } else {
            sub_tabs::render_hints(&[
                ("Tab", "next field"),
                ("←/→", "choose"),
                ("Enter", "create"),
                ("Ctrl+R", "clear"),
                ("Esc", "back"),
            ])
        };
        frame.render_widget(Paragraph::new(hints_line), hints);
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn hints(&self) -> &'static str {
        "Enter create  Esc back"
    }
}
