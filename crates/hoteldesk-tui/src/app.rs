//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use hoteldesk_core::{ApiStatus, Controller, CoreError, Mutation, MutationKind};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays up.
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    api_status: ApiStatus,
    help_visible: bool,
    terminal_size: (u16, u16),
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    controller: Controller,
    /// Cancels the data bridge on exit.
    data_cancel: CancellationToken,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    notification: Option<(Notification, Instant)>,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            active_screen: ScreenId::Dashboard,
            previous_screen: None,
            screens: create_screens().into_iter().collect(),
            running: true,
            api_status: ApiStatus::Unknown,
            help_visible: false,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            controller,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        let controller = self.controller.clone();
        let cancel = self.data_cancel.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            crate::data_bridge::spawn_data_bridge(controller, tx, cancel).await;
        });

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(_) => {}
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        tui.exit()?;
        info!("TUI event loop ended");
        Ok(())
    }

    fn active_captures_input(&self) -> bool {
        self.screens
            .get(&self.active_screen)
            .is_some_and(|s| s.captures_input())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Confirmation dialog captures all input
        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        // Open forms and popups get every key
        if self.active_captures_input() {
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('r')) => return Ok(Some(Action::Reload)),
            (KeyModifiers::NONE, KeyCode::Char('c')) => return Ok(Some(Action::ClearData)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='5')) => {
                let n = u8::try_from(c).unwrap_or(b'0') - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    fn switch_to(&mut self, target: ScreenId) -> Result<()> {
        if target == self.active_screen {
            return Ok(());
        }
        debug!("switching screen: {} → {}", self.active_screen, target);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.previous_screen = Some(self.active_screen);
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&target) {
            screen.set_focused(true);
        }
        if target == ScreenId::NewBooking {
            self.action_tx.send(Action::BookingFormOpened)?;
        }
        Ok(())
    }

    /// Process a single action: update app state and propagate to screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(w, h) => self.terminal_size = (*w, *h),

            Action::SwitchScreen(target) => self.switch_to(*target)?,

            Action::GoBack => {
                let target = self.previous_screen.take().unwrap_or(ScreenId::Dashboard);
                self.switch_to(target)?;
                // One level only; Esc again lands on the dashboard
                self.previous_screen = None;
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Render => {}

            Action::Tick => {
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > NOTIFICATION_TTL {
                        self.notification = None;
                    }
                }
            }

            Action::ApiStatusChanged(status) => {
                self.api_status = *status;
                self.broadcast(action)?;
            }

            // Data and write outcomes go to every screen so they stay in sync
            Action::RoomsUpdated(_)
            | Action::GuestsUpdated(_)
            | Action::BookingsUpdated(_)
            | Action::MutationFinished { .. } => self.broadcast(action)?,

            Action::Reload => self.reload(),

            Action::ClearData => {
                self.controller.clear();
                self.action_tx
                    .send(Action::Notify(Notification::info("Local data cleared")))?;
            }

            // ── Writes ──────────────────────────────────────────────
            Action::SaveRoom(form) => {
                let kind = if form.is_edit() {
                    MutationKind::UpdateRoom
                } else {
                    MutationKind::CreateRoom
                };
                let form = form.clone();
                self.run_mutation(kind, move |c| async move { c.save_room(&form).await });
            }

            Action::SaveGuest(form) => {
                let kind = if form.is_edit() {
                    MutationKind::UpdateGuest
                } else {
                    MutationKind::CreateGuest
                };
                let form = form.clone();
                self.run_mutation(kind, move |c| async move { c.save_guest(&form).await });
            }

            Action::SubmitBooking(form) => {
                let form = form.clone();
                self.run_mutation(MutationKind::CreateBooking, move |c| async move {
                    c.create_booking(&form).await
                });
            }

            Action::RequestDelete(confirm) => {
                self.action_tx.send(Action::ShowConfirm(confirm.clone()))?;
            }

            // ── Confirmation dialog ─────────────────────────────────
            Action::ShowConfirm(confirm) => self.pending_confirm = Some(confirm.clone()),

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(confirm);
                }
            }

            Action::ConfirmNo => self.pending_confirm = None,

            // ── Notifications ───────────────────────────────────────
            Action::Notify(n) => self.notification = Some((n.clone(), Instant::now())),

            Action::DismissNotification => self.notification = None,

            Action::BookingFormOpened => {
                if let Some(screen) = self.screens.get_mut(&ScreenId::NewBooking) {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    // ── Controller tasks ─────────────────────────────────────────

    fn reload(&self) {
        let controller = self.controller.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let report = controller.reload().await;
            if report.is_complete() {
                let _ = tx.send(Action::Notify(Notification::info("Data reloaded")));
            }
            for notice in report.notices() {
                let _ = tx.send(Action::Notify(Notification::warning(notice)));
            }
        });
    }

    /// Spawn a write. Reports the outcome as a toast plus `MutationFinished`;
    /// a created booking also switches to the Bookings tab.
    fn run_mutation<F, Fut>(&self, kind: MutationKind, op: F)
    where
        F: FnOnce(Controller) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Mutation, CoreError>> + Send + 'static,
    {
        let controller = self.controller.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match op(controller).await {
                Ok(mutation) => {
                    let _ = tx.send(Action::Notify(Notification::success(mutation.message())));
                    for notice in mutation.reload.notices() {
                        let _ = tx.send(Action::Notify(Notification::warning(notice)));
                    }
                    let _ = tx.send(Action::MutationFinished { kind, ok: true });
                    if kind == MutationKind::CreateBooking {
                        let _ = tx.send(Action::SwitchScreen(ScreenId::Bookings));
                    }
                }
                Err(e) => {
                    warn!(?kind, error = %e, "write failed");
                    let _ = tx.send(Action::Notify(Notification::error(
                        e.notice(kind.failure_fallback()),
                    )));
                    let _ = tx.send(Action::MutationFinished { kind, ok: false });
                }
            }
        });
    }

    fn execute_confirm(&self, confirm: ConfirmAction) {
        match confirm {
            ConfirmAction::DeleteRoom { id, .. } => {
                self.run_mutation(MutationKind::DeleteRoom, move |c| async move {
                    c.delete_room(id.as_str()).await
                });
            }
            ConfirmAction::DeleteGuest { id, .. } => {
                self.run_mutation(MutationKind::DeleteGuest, move |c| async move {
                    c.delete_guest(id.as_str()).await
                });
            }
            ConfirmAction::DeleteBooking { id } => {
                self.run_mutation(MutationKind::DeleteBooking, move |c| async move {
                    c.delete_booking(id.as_str()).await
                });
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let [content_area, tab_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }

        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        // Overlays, last = topmost
        if let Some((notif, _)) = &self.notification {
            Self::render_notification(frame, area, notif);
        }
        if let Some(confirm) = &self.pending_confirm {
            Self::render_confirm_dialog(frame, area, confirm);
        }
        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let narrow = self.terminal_size.0 < 80;
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                let label = if narrow { id.label_short() } else { id.label() };
                Line::from(Span::styled(format!(" {} {label} ", id.number()), style))
            })
            .collect();

        let selected = ScreenId::ALL
            .iter()
            .position(|&s| s == self.active_screen)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .divider(Span::styled("│", theme::key_hint()))
            .select(selected);
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let (icon, color) = match self.api_status {
            ApiStatus::Connected => ("●", theme::GREEN),
            ApiStatus::Error => ("◐", theme::YELLOW),
            ApiStatus::Offline => ("○", theme::RED),
            ApiStatus::Unknown => ("◌", theme::BORDER),
        };
        let screen_hints = self
            .screens
            .get(&self.active_screen)
            .map_or("", |s| s.hints());

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("{icon} {}", self.api_status.label()),
                Style::default().fg(color),
            ),
            Span::styled(" │ ", theme::key_hint()),
            Span::styled(screen_hints, theme::key_hint()),
            Span::styled("  ? help  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn overlay(frame: &mut Frame, area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width.saturating_sub(4));
        let height = height.min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let rect = Rect::new(x, y, width, height);
        frame.render_widget(Clear, rect);
        rect
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_area = Self::overlay(frame, area, 58, 20);
        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |title: &'static str| {
            Line::from(Span::styled(format!("  {title}"), Style::default().fg(theme::CYAN)))
        };
        let entry = |key: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<12}"), theme::key_hint_key()),
                Span::styled(desc, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            section("Navigation"),
            entry("1-5", "Jump to tab"),
            entry("Tab", "Next tab (wraps)"),
            entry("Shift+Tab", "Previous tab"),
            entry("j/k ↑/↓", "Move selection"),
            entry("Esc", "Back / close"),
            Line::from(""),
            section("Records"),
            entry("n", "New room / guest / booking"),
            entry("e  Enter", "Edit selected"),
            entry("d", "Delete selected"),
            entry("s  t  x", "Room status / type filter, clear"),
            entry("b", "Guest's bookings"),
            Line::from(""),
            section("Global"),
            entry("r", "Reload from API"),
            entry("c", "Clear local data"),
            entry("q", "Quit"),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }

    fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let message = format!("  {confirm}");
        let width = u16::try_from(message.chars().count() + 4).unwrap_or(u16::MAX).max(40);
        let dialog_area = Self::overlay(frame, area, width, 5);

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::YELLOW))
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(message, Style::default().fg(theme::TEXT))),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Toast in the bottom-right corner, above the bars.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len
            .saturating_add(6)
            .clamp(20, 70)
            .min(area.width);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2);
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (color, icon) = match notif.level {
            NotificationLevel::Success => (theme::GREEN, "✓"),
            NotificationLevel::Error => (theme::RED, "✗"),
            NotificationLevel::Warning => (theme::YELLOW, "!"),
            NotificationLevel::Info => (theme::CYAN, "·"),
        };

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(color)),
            Span::styled(notif.message.as_str(), Style::default().fg(theme::TEXT)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}
