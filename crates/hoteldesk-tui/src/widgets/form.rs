//! Form building blocks: single-line text inputs and choice selectors.
//!
//! Text editing is delegated to `tui-input`; rendering follows the
//! label-plus-value layout used by every form overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tui_input::{Input, InputRequest};

use crate::theme;

/// Width of the label column in form rows.
pub const LABEL_WIDTH: u16 = 16;

// ── TextField ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct TextField {
    input: Input,
}

impl TextField {
    pub fn new(value: &str) -> Self {
        Self {
            input: Input::default().with_value(value.to_owned()),
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::default().with_value(value.to_owned());
    }

    /// Apply an editing key. Returns `false` for keys that are not edits,
    /// so the caller can treat them as navigation.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let request = match key.code {
            KeyCode::Char('u') if ctrl => {
                self.input.reset();
                return true;
            }
            KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
            KeyCode::Char('e') if ctrl => InputRequest::GoToEnd,
            KeyCode::Char(c) if !ctrl => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return false,
        };
        let _ = self.input.handle(request);
        true
    }

    /// Cursor column relative to the start of the value.
    pub fn cursor(&self) -> usize {
        self.input.visual_cursor()
    }
}

// ── Rendering ───────────────────────────────────────────────────────

fn label_span(label: &str, active: bool) -> Span<'static> {
    let style = if active {
        Style::default().fg(theme::CYAN)
    } else {
        Style::default().fg(theme::TEXT)
    };
    let marker = if active { "▸ " } else { "  " };
    Span::styled(format!("{marker}{label}"), style)
}

/// `label  value█` on one row, cursor shown only when active.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
pub fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    field: &TextField,
    active: bool,
) {
    let [label_area, value_area] =
        Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)]).areas(area);
    frame.render_widget(Paragraph::new(label_span(label, active)), label_area);

    let value = field.value();
    let value_style = Style::default().fg(if active { theme::ACCENT } else { theme::TEXT });
    if active {
        // Keep the cursor in view on narrow terminals.
        let width = usize::from(value_area.width.saturating_sub(1));
        let scroll = field.cursor().saturating_sub(width);
        let visible: String = value.chars().skip(scroll).collect();
        frame.render_widget(
            Paragraph::new(Span::styled(visible, value_style)),
            value_area,
        );
        let x = value_area.x + (field.cursor() - scroll) as u16;
        frame.set_cursor_position((x.min(value_area.right().saturating_sub(1)), value_area.y));
    } else {
        frame.render_widget(
            Paragraph::new(Span::styled(value.to_owned(), value_style)),
            value_area,
        );
    }
}

/// `label  ◂ value ▸` for fields cycled with ←/→.
pub fn render_choice(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let [label_area, value_area] =
        Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)]).areas(area);
    frame.render_widget(Paragraph::new(label_span(label, active)), label_area);

    let line = if active {
        Line::from(vec![
            Span::styled("◂ ", theme::key_hint_key()),
            Span::styled(value.to_owned(), Style::default().fg(theme::ACCENT)),
            Span::styled(" ▸", theme::key_hint_key()),
        ])
    } else {
        Line::from(Span::styled(value.to_owned(), Style::default().fg(theme::TEXT)))
    };
    frame.render_widget(Paragraph::new(line), value_area);
}

/// Centered popup of at most `width` x `height`; clears what is beneath
/// and returns the area inside the border.
pub fn popup(frame: &mut Frame, area: Rect, title: &str, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let popup_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    inner
}

/// Cycle `current` through `len` options by `delta` (±1), wrapping.
pub fn cycle(current: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    if delta < 0 {
        (current + len - 1) % len
    } else {
        (current + 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_backspace() {
        let mut field = TextField::new("10");
        assert!(field.handle_key(key(KeyCode::Char('1'))));
        assert_eq!(field.value(), "101");
        assert!(field.handle_key(key(KeyCode::Backspace)));
        assert_eq!(field.value(), "10");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut field = TextField::new("2024-0101");
        for _ in 0..2 {
            field.handle_key(key(KeyCode::Left));
        }
        field.handle_key(key(KeyCode::Char('-')));
        assert_eq!(field.value(), "2024-01-01");
    }

    #[test]
    fn navigation_keys_are_not_edits() {
        let mut field = TextField::new("x");
        assert!(!field.handle_key(key(KeyCode::Tab)));
        assert!(!field.handle_key(key(KeyCode::Enter)));
        assert!(!field.handle_key(key(KeyCode::Up)));
        assert_eq!(field.value(), "x");
    }

    #[test]
    fn ctrl_u_clears() {
        let mut field = TextField::new("Ana Cruz");
        field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(cycle(0, 3, -1), 2);
        assert_eq!(cycle(2, 3, 1), 0);
        assert_eq!(cycle(0, 0, 1), 0);
    }
}
