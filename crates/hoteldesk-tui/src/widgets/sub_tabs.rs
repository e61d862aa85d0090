//! Inline filter bar for table screens (room status / type filters).

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme;

/// One `label: value` group per filter, the active value highlighted
/// unless it is "All".
pub fn render_filter_bar<'a>(filters: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::with_capacity(filters.len() * 3);

    for (i, (label, value)) in filters.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("   ", theme::key_hint()));
        }
        spans.push(Span::styled(format!("{label}: "), theme::key_hint()));
        if *value == "All" {
            spans.push(Span::styled(*value, theme::tab_inactive()));
        } else {
            spans.push(Span::styled(
                format!("[{value}]"),
                theme::tab_active().add_modifier(Modifier::UNDERLINED),
            ));
        }
    }

    Line::from(spans)
}

/// Key hint line: alternating key / description pairs.
pub fn render_hints<'a>(pairs: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::with_capacity(pairs.len() * 2 + 1);
    spans.push(Span::raw(" "));
    for (key, desc) in pairs {
        spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
        spans.push(Span::styled(*desc, theme::key_hint()));
    }
    Line::from(spans)
}
