//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Border color for a control: red when its hint is showing, cyan when focused
fn border_style(is_active: bool, is_enabled: bool, hint: Option<&str>) -> Style {
    if hint.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else if !is_enabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Bordered block titled with `label`, carrying the hint along the bottom edge
pub fn field_block(
    label: &str,
    is_active: bool,
    is_enabled: bool,
    hint: Option<&str>,
) -> Block<'static> {
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, is_enabled, hint));
    match hint {
        Some(hint) => block.title_bottom(Line::from(Span::styled(
            format!(" {hint} "),
            Style::default().fg(Color::Red),
        ))),
        None => block,
    }
}

/// Draw a text field using FormField from the domain layer
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    hint: Option<&str>,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_str, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    frame.render_widget(
        content.block(field_block(&field.label, is_active, true, hint)),
        area,
    );
}

/// Draw a select control showing its current option between arrows
pub fn draw_select(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Option<&str>,
    is_active: bool,
    is_enabled: bool,
) {
    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let line = match (value, is_enabled) {
        (_, false) => Line::from(Span::styled("(select a design first)", text_style)),
        (Some(value), true) if is_active => Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::Cyan)),
            Span::styled(value.to_string(), text_style),
            Span::styled(" ▶", Style::default().fg(Color::Cyan)),
        ]),
        (Some(value), true) => Line::from(Span::styled(value.to_string(), text_style)),
        (None, true) => Line::from(Span::styled(
            "(choose with ◀ ▶)",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(
        Paragraph::new(line).block(field_block(label, is_active, is_enabled, None)),
        area,
    );
}

/// Draw help text lines
pub fn draw_help_text(frame: &mut Frame, area: Rect, lines: &[&str]) {
    let help: Vec<Line> = lines
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::DarkGray))))
        .collect();
    frame.render_widget(Paragraph::new(help), area);
}
