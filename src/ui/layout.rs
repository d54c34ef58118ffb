//! Layout components (form area, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the form and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar with the running total and key help
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let derived = &app.state.derived;
    let key_style = Style::default().fg(Color::Cyan);
    let total_style = if derived.submission_blocked {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    };

    let line = Line::from(vec![
        Span::styled(format!(" Total: ${} ", derived.total_cost), total_style),
        Span::raw("│ "),
        Span::styled(SUBMIT_SHORTCUT, key_style),
        Span::raw(" register  "),
        Span::styled("Tab", key_style),
        Span::raw(" next  "),
        Span::styled("Esc", key_style),
        Span::raw(" quit"),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(Color::Gray)),
        area,
    );
}
