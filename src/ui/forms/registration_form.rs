//! Registration form rendering

use super::field_renderer::{draw_field, draw_help_text, draw_select, field_block};
use crate::app::{App, Control};
use crate::state::{FieldName, PaymentMethod};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the whole form: attendee details on the left, activities and payment on the right
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Full Stack Conf Registration ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(inner);

    draw_attendee_column(frame, columns[0], app);
    draw_order_column(frame, columns[1], app);
}

fn draw_attendee_column(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let derived = &app.state.derived;
    let other_height = if derived.other_job_role_visible { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Name
            Constraint::Length(3),             // Email
            Constraint::Length(3),             // Job role
            Constraint::Length(other_height),  // Other job role
            Constraint::Length(3),             // Shirt
            Constraint::Length(BUTTON_HEIGHT), // Register
            Constraint::Min(0),                // Help text
        ])
        .split(area);

    draw_field(
        frame,
        chunks[0],
        &form.name,
        app.focus == Control::Name,
        derived.message(FieldName::Name),
    );
    draw_field(
        frame,
        chunks[1],
        &form.email,
        app.focus == Control::Email,
        derived.message(FieldName::Email),
    );
    draw_select(
        frame,
        chunks[2],
        "Job Role",
        form.job_role.map(|role| role.label()),
        app.focus == Control::JobRole,
        true,
    );
    if derived.other_job_role_visible {
        draw_field(
            frame,
            chunks[3],
            &form.other_job_role,
            app.focus == Control::OtherJobRole,
            None,
        );
    }

    draw_shirt_row(frame, chunks[4], app);

    render_button(frame, chunks[5], "Register", app.focus == Control::Register);

    draw_help_text(
        frame,
        chunks[6],
        &[
            "",
            "Tab/↑↓ move between fields",
            "◀ ▶ change a selection, Space checks an activity",
        ],
    );
}

fn draw_shirt_row(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let derived = &app.state.derived;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10),     // Size
            Constraint::Percentage(50), // Design
            Constraint::Min(10),        // Color
        ])
        .split(area);

    draw_select(
        frame,
        chunks[0],
        "Size",
        Some(form.shirt_size.label()),
        app.focus == Control::ShirtSize,
        true,
    );
    draw_select(
        frame,
        chunks[1],
        "Design",
        form.shirt_design.map(|design| design.label()),
        app.focus == Control::ShirtDesign,
        true,
    );
    let color_label = form
        .shirt_color
        .as_deref()
        .and_then(|value| app.catalog.color(value))
        .map(|color| color.label.as_str());
    draw_select(
        frame,
        chunks[2],
        "Color",
        color_label,
        app.focus == Control::ShirtColor,
        derived.shirt_color_enabled,
    );
}

fn draw_order_column(frame: &mut Frame, area: Rect, app: &App) {
    let activity_height = app.catalog.activities.len() as u16 + 2;
    let panel_height = match app.state.derived.visible_payment_panel {
        PaymentMethod::CreditCard => 6,
        PaymentMethod::PayPal | PaymentMethod::Bitcoin => 5,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(activity_height), // Activities
            Constraint::Length(3),               // Payment method
            Constraint::Length(panel_height),    // Payment panel
            Constraint::Min(0),
        ])
        .split(area);

    draw_activities(frame, chunks[0], app);
    draw_select(
        frame,
        chunks[1],
        "I'm going to pay with",
        Some(app.state.form.payment_method.label()),
        app.focus == Control::PaymentMethod,
        true,
    );
    draw_payment_panel(frame, chunks[2], app);
}

fn draw_activities(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let derived = &app.state.derived;
    let focused = matches!(app.focus, Control::Activity(_));
    let mark_style = if derived.is_invalid(FieldName::Activities) {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let lines: Vec<Line> = app
        .catalog
        .activities
        .iter()
        .enumerate()
        .map(|(index, activity)| {
            let checked = form.is_checked(&activity.id);
            let disabled = derived.is_disabled(&activity.id);
            let mark = if checked { "[x]" } else { "[ ]" };
            let style = if app.focus == Control::Activity(index) {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if disabled {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(mark, mark_style),
                Span::styled(format!(" {activity}"), style),
            ])
        })
        .collect();

    let block = field_block(
        "Register for Activities",
        focused,
        true,
        derived.message(FieldName::Activities),
    )
    .title_bottom(
        Line::from(Span::styled(
            format!(" Total: ${} ", derived.total_cost),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .right_aligned(),
    );

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_payment_panel(frame: &mut Frame, area: Rect, app: &App) {
    let method = app.state.derived.visible_payment_panel;
    if let Some(text) = method.instructions() {
        let block = Block::default()
            .title(format!(" {} ", method.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
            area,
        );
        return;
    }

    let form = &app.state.form;
    let derived = &app.state.derived;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);
    let card_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Card number
            Constraint::Percentage(25), // Zip
            Constraint::Percentage(25), // CVV
        ])
        .split(rows[0]);
    let expiry_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    draw_field(
        frame,
        card_row[0],
        &form.cc_number,
        app.focus == Control::CardNumber,
        derived.message(FieldName::CreditCardNumber),
    );
    draw_field(
        frame,
        card_row[1],
        &form.zip,
        app.focus == Control::Zip,
        derived.message(FieldName::Zip),
    );
    draw_field(
        frame,
        card_row[2],
        &form.cvv,
        app.focus == Control::Cvv,
        derived.message(FieldName::Cvv),
    );
    draw_select(
        frame,
        expiry_row[0],
        "Expiration Month",
        Some(format!("{:02}", form.exp_month).as_str()),
        app.focus == Control::ExpMonth,
        true,
    );
    draw_select(
        frame,
        expiry_row[1],
        "Expiration Year",
        Some(form.exp_year.to_string().as_str()),
        app.focus == Control::ExpYear,
        true,
    );
}
