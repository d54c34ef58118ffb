//! Dialogs shown after a submit attempt

use super::base::{render_dialog, DialogConfig};
use crate::app::Dialog;
use crate::state::{DerivedState, FieldName};
use ratatui::{style::Color, Frame};

/// One line per blocking field, using the hint currently shown for it
fn blocked_paragraphs(invalid: &[FieldName], derived: &DerivedState) -> Vec<String> {
    let mut paragraphs = vec!["Please fix the following before registering:".to_string()];
    paragraphs.extend(invalid.iter().map(|field| match derived.message(*field) {
        Some(message) => format!("• {field}: {message}"),
        None => format!("• {field}"),
    }));
    paragraphs
}

/// Render the dialog for the outcome of the last submit attempt
pub fn render_submission_dialog(frame: &mut Frame, dialog: &Dialog, derived: &DerivedState) {
    let config = match dialog {
        Dialog::Blocked(invalid) => DialogConfig {
            title: "Registration incomplete",
            color: Color::Yellow,
            paragraphs: blocked_paragraphs(invalid, derived),
            max_width: 70,
        },
        Dialog::Accepted { name, total_cost } => DialogConfig {
            title: "You're registered!",
            color: Color::Green,
            paragraphs: vec![
                format!("Thanks, {name}. See you at the conference."),
                format!("Total: ${total_cost}"),
            ],
            max_width: 60,
        },
        Dialog::Error(message) => DialogConfig {
            title: "Error",
            color: Color::Red,
            paragraphs: vec![message.clone()],
            max_width: 60,
        },
    };
    render_dialog(frame, config);
}
