//! Dialog components for TUI

mod base;
mod result_dialog;

pub use result_dialog::render_submission_dialog;
