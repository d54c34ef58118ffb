//! Conference Registration - terminal registration form for Full Stack Conf
//!
//! Collects attendee details, shirt choice, workshop activities and
//! payment, validating each field as it is typed and again on submit.

mod app;
mod config;
mod platform;
mod state;
mod submit;
mod ui;

use anyhow::Result;
use app::App;
use config::RegistrationConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use submit::LogSink;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log file in the data dir, kept off the terminal the form draws on.
/// Falls back to discarding events when the file cannot be opened.
fn log_writer() -> BoxMakeWriter {
    let file = RegistrationConfig::log_path()
        .map(|path| RegistrationConfig::open_log_file(&path));
    match file {
        Some(Ok(file)) => BoxMakeWriter::new(Mutex::new(file)),
        Some(Err(err)) => {
            eprintln!("Logging disabled: {err}");
            BoxMakeWriter::new(io::sink)
        }
        None => BoxMakeWriter::new(io::sink),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conference_registration=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .init();

    let config = RegistrationConfig::load().unwrap_or_else(|err| {
        tracing::warn!("Using built-in catalogs: {err}");
        RegistrationConfig::default()
    });
    tracing::info!(
        activities = config.catalog().activities.len(),
        "Starting registration form"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, Box::new(LogSink));
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                // Windows reports both press and release
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Resize(_width, _height) => {
                    // Layout is recalculated on next draw
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
