//! locsel - Location Selector
//!
//! A terminal client that lets the user pick a country, then a state of that
//! country, then a city of that state. Each list is fetched from a remote
//! location service only once its parent has been chosen.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use locsel::application::{App, AppMode};
use locsel::domain::FetchCompletion;
use locsel::infrastructure::{init_logging, AppConfig, FetchDispatcher, HttpLookup};
use locsel::presentation::{render_ui, InputHandler};

/// How long the event loop waits for a key before checking for finished fetches.
const TICK: Duration = Duration::from_millis(100);

/// Entry point for the locsel terminal application.
///
/// Parses configuration, starts logging, sets up the terminal, and runs the
/// event loop until the user quits.
///
/// # Errors
///
/// Returns an error if logging, the HTTP client, or the terminal cannot be
/// set up.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::parse();
    init_logging(&config.log_config())?;
    info!(base_url = %config.base_url, "starting locsel");

    let lookup = HttpLookup::new(config.base_url.clone(), config.timeout())?;
    let (dispatcher, completions) = FetchDispatcher::new(Arc::new(lookup));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    let res = run_app(&mut terminal, &mut app, &dispatcher, &completions);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }
    if let Some(summary) = app.session.summary() {
        println!("{summary}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Dispatches queued fetches, applies finished ones, redraws, and handles at
/// most one key press per tick. All session mutation happens here.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    dispatcher: &FetchDispatcher,
    completions: &Receiver<FetchCompletion>,
) -> io::Result<()> {
    loop {
        dispatcher.dispatch_all(app.take_requests());
        for completion in completions.try_iter() {
            app.apply_completion(completion);
        }

        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => {
                        info!("quit requested");
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
