//! Application state for the terminal location selector.
//!
//! This module holds the [`Session`] plus the purely visual state around it:
//! which level has focus, which option is highlighted in each list, and the
//! status line.

use crate::domain::{FetchCompletion, FetchRequest, Level, LevelView};
use super::session::Session;

/// Represents the current mode of the application.
#[derive(Debug)]
pub enum AppMode {
    /// Normal mode - navigate the three lists and pick values
    Normal,
    /// Help screen is displayed
    Help,
}

/// Main application state.
///
/// Mutations that need network I/O queue [`FetchRequest`]s; the event loop
/// collects them with [`App::take_requests`] and hands them to a dispatcher.
///
/// # Examples
///
/// ```
/// use locsel::application::App;
/// use locsel::domain::{Level, LevelKey};
///
/// let mut app = App::default();
/// assert_eq!(app.focus, Level::Country);
/// let requests = app.take_requests();
/// assert_eq!(requests[0].key, LevelKey::Countries);
/// ```
#[derive(Debug)]
pub struct App {
    /// Selection and fetch state
    pub session: Session,
    /// Level whose list receives navigation keys
    pub focus: Level,
    /// Highlighted option index per level, indexed by [`Level::index`]
    pub highlighted: [usize; 3],
    /// Current application mode
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    outbox: Vec<FetchRequest>,
}

impl Default for App {
    fn default() -> Self {
        let (session, requests) = Session::start();
        Self {
            session,
            focus: Level::Country,
            highlighted: [0; 3],
            mode: AppMode::Normal,
            help_scroll: 0,
            status_message: None,
            outbox: requests,
        }
    }
}

impl App {
    /// Drains the requests queued since the last call.
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// Feeds a finished fetch back into the session.
    pub fn apply_completion(&mut self, completion: FetchCompletion) {
        let level = completion.key.level();
        if self.session.complete(completion) {
            self.clamp_highlight(level);
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn move_highlight_up(&mut self) {
        let slot = &mut self.highlighted[self.focus.index()];
        *slot = slot.saturating_sub(1);
    }

    pub fn move_highlight_down(&mut self) {
        let len = self.options(self.focus).len();
        let slot = &mut self.highlighted[self.focus.index()];
        if *slot + 1 < len {
            *slot += 1;
        }
    }

    /// The option under the highlight in `level`, if the level lists options.
    pub fn highlighted_option(&self, level: Level) -> Option<&str> {
        self.options(level)
            .get(self.highlighted[level.index()])
            .map(String::as_str)
    }

    /// Picks the highlighted option of the focused level.
    ///
    /// Ignored while the level is locked or loading. Choosing a country or
    /// state resets the highlights of the levels below it, and focus moves
    /// one level down.
    pub fn select_highlighted(&mut self) {
        let level = self.focus;
        if !self.session.is_interactive(level) {
            return;
        }
        let Some(value) = self.highlighted_option(level).map(str::to_string) else {
            return;
        };
        // Picking the current value again keeps the levels below it.
        if value == self.session.selection().get(level) {
            if level != Level::City {
                self.focus = level.next();
            }
            return;
        }

        match self.session.select(level, value) {
            Ok(requests) => {
                self.outbox.extend(requests);
                self.status_message = None;
                self.reset_highlights_below(level);
                if level != Level::City {
                    self.focus = level.next();
                }
            }
            Err(err) => {
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Clears the focused level's selection (and, through the reset rule,
    /// everything below it).
    pub fn clear_focused(&mut self) {
        let level = self.focus;
        match self.session.select(level, "") {
            Ok(requests) => {
                self.outbox.extend(requests);
                self.reset_highlights_below(level);
            }
            Err(err) => {
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Re-fetches the focused level after a failure or to refresh it.
    pub fn retry_focused(&mut self) {
        match self.session.retry(self.focus) {
            Some(request) => {
                self.status_message = Some(format!("Reloading {} list", self.focus.label().to_lowercase()));
                self.outbox.push(request);
            }
            None => {
                self.status_message = Some(format!("Nothing to reload for {}", self.focus.label().to_lowercase()));
            }
        }
    }

    /// The error text for `level`, if its last fetch failed.
    pub fn level_error(&self, level: Level) -> Option<&str> {
        match self.session.view(level) {
            LevelView::Unavailable { reason } => reason,
            _ => None,
        }
    }

    /// Processes the result of copying the summary to the clipboard.
    pub fn set_copy_result(&mut self, result: Result<String, String>) {
        self.status_message = Some(match result {
            Ok(text) => format!("Copied \"{}\" to clipboard", text),
            Err(error) => format!("Copy failed: {}", error),
        });
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Normal => AppMode::Help,
            AppMode::Help => AppMode::Normal,
        };
        self.help_scroll = 0;
    }

    fn options(&self, level: Level) -> &[String] {
        match self.session.view(level) {
            LevelView::Options(options) => options,
            _ => &[],
        }
    }

    fn reset_highlights_below(&mut self, level: Level) {
        for below in Level::ALL.into_iter().filter(|l| l.index() > level.index()) {
            self.highlighted[below.index()] = 0;
        }
    }

    fn clamp_highlight(&mut self, level: Level) {
        let len = self.options(level).len();
        let slot = &mut self.highlighted[level.index()];
        *slot = (*slot).min(len.saturating_sub(1));
    }
}
