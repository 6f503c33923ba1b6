use crate::application::{App, AppMode};
use crate::infrastructure::ClipboardRepository;
use crate::presentation::help_line_count;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        app.status_message = None;

        match key {
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.focus_next(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.focus_previous(),
            KeyCode::Up | KeyCode::Char('k') => app.move_highlight_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_highlight_down(),
            KeyCode::Enter => app.select_highlighted(),
            KeyCode::Esc | KeyCode::Backspace => app.clear_focused(),
            KeyCode::Char('r') if !modifiers.contains(KeyModifiers::CONTROL) => app.retry_focused(),
            KeyCode::Char('y') => {
                if let Some(summary) = app.session.summary() {
                    app.set_copy_result(ClipboardRepository::copy_text(&summary));
                } else {
                    app.status_message = Some("Select a country, state and city first".to_string());
                }
            }
            KeyCode::F(1) | KeyCode::Char('?') => app.toggle_help(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        let max_scroll = help_line_count().saturating_sub(1);
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.toggle_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll = (app.help_scroll + 1).min(max_scroll);
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll = (app.help_scroll + 5).min(max_scroll);
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
