use crate::application::{App, AppMode};
use crate::domain::{Level, LevelView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_levels(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("locsel - Location Selector")
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_levels(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for level in Level::ALL {
        render_level(f, app, level, columns[level.index()]);
    }
}

/// Placeholder shown as the list title until a value is picked.
pub fn placeholder(level: Level) -> String {
    format!("Select {}", level.label())
}

/// The rows a level's list displays.
pub fn level_lines(view: LevelView<'_>) -> Vec<String> {
    match view {
        LevelView::Disabled => Vec::new(),
        LevelView::Loading => vec!["Loading...".to_string()],
        LevelView::Unavailable { .. } => vec!["No options available".to_string()],
        LevelView::Options(options) => options.to_vec(),
    }
}

fn render_level(f: &mut Frame, app: &App, level: Level, area: Rect) {
    let view = app.session.view(level);
    let selected = app.session.selection().get(level);
    let focused = app.focus == level;
    let interactive = app.session.is_interactive(level);

    let title = if selected.is_empty() {
        placeholder(level)
    } else {
        format!("{}: {}", level.label(), selected)
    };

    let border_style = match (focused, interactive) {
        (true, true) => Style::default().fg(Color::Yellow),
        (true, false) => Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        (false, _) => Style::default().fg(Color::DarkGray),
    };

    let highlighted = app.highlighted[level.index()];
    let items: Vec<ListItem> = level_lines(view)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let style = match view {
                LevelView::Options(_) if line == selected => {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                }
                LevelView::Options(_) if focused && i == highlighted => {
                    Style::default().bg(Color::Blue).fg(Color::White)
                }
                LevelView::Options(_) => Style::default(),
                LevelView::Unavailable { .. } => Style::default().fg(Color::Red),
                _ => Style::default().fg(Color::DarkGray),
            };
            let style = if focused && i == highlighted && line == selected {
                style.bg(Color::Blue)
            } else {
                style
            };
            ListItem::new(Line::from(line)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );
    f.render_widget(list, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.mode {
        AppMode::Help => (
            "↑↓/jk: scroll | Home: top | Esc/q/?: close help".to_string(),
            Style::default().fg(Color::Cyan),
        ),
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                (status.clone(), Style::default().fg(Color::Yellow))
            } else if let Some(error) = app.level_error(app.focus) {
                (
                    format!("{} list unavailable: {} (r: retry)", app.focus.label(), error),
                    Style::default().fg(Color::Red),
                )
            } else if let Some(summary) = app.session.summary() {
                (
                    format!("You selected {} | y: copy | q: quit", summary),
                    Style::default().fg(Color::Green),
                )
            } else {
                (
                    "Tab/←→: switch list | ↑↓: move | Enter: select | Esc: clear | r: reload | F1/?: help | q: quit"
                        .to_string(),
                    Style::default(),
                )
            }
        }
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = popup_rect(f.area());

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let help_widget = Paragraph::new(help_lines[start_line..end_line].join("\n"))
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("locsel Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

/// The centred popup covering four fifths of `area`.
fn popup_rect(area: Rect) -> Rect {
    Rect {
        x: area.x + area.width / 10,
        y: area.y + area.height / 10,
        width: area.width / 5 * 4,
        height: area.height / 5 * 4,
    }
}

/// Number of lines in the help text, for scroll bounds.
pub fn help_line_count() -> usize {
    HELP_TEXT.lines().count()
}

const HELP_TEXT: &str = r#"LOCSEL - LOCATION SELECTOR

=== HOW IT WORKS ===
Pick a country first. Its states are then loaded from the location
service; pick a state and its cities are loaded in turn.
Changing the country clears the state and city.
Changing the state clears the city.

=== LIST STATES ===
(empty)               The level above has no selection yet
Loading...            The list is being fetched
No options available  The fetch failed, or the list is empty

=== NAVIGATION ===
Tab / → / l     Next list
Shift+Tab / ← / h
                Previous list
↑↓ or j/k       Move the highlight
Enter           Select the highlighted entry
Esc / Backspace Clear the selection in this list (and below)
r               Reload this list (after a failure)
y               Copy "City, State, Country" to the clipboard
F1 or ?         Show this help
q               Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text
Page Up/Down    Scroll 5 lines
Home            Jump to top
Esc/F1/?/q      Close this help window"#;
