use ansi_to_tui::IntoText;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    Frame,
};

pub mod app;
pub mod widgets;

pub use app::{App, SnapshotState, View};

use widgets::{draw_container_list, draw_log_view, draw_status_bar};

/// Draw the UI to the terminal
pub fn draw(f: &mut Frame, app: &mut App) {
    // Main layout: active view plus a one-line status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Container picker or log view
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    match app.view {
        View::Containers => draw_container_list(f, chunks[0], app),
        View::Live | View::Snapshot => draw_log_view(f, chunks[0], app),
    }

    draw_status_bar(f, chunks[1], app);
}

/// Parse ANSI escape codes in a log line into a styled ratatui line.
/// Falls back to the raw text when the escape sequences are malformed.
pub fn ansi_line(text: &str) -> Line<'static> {
    match text.as_bytes().into_text() {
        Ok(parsed) => {
            let mut spans = Vec::new();
            for line in parsed.lines {
                spans.extend(line.spans);
            }
            Line::from(spans)
        }
        Err(_) => Line::from(Span::raw(text.to_string())),
    }
}
