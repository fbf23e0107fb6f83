use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::app::{App, View};

/// Draw the one-line status bar: key hints for the current view on the
/// left, counters and the transient status message on the right.
pub fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let hints = match app.view {
        View::Containers => "up/down select | Enter live | s snapshot | r refresh | q quit",
        View::Live => "p pause | c clear | e export | Esc back",
        View::Snapshot => "l line count | r refresh | e export | Esc back",
    };

    let mut spans = vec![Span::styled(
        hints.to_string(),
        Style::default().fg(Color::DarkGray),
    )];

    match app.view {
        View::Live => {
            if let Some(session) = app.session.as_ref() {
                let status = session.status();
                spans.push(Span::raw(format!(
                    "  |  {} lines",
                    session.buffer().visible_len()
                )));
                if status.paused {
                    spans.push(Span::styled(
                        format!("  [PAUSED +{}]", status.held_count),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ));
                } else if status.connected {
                    spans.push(Span::styled(
                        "  [LIVE]",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ));
                }
            }
        }
        View::Snapshot => {
            if let Some(snapshot) = app.snapshot.as_ref() {
                spans.push(Span::raw(format!("  |  {} lines", snapshot.logs.len())));
            }
        }
        View::Containers => {}
    }

    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!("  |  {}", message),
            Style::default().fg(Color::Cyan),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
