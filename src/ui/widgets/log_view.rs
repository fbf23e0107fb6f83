use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::stream::LogLine;
use crate::ui::ansi_line;
use crate::ui::app::{App, View};

/// Draw the log view (live or snapshot) in the main area
pub fn draw_log_view(f: &mut Frame, area: Rect, app: &App) {
    match app.view {
        View::Live => draw_live(f, area, app),
        View::Snapshot => draw_snapshot(f, area, app),
        View::Containers => {}
    }
}

fn draw_live(f: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let status = session.status();

    let (indicator, indicator_color) = if status.connected {
        ("Connected", Color::Green)
    } else {
        ("Disconnected", Color::Red)
    };
    let title = Line::from(vec![
        Span::raw(format!(" Live Logs - {} ", session.container().name)),
        Span::styled(
            format!("[{}] ", indicator),
            Style::default().fg(indicator_color),
        ),
    ]);
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner_height = area.height.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();

    if status.paused {
        lines.push(Line::from(Span::styled(
            format!(
                "[PAUSED] {} new logs buffered - press p to resume",
                status.held_count
            ),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(message) = &status.error_message {
        lines.push(Line::from(Span::styled(
            format!("Error: {}", message),
            Style::default().fg(Color::Red),
        )));
    }

    let visible = session.visible();
    if visible.is_empty() {
        let placeholder = if status.connected {
            "Waiting for logs..."
        } else {
            "No logs available"
        };
        lines.push(Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        // Tail-follow: show as many of the newest visible lines as fit.
        // While paused the visible partition stops growing, so the view
        // freezes on its own.
        let room = inner_height.saturating_sub(lines.len()).max(1);
        let start = visible.len().saturating_sub(room);
        for log in &visible[start..] {
            lines.push(live_line(log));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// One rendered live line: dim arrival timestamp, then the payload with
/// its ANSI styling applied.
fn live_line(log: &LogLine) -> Line<'static> {
    let mut spans = vec![Span::styled(
        log.received_at.format("[%H:%M:%S] ").to_string(),
        Style::default().fg(Color::DarkGray),
    )];
    spans.extend(ansi_line(&log.text).spans);
    Line::from(spans)
}

fn draw_snapshot(f: &mut Frame, area: Rect, app: &App) {
    let Some(snapshot) = app.snapshot.as_ref() else {
        return;
    };

    let block = Block::default().borders(Borders::ALL).title(format!(
        " Logs - {} (last {} lines) ",
        snapshot.container.name, snapshot.lines
    ));
    let inner_height = area.height.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();

    if let Some(message) = &snapshot.error {
        lines.push(Line::from(Span::styled(
            format!("Error: {}", message),
            Style::default().fg(Color::Red),
        )));
    }

    if !snapshot.fetched {
        lines.push(Line::from(Span::styled(
            "Loading logs...",
            Style::default().fg(Color::DarkGray),
        )));
    } else if snapshot.logs.is_empty() {
        lines.push(Line::from(Span::styled(
            "No logs available",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let room = inner_height.saturating_sub(lines.len()).max(1);
        let start = snapshot.logs.len().saturating_sub(room);
        for text in &snapshot.logs[start..] {
            lines.push(ansi_line(text));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_live_line_prefixes_arrival_time() {
        let time = Local.with_ymd_and_hms(2024, 1, 15, 14, 30, 5).unwrap();
        let log = LogLine::new_with_time("server ready".to_string(), time);

        let line = live_line(&log);
        let rendered: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(rendered, "[14:30:05] server ready");
    }

    #[test]
    fn test_live_line_keeps_ansi_styled_payload() {
        let time = Local.with_ymd_and_hms(2024, 1, 15, 14, 30, 5).unwrap();
        let log = LogLine::new_with_time("\x1b[31merror\x1b[0m".to_string(), time);

        let line = live_line(&log);
        let rendered: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        // Escape codes become styling, not text
        assert_eq!(rendered, "[14:30:05] error");
        assert!(line
            .spans
            .iter()
            .any(|s| s.content.as_ref() == "error" && s.style.fg == Some(Color::Red)));
    }
}
