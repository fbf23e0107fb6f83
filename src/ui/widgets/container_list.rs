use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::App;

fn status_color(status: Option<&str>) -> Color {
    match status.map(|s| s.to_ascii_uppercase()) {
        Some(s) if s == "RUNNING" => Color::Green,
        Some(s) if s == "STOPPED" => Color::Red,
        Some(s) if s == "CREATING" || s == "STARTING" => Color::Yellow,
        _ => Color::DarkGray,
    }
}

/// Draw the container picker
pub fn draw_container_list(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Containers ({}) ", app.containers.len()));

    let mut lines: Vec<Line> = Vec::new();

    if app.containers.is_empty() {
        lines.push(Line::from(Span::styled(
            "No containers - press r to refresh",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (idx, container) in app.containers.iter().enumerate() {
        let status = container.status.as_deref().unwrap_or("unknown");
        let mut name_style = Style::default();
        if idx == app.selected {
            name_style = name_style
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD);
        }

        let marker = if idx == app.selected { "> " } else { "  " };
        lines.push(Line::from(vec![
            Span::raw(marker.to_string()),
            Span::styled(format!("{:<24}", container.name), name_style),
            Span::styled(
                format!(" {:<10}", status.to_lowercase()),
                Style::default().fg(status_color(container.status.as_deref())),
            ),
            Span::styled(
                container.image.clone().unwrap_or_default(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
