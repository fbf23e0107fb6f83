use ratatui::{backend::TestBackend, Terminal};
use sandtail::api::ContainerSummary;
use sandtail::stream::{ContainerRef, LogSession, StreamEvent};
use sandtail::ui::App;

/// Helper to create a container summary without going through the API
pub fn test_container(id: i64, name: &str, status: &str) -> ContainerSummary {
    serde_json::from_str(&format!(
        r#"{{"id": {}, "name": "{}", "status": "{}"}}"#,
        id, name, status
    ))
    .unwrap()
}

/// Helper to create an open session that has received the given lines
pub fn session_with_lines(name: &str, lines: &[&str]) -> LogSession {
    let mut session = LogSession::new(ContainerRef::new(1, name));
    session.apply_event(StreamEvent::Opened);
    for line in lines {
        session.apply_event(StreamEvent::Line(line.to_string()));
    }
    session
}

/// Helper to render the app to a test terminal and return the buffer as a string
pub fn render_app_to_string(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal
        .draw(|f| {
            sandtail::ui::draw(f, app);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    let mut result = String::new();
    for y in 0..height {
        for x in 0..width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        result.push('\n');
    }
    result
}
