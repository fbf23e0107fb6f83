use crate::api::{ContainerSummary, SnapshotLines};
use crate::stream::{ContainerRef, LogSession};

/// Which screen the TUI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Container picker
    Containers,
    /// Live streaming log view for one container
    Live,
    /// One-shot snapshot log view for one container
    Snapshot,
}

/// State of the snapshot view: the last successful fetch plus any error
/// from the most recent attempt. A failed refetch keeps the old lines.
pub struct SnapshotState {
    pub container: ContainerRef,
    pub lines: SnapshotLines,
    pub logs: Vec<String>,
    pub error: Option<String>,
    /// Whether at least one fetch has completed
    pub fetched: bool,
}

impl SnapshotState {
    pub fn new(container: ContainerRef, lines: SnapshotLines) -> Self {
        Self {
            container,
            lines,
            logs: Vec::new(),
            error: None,
            fetched: false,
        }
    }
}

/// Application state for the TUI
pub struct App {
    pub view: View,
    /// Containers fetched from the platform
    pub containers: Vec<ContainerSummary>,
    /// Index of the selected container in the picker
    pub selected: usize,
    /// Live session; Some exactly while the Live view is open
    pub session: Option<LogSession>,
    /// Snapshot view state; Some exactly while the Snapshot view is open
    pub snapshot: Option<SnapshotState>,
    /// Transient message shown in the status bar (export path, errors)
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            view: View::Containers,
            containers: Vec::new(),
            selected: 0,
            session: None,
            snapshot: None,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn select_next(&mut self) {
        if !self.containers.is_empty() {
            self.selected = (self.selected + 1) % self.containers.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.containers.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.containers.len() - 1);
        }
    }

    pub fn selected_container(&self) -> Option<&ContainerSummary> {
        self.containers.get(self.selected)
    }

    pub fn set_containers(&mut self, containers: Vec<ContainerSummary>) {
        self.containers = containers;
        if self.selected >= self.containers.len() {
            self.selected = self.containers.len().saturating_sub(1);
        }
    }

    /// Open the live view with an already-connected session.
    pub fn open_live(&mut self, session: LogSession) {
        self.session = Some(session);
        self.view = View::Live;
        self.status_message = None;
    }

    /// Open the snapshot view.
    pub fn open_snapshot(&mut self, snapshot: SnapshotState) {
        self.snapshot = Some(snapshot);
        self.view = View::Snapshot;
        self.status_message = None;
    }

    /// Close whichever log view is open and return to the picker. The
    /// session (and with it the connection and buffer) is destroyed.
    pub fn close_log_view(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.close();
        }
        self.session = None;
        self.snapshot = None;
        self.view = View::Containers;
    }

    /// Drain pending stream events into the live session, if one is open.
    pub fn pump(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.pump();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(id: i64, name: &str) -> ContainerSummary {
        serde_json::from_str(&format!(r#"{{"id": {}, "name": "{}"}}"#, id, name)).unwrap()
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = App::new();
        app.set_containers(vec![container(1, "a"), container(2, "b")]);

        assert_eq!(app.selected_container().unwrap().name, "a");
        app.select_prev();
        assert_eq!(app.selected_container().unwrap().name, "b");
        app.select_next();
        assert_eq!(app.selected_container().unwrap().name, "a");
    }

    #[test]
    fn test_selection_clamped_on_refresh() {
        let mut app = App::new();
        app.set_containers(vec![container(1, "a"), container(2, "b")]);
        app.select_next();
        app.set_containers(vec![container(1, "a")]);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_close_log_view_destroys_session() {
        let mut app = App::new();
        app.open_live(LogSession::new(ContainerRef::new(1, "a")));
        assert_eq!(app.view, View::Live);

        app.close_log_view();
        assert!(app.session.is_none());
        assert_eq!(app.view, View::Containers);
    }
}
