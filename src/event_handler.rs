use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::ApiClient;
use crate::config::Config;
use crate::export;
use crate::stream::{ContainerRef, LogSession};
use crate::ui::{App, SnapshotState, View};

pub struct EventHandler<'a> {
    app: &'a mut App,
    config: &'a Config,
}

impl<'a> EventHandler<'a> {
    pub fn new(app: &'a mut App, config: &'a Config) -> Self {
        Self { app, config }
    }

    /// Handle one key event. Returns true if the app should quit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            // In raw mode Ctrl+C arrives as a key event, not a signal
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.app.quit();
                Ok(true)
            }
            KeyCode::Esc if self.app.view != View::Containers => {
                self.app.close_log_view();
                Ok(false)
            }
            KeyCode::Char('q') => {
                if self.app.view == View::Containers {
                    self.app.quit();
                    Ok(true)
                } else {
                    self.app.close_log_view();
                    Ok(false)
                }
            }

            // Container picker
            KeyCode::Up | KeyCode::Char('k') if self.app.view == View::Containers => {
                self.app.select_prev();
                Ok(false)
            }
            KeyCode::Down | KeyCode::Char('j') if self.app.view == View::Containers => {
                self.app.select_next();
                Ok(false)
            }
            KeyCode::Enter if self.app.view == View::Containers => {
                self.open_live();
                Ok(false)
            }
            KeyCode::Char('s') if self.app.view == View::Containers => {
                self.open_snapshot();
                Ok(false)
            }
            KeyCode::Char('r') if self.app.view == View::Containers => {
                self.refresh_containers();
                Ok(false)
            }

            // Live view
            KeyCode::Char('p') if self.app.view == View::Live => {
                if let Some(session) = self.app.session.as_mut() {
                    session.toggle_pause();
                }
                Ok(false)
            }
            KeyCode::Char('c') if self.app.view == View::Live => {
                if let Some(session) = self.app.session.as_mut() {
                    session.clear();
                }
                Ok(false)
            }
            KeyCode::Char('e') if self.app.view == View::Live => {
                self.export_live();
                Ok(false)
            }

            // Snapshot view
            KeyCode::Char('l') if self.app.view == View::Snapshot => {
                if let Some(snapshot) = self.app.snapshot.as_mut() {
                    snapshot.lines = snapshot.lines.cycle();
                }
                self.refetch_snapshot();
                Ok(false)
            }
            KeyCode::Char('r') if self.app.view == View::Snapshot => {
                self.refetch_snapshot();
                Ok(false)
            }
            KeyCode::Char('e') if self.app.view == View::Snapshot => {
                self.export_snapshot();
                Ok(false)
            }

            _ => Ok(false),
        }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(&self.config.server_url, self.config.token.clone())
    }

    /// Fetch the container list; on failure keep the old list and report
    /// in the status bar.
    pub fn refresh_containers(&mut self) {
        match self.client().list_containers() {
            Ok(containers) => {
                self.app.status_message = Some(format!("{} containers", containers.len()));
                self.app.set_containers(containers);
            }
            Err(e) => {
                self.app.status_message = Some(e.to_string());
            }
        }
    }

    fn open_live(&mut self) {
        let Some(container) = self.app.selected_container() else {
            return;
        };
        let container = ContainerRef::new(container.id, container.name.clone());
        let url = self.config.ws_logs_url(container.id);

        let mut session = LogSession::new(container);
        session.connect(&url);
        self.app.open_live(session);
    }

    fn open_snapshot(&mut self) {
        let Some(container) = self.app.selected_container() else {
            return;
        };
        let container = ContainerRef::new(container.id, container.name.clone());
        let snapshot = SnapshotState::new(container, self.config.snapshot_lines());
        self.app.open_snapshot(snapshot);
        self.refetch_snapshot();
    }

    /// One independent request per call. A failure leaves the previously
    /// fetched lines on screen; only the error banner changes.
    fn refetch_snapshot(&mut self) {
        let client = self.client();
        let Some(snapshot) = self.app.snapshot.as_mut() else {
            return;
        };
        match client.fetch_logs(snapshot.container.id, snapshot.lines) {
            Ok(logs) => {
                snapshot.logs = logs;
                snapshot.error = None;
                snapshot.fetched = true;
            }
            Err(e) => {
                snapshot.error = Some(e.to_string());
                snapshot.fetched = true;
            }
        }
    }

    fn export_live(&mut self) {
        let Some(session) = self.app.session.as_ref() else {
            return;
        };
        let result = export::export_live(
            session.buffer(),
            &session.container().name,
            &self.config.export_dir(),
        );
        self.app.status_message = Some(match result {
            Ok(path) => format!("Exported to {}", path.display()),
            Err(e) => e.to_string(),
        });
    }

    fn export_snapshot(&mut self) {
        let Some(snapshot) = self.app.snapshot.as_ref() else {
            return;
        };
        let result = export::export_snapshot(
            &snapshot.logs,
            &snapshot.container.name,
            &self.config.export_dir(),
        );
        self.app.status_message = Some(match result {
            Ok(path) => format!("Exported to {}", path.display()),
            Err(e) => e.to_string(),
        });
    }
}
