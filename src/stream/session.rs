use super::buffer::{LineBuffer, PauseController};
use super::connection::{Connection, ConnectionState, StreamEvent};
use super::status::StreamStatus;
use super::LogLine;

/// Stable identity of a container: opaque id plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRef {
    pub id: i64,
    pub name: String,
}

impl ContainerRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The live binding between one container and its connection, buffer and
/// pause state. Created when a log view opens, destroyed when it closes.
///
/// A session owns zero or one live connections at any time. All buffer
/// mutations are ordered by the arrival order of events from that one
/// connection; the state machine is driven purely by [`StreamEvent`]s, so
/// it can be exercised without a live transport.
pub struct LogSession {
    container: ContainerRef,
    state: ConnectionState,
    pause: PauseController,
    buffer: LineBuffer,
    error: Option<String>,
    connection: Option<Connection>,
    status: StreamStatus,
}

impl LogSession {
    pub fn new(container: ContainerRef) -> Self {
        let mut session = Self {
            container,
            state: ConnectionState::Idle,
            pause: PauseController::new(),
            buffer: LineBuffer::new(),
            error: None,
            connection: None,
            status: StreamStatus::default(),
        };
        session.reproject();
        session
    }

    /// Open the session's streaming connection.
    ///
    /// A session owns at most one live connection; calls while one exists
    /// (or after the session reached a terminal state) are ignored.
    pub fn connect(&mut self, url: &str) {
        if self.connection.is_some() || self.state != ConnectionState::Idle {
            return;
        }
        self.state = ConnectionState::Connecting;
        self.connection = Some(Connection::open(url));
        self.reproject();
    }

    /// Drain and apply every pending event from the connection.
    pub fn pump(&mut self) {
        loop {
            let event = match self.connection.as_mut().and_then(Connection::try_recv) {
                Some(event) => event,
                None => break,
            };
            self.apply_event(event);
        }
    }

    /// Apply one classified event to the session state machine.
    ///
    /// Events arriving after the session reached a terminal state are
    /// discarded; an errored or completed stream stays that way until the
    /// session itself is recreated.
    pub fn apply_event(&mut self, event: StreamEvent) {
        if self.state.is_terminal() {
            return;
        }
        match event {
            StreamEvent::Opened => {
                self.state = ConnectionState::Open;
            }
            StreamEvent::Line(text) => {
                self.pause.route(&mut self.buffer, LogLine::new(text));
            }
            StreamEvent::ServerError(message) => {
                self.error = Some(message);
                self.state = ConnectionState::Errored;
                self.release_connection();
            }
            StreamEvent::TransportError(message) => {
                self.error = Some(message);
                self.state = ConnectionState::Errored;
                self.release_connection();
            }
            StreamEvent::Completed | StreamEvent::Closed => {
                self.state = ConnectionState::Closed;
                self.release_connection();
            }
        }
        self.reproject();
    }

    /// Flip the pause gate; resuming merges held lines into the visible
    /// partition in arrival order.
    pub fn toggle_pause(&mut self) {
        self.pause.toggle(&mut self.buffer);
        self.reproject();
    }

    /// Empty the buffer. Does not touch the connection and works in any
    /// pause or connection state.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.reproject();
    }

    /// Tear the connection down unconditionally. Idempotent; any event
    /// still in flight is discarded with the connection.
    pub fn close(&mut self) {
        self.release_connection();
        if !self.state.is_terminal() {
            self.state = ConnectionState::Closed;
        }
        self.reproject();
    }

    pub fn container(&self) -> &ContainerRef {
        &self.container
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn status(&self) -> &StreamStatus {
        &self.status
    }

    pub fn visible(&self) -> &[LogLine] {
        self.buffer.visible()
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    fn release_connection(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            connection.close();
        }
    }

    fn reproject(&mut self) {
        self.status = StreamStatus::project(
            self.state,
            self.pause.is_paused(),
            self.error.as_deref(),
            self.buffer.held_len(),
        );
    }
}
