use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Lifecycle of a session's streaming connection. Pause is tracked
/// separately; it only has observable effect while `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Open,
    Errored,
    Closed,
}

impl ConnectionState {
    /// Errored and Closed are terminal: the session stays there until it
    /// is recreated. No automatic reconnection is attempted.
    pub fn is_terminal(self) -> bool {
        matches!(self, ConnectionState::Errored | ConnectionState::Closed)
    }
}

/// A classified inbound event from the streaming endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// The connection was established
    Opened,
    /// An ordinary log line, taken verbatim
    Line(String),
    /// The server sent an `ERROR:` payload; carries the diagnostic
    ServerError(String),
    /// The server sent the `STREAM_COMPLETE` sentinel
    Completed,
    /// A connection-level fault (not a payload)
    TransportError(String),
    /// The transport closed without a prior sentinel
    Closed,
}

/// Classify one inbound text payload.
///
/// The two sentinel payloads are metadata about the stream and are never
/// treated as log content; everything else is one log line, verbatim.
pub fn classify_payload(payload: &str) -> StreamEvent {
    if let Some(diagnostic) = payload.strip_prefix("ERROR:") {
        StreamEvent::ServerError(diagnostic.trim_start().to_string())
    } else if payload == "STREAM_COMPLETE" {
        StreamEvent::Completed
    } else {
        StreamEvent::Line(payload.to_string())
    }
}

/// One live streaming connection, owned by a session.
///
/// The websocket read loop runs in a background task that pushes classified
/// events into an unbounded channel; the owner drains it each tick with
/// [`Connection::try_recv`]. Dropping the connection aborts the task, so
/// the handle is released on every exit path.
pub struct Connection {
    events: mpsc::UnboundedReceiver<StreamEvent>,
    task: Option<JoinHandle<()>>,
}

impl Connection {
    /// Connect to a streaming endpoint and start reading in the background.
    pub fn open(url: &str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let url = url.to_string();
        let task = tokio::spawn(async move {
            read_stream(url, tx).await;
        });
        Self {
            events: rx,
            task: Some(task),
        }
    }

    /// Next pending event, if any (non-blocking).
    pub fn try_recv(&mut self) -> Option<StreamEvent> {
        self.events.try_recv().ok()
    }

    /// Tear the connection down. Idempotent.
    pub fn close(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}

async fn read_stream(url: String, tx: mpsc::UnboundedSender<StreamEvent>) {
    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            let _ = tx.send(StreamEvent::TransportError(e.to_string()));
            return;
        }
    };

    let _ = tx.send(StreamEvent::Opened);

    let (_write, mut read) = stream.split();
    while let Some(message) = read.next().await {
        match message {
            Ok(Message::Text(payload)) => {
                if tx.send(classify_payload(payload.as_str())).is_err() {
                    return; // Session gone
                }
            }
            Ok(Message::Close(_)) => break,
            // Ping/pong and binary frames are not part of the log protocol
            Ok(_) => {}
            Err(e) => {
                let _ = tx.send(StreamEvent::TransportError(e.to_string()));
                return;
            }
        }
    }

    let _ = tx.send(StreamEvent::Closed);
}
