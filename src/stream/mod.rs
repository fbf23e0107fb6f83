use chrono::{DateTime, Local};

pub mod buffer;
pub mod connection;
pub mod session;
pub mod status;

pub use buffer::{LineBuffer, PauseController};
pub use connection::{classify_payload, Connection, ConnectionState, StreamEvent};
pub use session::{ContainerRef, LogSession};
pub use status::StreamStatus;

/// A single log line received from a container stream.
///
/// The payload is kept verbatim (including any ANSI escape codes); ordering
/// is defined by arrival, so no sequence number is stored.
#[derive(Debug, Clone)]
pub struct LogLine {
    /// When the line was received by this client
    pub received_at: DateTime<Local>,
    pub text: String,
}

impl LogLine {
    pub fn new(text: String) -> Self {
        Self {
            received_at: Local::now(),
            text,
        }
    }

    /// Create a log line with a specific arrival time (for tests)
    pub fn new_with_time(text: String, time: DateTime<Local>) -> Self {
        Self {
            received_at: time,
            text,
        }
    }
}
