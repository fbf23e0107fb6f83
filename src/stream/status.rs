use super::ConnectionState;

/// Read-only snapshot of a session's state, consumed by the UI.
///
/// Recomputed synchronously after every state-affecting event, so no stale
/// projection is observable between an event and its visible effect.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamStatus {
    pub connected: bool,
    pub paused: bool,
    pub error_message: Option<String>,
    pub held_count: usize,
}

impl StreamStatus {
    pub fn project(
        state: ConnectionState,
        paused: bool,
        error: Option<&str>,
        held_count: usize,
    ) -> Self {
        Self {
            connected: state == ConnectionState::Open,
            paused,
            error_message: error.map(str::to_string),
            held_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_only_while_open() {
        for state in [
            ConnectionState::Idle,
            ConnectionState::Connecting,
            ConnectionState::Errored,
            ConnectionState::Closed,
        ] {
            assert!(!StreamStatus::project(state, false, None, 0).connected);
        }
        assert!(StreamStatus::project(ConnectionState::Open, false, None, 0).connected);
    }

    #[test]
    fn test_projection_carries_error_and_held_count() {
        let status = StreamStatus::project(ConnectionState::Errored, true, Some("boom"), 3);
        assert!(!status.connected);
        assert!(status.paused);
        assert_eq!(status.error_message.as_deref(), Some("boom"));
        assert_eq!(status.held_count, 3);
    }
}
