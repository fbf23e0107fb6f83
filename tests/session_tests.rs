mod common;

use common::session_with_lines;
use sandtail::stream::{
    classify_payload, ConnectionState, ContainerRef, LogSession, StreamEvent,
};

fn visible_texts(session: &LogSession) -> Vec<String> {
    session
        .visible()
        .iter()
        .map(|l| l.text.clone())
        .collect()
}

#[test]
fn stream_complete_never_appears_as_a_line() {
    let mut session = session_with_lines("web", &["a", "b"]);
    session.apply_event(classify_payload("STREAM_COMPLETE"));

    assert_eq!(visible_texts(&session), vec!["a", "b"]);
    assert_eq!(session.state(), ConnectionState::Closed);
    assert!(!session.status().connected);
    assert!(session.status().error_message.is_none());
}

#[test]
fn error_payload_sets_message_and_disconnects() {
    let mut session = session_with_lines("web", &["a"]);
    session.apply_event(classify_payload("ERROR:boom"));

    let status = session.status();
    assert_eq!(status.error_message.as_deref(), Some("boom"));
    assert!(!status.connected);
    // The sentinel is never appended as a log line
    assert_eq!(visible_texts(&session), vec!["a"]);
}

#[test]
fn server_error_message_preserves_prior_buffer() {
    let mut session = session_with_lines("web", &["kept"]);
    session.toggle_pause();
    session.apply_event(StreamEvent::Line("held".to_string()));
    session.apply_event(classify_payload("ERROR: Container is not running"));

    assert_eq!(
        session.status().error_message.as_deref(),
        Some("Container is not running")
    );
    assert_eq!(visible_texts(&session), vec!["kept"]);
    assert_eq!(session.status().held_count, 1);
    assert_eq!(session.buffer().export_text(), "kept\nheld");
}

#[test]
fn transport_error_reports_generic_message() {
    let mut session = session_with_lines("web", &["a"]);
    session.apply_event(StreamEvent::TransportError(
        "Connection reset by peer".to_string(),
    ));

    assert_eq!(session.state(), ConnectionState::Errored);
    assert_eq!(
        session.status().error_message.as_deref(),
        Some("Connection reset by peer")
    );
    assert_eq!(visible_texts(&session), vec!["a"]);
}

#[test]
fn transport_close_without_sentinel_closes() {
    let mut session = session_with_lines("web", &["a"]);
    session.apply_event(StreamEvent::Closed);

    assert_eq!(session.state(), ConnectionState::Closed);
    assert!(session.status().error_message.is_none());
    assert_eq!(visible_texts(&session), vec!["a"]);
}

#[test]
fn terminal_state_is_sticky_until_session_recreated() {
    let mut session = session_with_lines("web", &[]);
    session.apply_event(StreamEvent::TransportError("gone".to_string()));

    // No automatic reconnection: late events are discarded
    session.apply_event(StreamEvent::Opened);
    session.apply_event(StreamEvent::Line("late".to_string()));
    assert_eq!(session.state(), ConnectionState::Errored);
    assert!(session.visible().is_empty());

    // A fresh session starts clean
    let fresh = LogSession::new(ContainerRef::new(1, "web"));
    assert_eq!(fresh.state(), ConnectionState::Idle);
    assert!(fresh.status().error_message.is_none());
}

#[test]
fn status_projection_is_fresh_after_every_mutation() {
    let mut session = session_with_lines("web", &[]);
    assert!(session.status().connected);

    session.toggle_pause();
    assert!(session.status().paused);
    assert_eq!(session.status().held_count, 0);

    session.apply_event(StreamEvent::Line("x".to_string()));
    assert_eq!(session.status().held_count, 1);

    session.apply_event(StreamEvent::Line("y".to_string()));
    assert_eq!(session.status().held_count, 2);

    session.clear();
    assert_eq!(session.status().held_count, 0);

    session.toggle_pause();
    assert!(!session.status().paused);
}

#[test]
fn pause_then_complete_then_resume_loses_nothing() {
    let mut session = session_with_lines("web", &["a"]);
    session.toggle_pause();
    session.apply_event(StreamEvent::Line("b".to_string()));
    session.apply_event(StreamEvent::Completed);

    // Stream ended while paused: the held line is still there
    assert_eq!(session.status().held_count, 1);

    session.toggle_pause();
    assert_eq!(visible_texts(&session), vec!["a", "b"]);
}

#[test]
fn close_releases_connection_and_is_idempotent() {
    let mut session = session_with_lines("web", &["a"]);
    session.close();
    assert_eq!(session.state(), ConnectionState::Closed);

    session.close();
    assert_eq!(session.state(), ConnectionState::Closed);
    assert_eq!(visible_texts(&session), vec!["a"]);
}

#[tokio::test]
async fn connect_is_rejected_while_a_connection_exists() {
    let mut session = LogSession::new(ContainerRef::new(1, "web"));
    session.connect("ws://127.0.0.1:1/ws/logs/1");
    assert_eq!(session.state(), ConnectionState::Connecting);

    // Second call is ignored: still exactly one connection, state unchanged
    session.connect("ws://127.0.0.1:1/ws/logs/1");
    assert_eq!(session.state(), ConnectionState::Connecting);

    session.close();
    assert_eq!(session.state(), ConnectionState::Closed);

    // A closed session never reconnects
    session.connect("ws://127.0.0.1:1/ws/logs/1");
    assert_eq!(session.state(), ConnectionState::Closed);
}
