//! Editing and request flows driven through the controller with a scripted
//! analysis client

mod common;

use codeline::services::orchestrator::{DEBUG_ERROR, REASONING_EMPTY};
use codeline::services::DEFAULT_QUIESCENCE;
use codeline::testing::{MockAnalysisClient, MockReply};
use codeline::{EditorSession, MockEventStream};
use common::{mock_app, push_quit, screen};
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::{Duration, Instant};

#[tokio::test]
async fn typing_a_function_should_auto_indent_its_body() {
    let client = MockAnalysisClient::new();
    let mut events = MockEventStream::default();
    events.push_text("def greet(name):\nprint(name)\nreturn name\n");
    push_quit(&mut events);
    let mut app = mock_app(&client, events);

    app.run_until_quit().await.unwrap();

    assert_eq!(
        app.session().buffer().text(),
        "def greet(name):\n    print(name)\n    return name\n    "
    );
}

#[tokio::test]
async fn backspace_should_undo_indent_one_char_at_a_time() {
    let client = MockAnalysisClient::new();
    let mut events = MockEventStream::default();
    events.push_text("if ok:\n");
    for _ in 0..4 {
        events.push_key(KeyCode::Backspace, KeyModifiers::NONE);
    }
    events.push_text("done");
    push_quit(&mut events);
    let mut app = mock_app(&client, events);

    app.run_until_quit().await.unwrap();

    assert_eq!(app.session().buffer().text(), "if ok:\ndone");
}

#[tokio::test]
async fn typing_over_a_selection_should_replace_it() {
    let client = MockAnalysisClient::new();
    let mut events = MockEventStream::default();
    events.push_text("hello");
    events.push_key(KeyCode::Left, KeyModifiers::SHIFT);
    events.push_key(KeyCode::Left, KeyModifiers::SHIFT);
    events.push_text("p!");
    push_quit(&mut events);
    let mut app = mock_app(&client, events);

    app.run_until_quit().await.unwrap();

    let buffer = app.session().buffer();
    assert_eq!(buffer.text(), "help!");
    assert_eq!(buffer.caret_start(), 5);
    assert!(!buffer.has_selection());
}

#[tokio::test]
async fn tab_with_selection_should_replace_selection_with_indent() {
    let client = MockAnalysisClient::new();
    let mut events = MockEventStream::default();
    events.push_text("abc");
    events.push_key(KeyCode::Home, KeyModifiers::SHIFT);
    events.push_text("\t");
    push_quit(&mut events);
    let mut app = mock_app(&client, events);

    app.run_until_quit().await.unwrap();

    assert_eq!(app.session().buffer().text(), "    ");
    assert_eq!(app.session().buffer().caret_start(), 4);
}

#[tokio::test(start_paused = true)]
async fn reasoning_should_follow_last_issued_request_when_responses_reorder() {
    let client = MockAnalysisClient::new();
    client.push_reasoning(MockReply::text("about x"), Duration::from_millis(900));
    client.push_reasoning(MockReply::Missing, Duration::from_millis(20));
    let mut session = EditorSession::new(client.clone(), DEFAULT_QUIESCENCE);
    let start = Instant::now();

    session.insert_text("x", start).unwrap();
    assert!(session.tick(start + DEFAULT_QUIESCENCE));
    session.insert_text("y", start + Duration::from_secs(1)).unwrap();
    assert!(session.tick(start + Duration::from_secs(1) + DEFAULT_QUIESCENCE));

    // Newer response lands first, the older one after it
    assert_eq!(session.next_completion().await, Some(true));
    assert_eq!(session.next_completion().await, Some(false));

    assert_eq!(client.reasoning_calls(), vec!["x".to_string(), "xy".to_string()]);
    assert_eq!(session.display().reasoning_text(), REASONING_EMPTY);
}

#[tokio::test(start_paused = true)]
async fn clearing_during_reasoning_should_still_show_latest_response() {
    let client = MockAnalysisClient::new();
    client.push_reasoning(MockReply::text("late"), Duration::from_millis(100));
    let mut session = EditorSession::new(client, DEFAULT_QUIESCENCE);
    let start = Instant::now();

    session.set_text("print(1)", start);
    session.tick(start + DEFAULT_QUIESCENCE);
    session.clear(start + DEFAULT_QUIESCENCE + Duration::from_millis(10));
    assert_eq!(session.display().reasoning_text(), "");

    assert_eq!(session.next_completion().await, Some(true));
    assert_eq!(session.display().reasoning_text(), "late");
}

#[tokio::test]
async fn failed_debug_should_show_error_and_allow_rerun() {
    let client = MockAnalysisClient::new();
    client.push_debug(MockReply::Status(500), Duration::ZERO);
    client.push_debug(MockReply::text("ok"), Duration::ZERO);
    let mut events = MockEventStream::default();
    events.push_text("1/0");
    events.push_key(KeyCode::F(5), KeyModifiers::NONE);
    let mut app = mock_app(&client, events);

    for _ in 0..4 {
        app.step().await.unwrap();
    }
    app.session_mut().next_completion().await;
    assert_eq!(app.session().display().debug_text(), DEBUG_ERROR);
    assert!(!app.session().is_debug_busy());

    app.process_key_event(crossterm::event::KeyEvent::new(
        KeyCode::Char('r'),
        KeyModifiers::CONTROL,
    ))
    .unwrap();
    app.session_mut().next_completion().await;

    assert_eq!(app.session().display().debug_text(), "ok");
    assert_eq!(client.debug_calls().len(), 2);
}

#[tokio::test]
async fn screen_should_show_status_line_with_caret_position() {
    let client = MockAnalysisClient::new();
    let mut events = MockEventStream::default();
    events.push_text("a\nbc");
    let mut app = mock_app(&client, events);

    for _ in 0..4 {
        app.step().await.unwrap();
    }

    assert!(screen(&app).contains("Ln 2, Col 3"));
}
