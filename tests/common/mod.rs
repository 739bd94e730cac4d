//! Shared fixtures for integration tests
#![allow(dead_code)]

use codeline::testing::MockAnalysisClient;
use codeline::{AppController, EditorSession, MockEventStream};
use crossterm::event::{KeyCode, KeyModifiers};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub type TestApp<C> = AppController<MockEventStream, Vec<u8>, C>;

/// Controller over scripted input and an in-memory screen
pub fn app<C: codeline::AnalysisClient>(
    client: C,
    events: MockEventStream,
    quiescence: Duration,
) -> TestApp<C> {
    AppController::new(
        EditorSession::new(client, quiescence),
        events,
        Vec::new(),
        (80, 24),
    )
}

pub fn mock_app(
    client: &MockAnalysisClient,
    events: MockEventStream,
) -> TestApp<MockAnalysisClient> {
    app(client.clone(), events, codeline::services::DEFAULT_QUIESCENCE)
}

pub fn push_quit(events: &mut MockEventStream) {
    events.push_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
}

/// Analysis service answering both endpoints with fixed bodies
pub async fn analysis_server(reasoning: &str, output: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reasoning"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reasoning": reasoning })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/debug"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": output })))
        .mount(&server)
        .await;
    server
}

/// Screen bytes as text
pub fn screen<C: codeline::AnalysisClient>(app: &TestApp<C>) -> String {
    String::from_utf8_lossy(app.renderer().writer()).to_string()
}
