//! # Request Orchestrator
//!
//! Owns the lifecycle of the reasoning and debug requests and merges their
//! outcomes into [`DisplayState`].
//!
//! Requests run as spawned tokio tasks and report back over an mpsc channel,
//! the same way the HTTP service hands responses back to the event loop. The
//! orchestrator itself is only touched from the event loop, so completions are
//! applied one at a time, in whatever order the loop drains them.
//!
//! Reasoning requests are tagged with a sequence number. Only the completion
//! for the most recently issued number is applied; anything older is dropped,
//! whatever order the responses arrive in. Nothing is ever cancelled.

use super::analysis::{AnalysisClient, AnalysisError, DebugResponse, ReasoningResponse};
use crate::repl::models::{DisplayState, RequestKind, RequestState};
use std::future::Future;
use tokio::sync::mpsc;

pub const REASONING_ERROR: &str = "Error fetching reasoning.";
pub const REASONING_EMPTY: &str = "No reasoning provided.";
pub const DEBUG_ERROR: &str = "Error fetching debug output.";
pub const DEBUG_EMPTY: &str = "No output.";

const COMPLETION_CHANNEL_CAPACITY: usize = 16;

/// Outcome of one request, delivered back to the event loop
#[derive(Debug)]
pub enum Completion {
    Reasoning {
        seq: u64,
        result: Result<ReasoningResponse, AnalysisError>,
    },
    Debug {
        result: Result<DebugResponse, AnalysisError>,
    },
}

impl Completion {
    pub fn kind(&self) -> RequestKind {
        match self {
            Completion::Reasoning { .. } => RequestKind::Reasoning,
            Completion::Debug { .. } => RequestKind::Debug,
        }
    }
}

pub struct RequestOrchestrator<C: AnalysisClient> {
    client: C,
    reasoning: RequestState,
    debug: RequestState,
    display: DisplayState,
    /// Sequence number of the latest reasoning request issued, 0 before any
    latest_reasoning_seq: u64,
    completion_sender: mpsc::Sender<Completion>,
    completion_receiver: mpsc::Receiver<Completion>,
}

impl<C: AnalysisClient> RequestOrchestrator<C> {
    pub fn new(client: C) -> Self {
        let (completion_sender, completion_receiver) = mpsc::channel(COMPLETION_CHANNEL_CAPACITY);
        Self {
            client,
            reasoning: RequestState::new(RequestKind::Reasoning),
            debug: RequestState::new(RequestKind::Debug),
            display: DisplayState::new(),
            latest_reasoning_seq: 0,
            completion_sender,
            completion_receiver,
        }
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn reasoning_state(&self) -> &RequestState {
        &self.reasoning
    }

    pub fn debug_state(&self) -> &RequestState {
        &self.debug
    }

    /// True while a debug request is in flight
    pub fn is_debug_busy(&self) -> bool {
        self.debug.is_in_flight()
    }

    /// Issue a reasoning request for `snapshot`, superseding any earlier one.
    ///
    /// Returns the sequence number the request was tagged with. Must be
    /// called from within a tokio runtime.
    pub fn issue_reasoning(&mut self, snapshot: String) -> u64 {
        self.latest_reasoning_seq += 1;
        let seq = self.latest_reasoning_seq;
        self.reasoning.start();
        tracing::debug!(seq, len = snapshot.len(), "issuing reasoning request");

        let client = self.client.clone();
        spawn_request(
            self.completion_sender.clone(),
            async move { client.request_reasoning(snapshot).await },
            move |result| Completion::Reasoning { seq, result },
        );
        seq
    }

    /// Issue a debug request for `snapshot` unless one is already in flight
    /// or the snapshot is blank. Returns whether a request was sent.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger_debug(&mut self, snapshot: &str) -> bool {
        if self.is_debug_busy() {
            tracing::debug!("debug request already in flight, ignoring trigger");
            return false;
        }
        if snapshot.trim().is_empty() {
            tracing::debug!("blank buffer, ignoring debug trigger");
            return false;
        }

        self.debug.start();
        tracing::info!(len = snapshot.len(), "issuing debug request");

        let client = self.client.clone();
        let code = snapshot.to_string();
        spawn_request(
            self.completion_sender.clone(),
            async move { client.request_debug(code).await },
            |result| Completion::Debug { result },
        );
        true
    }

    /// Blank buffer: the reasoning pane empties immediately
    pub fn clear_reasoning(&mut self) {
        self.display.clear_reasoning();
    }

    /// Next completion if one is ready (non-blocking)
    pub fn poll_completion(&mut self) -> Option<Completion> {
        self.completion_receiver.try_recv().ok()
    }

    /// Wait for the next completion
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completion_receiver.recv().await
    }

    /// Merge a completion into request and display state.
    ///
    /// Returns whether the display changed as a result.
    pub fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Reasoning { seq, result } => self.apply_reasoning(seq, result),
            Completion::Debug { result } => self.apply_debug(result),
        }
    }

    fn apply_reasoning(
        &mut self,
        seq: u64,
        result: Result<ReasoningResponse, AnalysisError>,
    ) -> bool {
        if seq != self.latest_reasoning_seq {
            tracing::debug!(
                seq,
                latest = self.latest_reasoning_seq,
                "discarding stale reasoning response"
            );
            return false;
        }

        match result {
            Ok(response) => {
                let text = non_empty_or(response.reasoning, REASONING_EMPTY);
                self.reasoning.succeed(text);
            }
            Err(e) => {
                tracing::warn!(seq, "reasoning request failed: {e}");
                self.reasoning.fail(REASONING_ERROR);
            }
        }
        self.display.set_reasoning_text(self.reasoning.result_text());
        true
    }

    fn apply_debug(&mut self, result: Result<DebugResponse, AnalysisError>) -> bool {
        match result {
            Ok(response) => {
                let text = non_empty_or(response.output, DEBUG_EMPTY);
                self.debug.succeed(text);
                tracing::info!("debug request finished");
            }
            Err(e) => {
                tracing::error!("debug request failed: {e}");
                self.debug.fail(DEBUG_ERROR);
            }
        }
        self.display.set_debug_text(self.debug.result_text());
        true
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Run `request` on its own task and always deliver a completion, even if the
/// request task panics or is aborted, so busy state can never stick.
fn spawn_request<T, F, M>(sender: mpsc::Sender<Completion>, request: F, into_completion: M)
where
    T: Send + 'static,
    F: Future<Output = Result<T, AnalysisError>> + Send + 'static,
    M: FnOnce(Result<T, AnalysisError>) -> Completion + Send + 'static,
{
    tokio::spawn(async move {
        let result = match tokio::spawn(request).await {
            Ok(result) => result,
            Err(e) => Err(AnalysisError::Aborted(e.to_string())),
        };
        let completion = into_completion(result);
        let kind = completion.kind();
        if sender.send(completion).await.is_err() {
            tracing::debug!(%kind, "completion receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::models::RequestStatus;
    use crate::repl::testing::{MockAnalysisClient, MockReply};
    use std::time::Duration;

    async fn apply_next(orchestrator: &mut RequestOrchestrator<MockAnalysisClient>) -> bool {
        let completion = orchestrator.next_completion().await.unwrap();
        orchestrator.apply(completion)
    }

    #[tokio::test(start_paused = true)]
    async fn newer_reasoning_should_win_over_late_older_response() {
        let client = MockAnalysisClient::new();
        client.push_reasoning(MockReply::text("from R1"), Duration::from_millis(500));
        client.push_reasoning(MockReply::text("from R2"), Duration::from_millis(100));
        let mut orchestrator = RequestOrchestrator::new(client);

        let first = orchestrator.issue_reasoning("r1".to_string());
        let second = orchestrator.issue_reasoning("r2".to_string());
        assert_eq!((first, second), (1, 2));

        // R2 arrives first and is applied
        assert!(apply_next(&mut orchestrator).await);
        assert_eq!(orchestrator.display().reasoning_text(), "from R2");

        // R1 arrives late and is dropped
        assert!(!apply_next(&mut orchestrator).await);
        assert_eq!(orchestrator.display().reasoning_text(), "from R2");
    }

    #[tokio::test(start_paused = true)]
    async fn stale_reasoning_arriving_first_should_be_dropped() {
        let client = MockAnalysisClient::new();
        client.push_reasoning(MockReply::text("old"), Duration::from_millis(10));
        client.push_reasoning(MockReply::text("new"), Duration::from_millis(300));
        let mut orchestrator = RequestOrchestrator::new(client);

        orchestrator.issue_reasoning("a".to_string());
        orchestrator.issue_reasoning("ab".to_string());

        assert!(!apply_next(&mut orchestrator).await);
        assert_eq!(orchestrator.display().reasoning_text(), "");
        assert!(orchestrator.reasoning_state().is_in_flight());

        assert!(apply_next(&mut orchestrator).await);
        assert_eq!(orchestrator.display().reasoning_text(), "new");
    }

    #[tokio::test]
    async fn reasoning_failure_should_show_sentinel() {
        let client = MockAnalysisClient::new();
        client.push_reasoning(MockReply::Malformed, Duration::ZERO);
        let mut orchestrator = RequestOrchestrator::new(client);

        orchestrator.issue_reasoning("x".to_string());
        apply_next(&mut orchestrator).await;

        assert_eq!(orchestrator.display().reasoning_text(), REASONING_ERROR);
        assert_eq!(orchestrator.reasoning_state().status(), RequestStatus::Failed);
    }

    #[tokio::test]
    async fn reasoning_without_field_should_show_placeholder() {
        let client = MockAnalysisClient::new();
        client.push_reasoning(MockReply::Missing, Duration::ZERO);
        let mut orchestrator = RequestOrchestrator::new(client);

        orchestrator.issue_reasoning("x".to_string());
        apply_next(&mut orchestrator).await;

        assert_eq!(orchestrator.display().reasoning_text(), REASONING_EMPTY);
    }

    #[tokio::test(start_paused = true)]
    async fn debug_trigger_while_in_flight_should_be_noop() {
        let client = MockAnalysisClient::new();
        client.push_debug(MockReply::text("hello\n"), Duration::from_millis(200));
        let mut orchestrator = RequestOrchestrator::new(client.clone());

        assert!(orchestrator.trigger_debug("print('hello')"));
        assert!(orchestrator.is_debug_busy());

        assert!(!orchestrator.trigger_debug("print('again')"));
        assert_eq!(orchestrator.debug_state().status(), RequestStatus::InFlight);
        assert_eq!(orchestrator.display().debug_text(), "");

        apply_next(&mut orchestrator).await;

        assert!(!orchestrator.is_debug_busy());
        assert_eq!(orchestrator.display().debug_text(), "hello\n");
        assert_eq!(client.debug_calls(), vec!["print('hello')".to_string()]);
    }

    #[tokio::test]
    async fn debug_trigger_on_blank_buffer_should_be_noop() {
        let client = MockAnalysisClient::new();
        let mut orchestrator = RequestOrchestrator::new(client.clone());

        assert!(!orchestrator.trigger_debug("   \n"));
        assert!(!orchestrator.is_debug_busy());
        assert!(client.debug_calls().is_empty());
    }

    #[tokio::test]
    async fn debug_failure_should_release_busy_flag() {
        let client = MockAnalysisClient::new();
        client.push_debug(MockReply::Status(502), Duration::ZERO);
        let mut orchestrator = RequestOrchestrator::new(client);

        orchestrator.trigger_debug("x");
        apply_next(&mut orchestrator).await;

        assert!(!orchestrator.is_debug_busy());
        assert_eq!(orchestrator.display().debug_text(), DEBUG_ERROR);
    }

    #[tokio::test]
    async fn debug_without_output_should_show_placeholder() {
        let client = MockAnalysisClient::new();
        client.push_debug(MockReply::Missing, Duration::ZERO);
        let mut orchestrator = RequestOrchestrator::new(client);

        orchestrator.trigger_debug("pass");
        apply_next(&mut orchestrator).await;

        assert_eq!(orchestrator.display().debug_text(), DEBUG_EMPTY);
        assert_eq!(orchestrator.debug_state().status(), RequestStatus::Succeeded);
    }

    #[tokio::test]
    async fn panicking_debug_request_should_still_release_busy_flag() {
        let client = MockAnalysisClient::new();
        client.push_debug(MockReply::Panic, Duration::ZERO);
        let mut orchestrator = RequestOrchestrator::new(client);

        orchestrator.trigger_debug("x");
        apply_next(&mut orchestrator).await;

        assert!(!orchestrator.is_debug_busy());
        assert_eq!(orchestrator.display().debug_text(), DEBUG_ERROR);
    }

    #[tokio::test]
    async fn display_should_not_change_while_in_flight() {
        let client = MockAnalysisClient::new();
        client.push_reasoning(MockReply::text("first"), Duration::ZERO);
        let mut orchestrator = RequestOrchestrator::new(client);

        orchestrator.issue_reasoning("a".to_string());
        apply_next(&mut orchestrator).await;
        orchestrator.issue_reasoning("ab".to_string());

        assert!(orchestrator.reasoning_state().is_in_flight());
        assert_eq!(orchestrator.display().reasoning_text(), "first");
    }

    #[test]
    fn apply_should_ignore_completion_for_unissued_sequence() {
        let mut orchestrator = RequestOrchestrator::new(MockAnalysisClient::new());
        let changed = orchestrator.apply(Completion::Reasoning {
            seq: 7,
            result: Ok(ReasoningResponse {
                reasoning: Some("ghost".to_string()),
            }),
        });

        assert!(!changed);
        assert_eq!(orchestrator.display().reasoning_text(), "");
    }
}
