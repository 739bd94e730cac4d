//! Testing infrastructure for the editor session
//!
//! Provides a scripted [`AnalysisClient`] so the orchestrator and session
//! can be exercised without a running analysis service. Replies are queued
//! per endpoint together with a delay, which lets tests control the order in
//! which responses arrive (run them under `tokio::test(start_paused = true)`
//! to keep that deterministic).

use crate::repl::services::analysis::{
    AnalysisClient, AnalysisError, DebugResponse, ReasoningResponse,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// One scripted reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Successful response carrying this text
    Text(String),
    /// Successful response with the result field absent
    Missing,
    /// Non-success HTTP status
    Status(u16),
    /// Response body that does not decode
    Malformed,
    /// The request task panics
    Panic,
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        MockReply::Text(text.into())
    }

    fn into_result(self) -> Result<Option<String>, AnalysisError> {
        match self {
            MockReply::Text(text) => Ok(Some(text)),
            MockReply::Missing => Ok(None),
            MockReply::Status(code) => Err(AnalysisError::Status(code)),
            MockReply::Malformed => Err(AnalysisError::Malformed(
                "expected value at line 1 column 1".to_string(),
            )),
            MockReply::Panic => panic!("scripted request panic"),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    reasoning_replies: VecDeque<(MockReply, Duration)>,
    debug_replies: VecDeque<(MockReply, Duration)>,
    reasoning_calls: Vec<String>,
    debug_calls: Vec<String>,
}

/// Scripted analysis client; clones share the same script and call log
#[derive(Debug, Clone, Default)]
pub struct MockAnalysisClient {
    state: Arc<Mutex<MockState>>,
}

impl MockAnalysisClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking scripted request must not poison the script for later calls
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Queue the reply for the next unscripted reasoning request
    pub fn push_reasoning(&self, reply: MockReply, delay: Duration) {
        self.state().reasoning_replies.push_back((reply, delay));
    }

    /// Queue the reply for the next unscripted debug request
    pub fn push_debug(&self, reply: MockReply, delay: Duration) {
        self.state().debug_replies.push_back((reply, delay));
    }

    /// Code sent to `/reasoning`, in call order
    pub fn reasoning_calls(&self) -> Vec<String> {
        self.state().reasoning_calls.clone()
    }

    /// Code sent to `/debug`, in call order
    pub fn debug_calls(&self) -> Vec<String> {
        self.state().debug_calls.clone()
    }
}

/// What the reference analysis service answers for `/reasoning`
pub fn describe_code(code: &str) -> String {
    format!(
        "Your code has {} lines. It looks like you're using {} tokens.",
        code.lines().count(),
        code.split_whitespace().count()
    )
}

impl AnalysisClient for MockAnalysisClient {
    async fn request_reasoning(&self, code: String) -> Result<ReasoningResponse, AnalysisError> {
        let (reply, delay) = {
            let mut state = self.state();
            state.reasoning_calls.push(code.clone());
            state
                .reasoning_replies
                .pop_front()
                .unwrap_or_else(|| (MockReply::Text(describe_code(&code)), Duration::ZERO))
        };
        tokio::time::sleep(delay).await;
        Ok(ReasoningResponse {
            reasoning: reply.into_result()?,
        })
    }

    async fn request_debug(&self, code: String) -> Result<DebugResponse, AnalysisError> {
        let (reply, delay) = {
            let mut state = self.state();
            state.debug_calls.push(code);
            state
                .debug_replies
                .pop_front()
                .unwrap_or_else(|| (MockReply::Missing, Duration::ZERO))
        };
        tokio::time::sleep(delay).await;
        Ok(DebugResponse {
            output: reply.into_result()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_should_record_calls_and_use_default_reply() {
        let client = MockAnalysisClient::new();

        let response = client
            .request_reasoning("a = 1\nb = 2".to_string())
            .await
            .unwrap();

        assert_eq!(
            response.reasoning.as_deref(),
            Some("Your code has 2 lines. It looks like you're using 6 tokens.")
        );
        assert_eq!(client.reasoning_calls(), vec!["a = 1\nb = 2".to_string()]);
    }

    #[tokio::test]
    async fn mock_should_replay_script_in_order() {
        let client = MockAnalysisClient::new();
        client.push_debug(MockReply::text("one"), Duration::ZERO);
        client.push_debug(MockReply::Status(500), Duration::ZERO);

        let first = client.request_debug("x".to_string()).await.unwrap();
        let second = client.request_debug("y".to_string()).await;

        assert_eq!(first.output.as_deref(), Some("one"));
        assert!(matches!(second, Err(AnalysisError::Status(500))));
    }
}
