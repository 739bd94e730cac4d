//! # Request Model
//!
//! Lifecycle state of the two analysis requests.

use std::fmt;

/// The two kinds of outbound analysis request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Issued automatically after the buffer goes quiet
    Reasoning,
    /// Issued explicitly by the user
    Debug,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Reasoning => write!(f, "reasoning"),
            RequestKind::Debug => write!(f, "debug"),
        }
    }
}

/// Where a request is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// State of one request kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestState {
    kind: RequestKind,
    status: RequestStatus,
    result_text: String,
}

impl RequestState {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            status: RequestStatus::Idle,
            result_text: String::new(),
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    pub fn is_in_flight(&self) -> bool {
        self.status == RequestStatus::InFlight
    }

    /// Mark the request as sent. The last result text is kept until a new
    /// terminal transition replaces it.
    pub fn start(&mut self) {
        tracing::trace!(kind = %self.kind, "request in flight");
        self.status = RequestStatus::InFlight;
    }

    pub fn succeed(&mut self, text: String) {
        self.status = RequestStatus::Succeeded;
        self.result_text = text;
    }

    pub fn fail(&mut self, sentinel: &str) {
        self.status = RequestStatus::Failed;
        self.result_text = sentinel.to_string();
    }
}
