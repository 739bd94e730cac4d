//! # Command Context
//!
//! Read-only view of the session handed to commands.

use crate::repl::services::AnalysisClient;
use crate::repl::view_models::EditorSession;

/// The session facts key bindings depend on, taken once per key event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Buffer is empty or whitespace only
    pub blank: bool,
    pub debug_busy: bool,
}

impl SessionSnapshot {
    /// Create snapshot from current session state
    pub fn from_session<C: AnalysisClient>(session: &EditorSession<C>) -> Self {
        Self {
            blank: session.buffer().is_blank(),
            debug_busy: session.is_debug_busy(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.blank
    }
}

/// Base context available to all commands
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    pub state: SessionSnapshot,
}

impl CommandContext {
    pub fn new(state: SessionSnapshot) -> Self {
        Self { state }
    }
}
