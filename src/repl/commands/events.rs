//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the
//! editor session. Commands suggest, the controller decides.

use crate::repl::models::Motion;
use crate::repl::text::StructuralKey;

/// Which side of the caret a deletion removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDirection {
    /// Backspace
    Backward,
    /// Delete
    Forward,
}

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
    /// Type text over the current selection
    TextInsertRequested { text: String },

    /// Tab or Enter, handled by the indentation engine
    StructuralKeyRequested { key: StructuralKey },

    /// Remove the selection or one char next to the caret
    TextDeleteRequested { direction: DeleteDirection },

    /// Move the caret, optionally extending the selection
    CaretMoveRequested { motion: Motion, extend: bool },

    /// Empty the buffer
    ClearRequested,

    /// Explicitly run the debug request
    DebugRequested,

    /// Request to quit application
    QuitRequested,
}

impl CommandEvent {
    pub fn text_insert(text: impl Into<String>) -> Self {
        Self::TextInsertRequested { text: text.into() }
    }

    pub fn structural(key: StructuralKey) -> Self {
        Self::StructuralKeyRequested { key }
    }

    pub fn caret_move(motion: Motion, extend: bool) -> Self {
        Self::CaretMoveRequested { motion, extend }
    }
}
