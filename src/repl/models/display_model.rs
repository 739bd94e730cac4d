//! # Display Model
//!
//! Last known good text for the reasoning and debug panes.

/// What the output panes show
///
/// Only terminal request transitions write here. The one exception is
/// [`DisplayState::clear_reasoning`], used when the buffer becomes blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    reasoning_text: String,
    debug_text: String,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reasoning_text(&self) -> &str {
        &self.reasoning_text
    }

    pub fn debug_text(&self) -> &str {
        &self.debug_text
    }

    pub fn set_reasoning_text(&mut self, text: impl Into<String>) {
        self.reasoning_text = text.into();
    }

    pub fn set_debug_text(&mut self, text: impl Into<String>) {
        self.debug_text = text.into();
    }

    pub fn clear_reasoning(&mut self) {
        self.reasoning_text.clear();
    }
}
