//! # Editor Session
//!
//! The injectable session object: the live [`Buffer`], the [`Debouncer`]
//! watching it and the [`RequestOrchestrator`] fed by it.
//!
//! Every method that takes `now` is a discrete reaction to one event
//! (keystroke, timer check, completion). Nothing in here blocks or sleeps;
//! the controller decides when to call [`EditorSession::tick`] and
//! [`EditorSession::drain_completions`].

use crate::repl::models::{Buffer, BufferError, DisplayState, Motion, RequestStatus};
use crate::repl::services::{AnalysisClient, ChangeOutcome, Debouncer, RequestOrchestrator};
use crate::repl::text::indent::{self, StructuralKey};
use std::time::{Duration, Instant};

pub struct EditorSession<C: AnalysisClient> {
    buffer: Buffer,
    debouncer: Debouncer,
    orchestrator: RequestOrchestrator<C>,
}

impl<C: AnalysisClient> EditorSession<C> {
    pub fn new(client: C, quiescence: Duration) -> Self {
        Self {
            buffer: Buffer::new(),
            debouncer: Debouncer::new(quiescence),
            orchestrator: RequestOrchestrator::new(client),
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn display(&self) -> &DisplayState {
        self.orchestrator.display()
    }

    pub fn is_debug_busy(&self) -> bool {
        self.orchestrator.is_debug_busy()
    }

    pub fn reasoning_status(&self) -> RequestStatus {
        self.orchestrator.reasoning_state().status()
    }

    pub fn debug_status(&self) -> RequestStatus {
        self.orchestrator.debug_state().status()
    }

    /// Whether an auto-reasoning trigger is waiting for quiescence
    pub fn is_reasoning_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// When the session next needs [`EditorSession::tick`]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Replace the live buffer. A text change notifies the scheduler; a pure
    /// caret move does not.
    pub fn commit(&mut self, buffer: Buffer, now: Instant) {
        let changed = buffer.text() != self.buffer.text();
        self.buffer = buffer;
        if !changed {
            return;
        }

        match self.debouncer.notify_changed(self.buffer.text(), now) {
            ChangeOutcome::Scheduled { .. } => {}
            ChangeOutcome::Cleared => self.orchestrator.clear_reasoning(),
        }
    }

    /// Type `text` over the current selection
    ///
    /// # Errors
    ///
    /// Propagates [`BufferError`] from the buffer model.
    pub fn insert_text(&mut self, text: &str, now: Instant) -> Result<(), BufferError> {
        let next = self.buffer.replace_selection(text)?;
        self.commit(next, now);
        Ok(())
    }

    /// Tab or Enter, rewritten by the indentation engine
    ///
    /// # Errors
    ///
    /// Propagates [`BufferError`] from the buffer model.
    pub fn press_structural(
        &mut self,
        key: StructuralKey,
        now: Instant,
    ) -> Result<(), BufferError> {
        let next = indent::apply(key, &self.buffer)?;
        self.commit(next, now);
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates [`BufferError`] from the buffer model.
    pub fn delete_backward(&mut self, now: Instant) -> Result<(), BufferError> {
        let next = self.buffer.delete_backward()?;
        self.commit(next, now);
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates [`BufferError`] from the buffer model.
    pub fn delete_forward(&mut self, now: Instant) -> Result<(), BufferError> {
        let next = self.buffer.delete_forward()?;
        self.commit(next, now);
        Ok(())
    }

    pub fn move_caret(&mut self, motion: Motion, extend: bool, now: Instant) {
        let next = self.buffer.move_caret(motion, extend);
        self.commit(next, now);
    }

    /// Replace the whole text, caret at the end
    pub fn set_text(&mut self, text: &str, now: Instant) {
        self.commit(Buffer::with_text(text), now);
    }

    pub fn clear(&mut self, now: Instant) {
        self.commit(Buffer::new(), now);
    }

    /// Explicit debug invocation. Returns whether a request was sent.
    pub fn run_debug(&mut self) -> bool {
        self.orchestrator.trigger_debug(self.buffer.text())
    }

    /// Fire the debounce trigger if it is due. Returns whether a reasoning
    /// request was issued.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(snapshot) => {
                self.orchestrator.issue_reasoning(snapshot);
                true
            }
            None => false,
        }
    }

    /// Apply every completion that is already waiting. Returns whether the
    /// display changed.
    pub fn drain_completions(&mut self) -> bool {
        let mut changed = false;
        while let Some(completion) = self.orchestrator.poll_completion() {
            changed |= self.orchestrator.apply(completion);
        }
        changed
    }

    /// Wait for the next completion and apply it. Returns whether the display
    /// changed, or `None` if the channel is closed.
    pub async fn next_completion(&mut self) -> Option<bool> {
        let completion = self.orchestrator.next_completion().await?;
        Some(self.orchestrator.apply(completion))
    }
}
