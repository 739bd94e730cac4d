//! # I/O Abstraction Layer
//!
//! Trait abstraction over the input event source so the controller can be
//! driven without a terminal.
//!
//! ```text
//! Production:  AppController ──▶ TerminalEventStream ──▶ crossterm::event::read()
//! Testing:     AppController ──▶ MockEventStream     ──▶ VecDeque<Event>
//! ```

use anyhow::Result;
use crossterm::event::Event;
use std::time::Duration;

pub mod mock;
pub mod terminal;

pub use mock::MockEventStream;
pub use terminal::TerminalEventStream;

/// Input event stream abstraction
pub trait EventStream: Send {
    /// Check if events are available within `timeout`
    ///
    /// # Errors
    ///
    /// Fails when the underlying input source fails.
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Read the next available event. Only call after `poll` returned true.
    ///
    /// # Errors
    ///
    /// Fails when the underlying input source fails or has no event.
    fn read(&mut self) -> Result<Event>;
}
