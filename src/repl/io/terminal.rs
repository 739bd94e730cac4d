//! # Terminal I/O Implementations
//!
//! Production event stream backed by crossterm.

use super::EventStream;
use anyhow::Result;
use crossterm::event::{self, Event};
use std::time::Duration;

/// Reads events from the real terminal
#[derive(Debug, Default)]
pub struct TerminalEventStream;

impl TerminalEventStream {
    pub fn new() -> Self {
        Self
    }
}

impl EventStream for TerminalEventStream {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        event::poll(timeout).map_err(anyhow::Error::from)
    }

    fn read(&mut self) -> Result<Event> {
        event::read().map_err(anyhow::Error::from)
    }
}
