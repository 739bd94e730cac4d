//! # Mock I/O Implementations for Testing
//!
//! Pre-programmed event stream for driving the controller in tests.

use super::EventStream;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::time::Duration;

/// Mock event stream that replays queued events
#[derive(Debug, Default)]
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    /// Add an event to the stream
    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn push_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.push_event(Event::Key(KeyEvent::new(code, modifiers)));
    }

    /// Queue one key press per character of `text`
    pub fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            let code = match ch {
                '\n' => KeyCode::Enter,
                '\t' => KeyCode::Tab,
                ch => KeyCode::Char(ch),
            };
            self.push_key(code, KeyModifiers::NONE);
        }
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_stream_should_replay_events_in_order() {
        let mut stream = MockEventStream::default();
        stream.push_text("a\n");

        assert!(stream.poll(Duration::ZERO).unwrap());
        assert_eq!(
            stream.read().unwrap(),
            Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE))
        );
        assert_eq!(
            stream.read().unwrap(),
            Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
        );
        assert!(!stream.poll(Duration::ZERO).unwrap());
        assert!(stream.read().is_err());
    }
}
