//! # Caret Movement Commands
//!
//! Arrow keys, Home and End. Holding Shift extends the selection.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::repl::models::Motion;

/// Map a navigation key to its caret motion
fn motion_for(code: KeyCode) -> Option<Motion> {
    match code {
        KeyCode::Left => Some(Motion::Left),
        KeyCode::Right => Some(Motion::Right),
        KeyCode::Up => Some(Motion::Up),
        KeyCode::Down => Some(Motion::Down),
        KeyCode::Home => Some(Motion::LineStart),
        KeyCode::End => Some(Motion::LineEnd),
        _ => None,
    }
}

pub struct MoveCaretCommand;

impl Command for MoveCaretCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        motion_for(event.code).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let extend = event.modifiers.contains(KeyModifiers::SHIFT);
        Ok(motion_for(event.code)
            .map(|motion| CommandEvent::caret_move(motion, extend))
            .into_iter()
            .collect())
    }

    fn name(&self) -> &'static str {
        "MoveCaret"
    }
}
