//! # Application Commands
//!
//! Running the debug request and quitting.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};

/// F5 or Ctrl+R runs the debug request.
///
/// Always claimed; the orchestrator turns a press during an in-flight
/// request or on a blank buffer into a no-op.
pub struct RunDebugCommand;

impl Command for RunDebugCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        event.code == KeyCode::F(5)
            || (event.code == KeyCode::Char('r') && event.modifiers.contains(KeyModifiers::CONTROL))
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if context.state.debug_busy {
            tracing::debug!("debug key pressed while request in flight");
        }
        Ok(vec![CommandEvent::DebugRequested])
    }

    fn name(&self) -> &'static str {
        "RunDebug"
    }
}

/// Ctrl+C or Ctrl+Q quits
pub struct QuitCommand;

impl Command for QuitCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('c') | KeyCode::Char('q'))
            && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "Quit"
    }
}
