//! # Text Editing Commands
//!
//! Commands for text insertion and deletion. Tab and Enter are always
//! claimed here so the terminal never handles them itself.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent, DeleteDirection};
use crate::repl::text::StructuralKey;

/// Insert a printable character
pub struct InsertCharCommand;

impl Command for InsertCharCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Char(ch) => {
                !event
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    && !ch.is_control()
            }
            _ => false,
        }
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if let KeyCode::Char(ch) = event.code {
            Ok(vec![CommandEvent::text_insert(ch)])
        } else {
            Ok(vec![])
        }
    }

    fn name(&self) -> &'static str {
        "InsertChar"
    }
}

/// Tab inserts one indent unit over the selection
pub struct InsertTabCommand;

impl Command for InsertTabCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Tab)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::structural(StructuralKey::Tab)])
    }

    fn name(&self) -> &'static str {
        "InsertTab"
    }
}

/// Enter opens a new line carrying the current indentation
pub struct InsertNewLineCommand;

impl Command for InsertNewLineCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Enter)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::structural(StructuralKey::Enter)])
    }

    fn name(&self) -> &'static str {
        "InsertNewLine"
    }
}

/// Delete character before cursor (Backspace)
pub struct DeleteCharCommand;

impl Command for DeleteCharCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Backspace)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::TextDeleteRequested {
            direction: DeleteDirection::Backward,
        }])
    }

    fn name(&self) -> &'static str {
        "DeleteChar"
    }
}

/// Delete character at cursor (Delete key)
pub struct DeleteCharAtCursorCommand;

impl Command for DeleteCharAtCursorCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Delete)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::TextDeleteRequested {
            direction: DeleteDirection::Forward,
        }])
    }

    fn name(&self) -> &'static str {
        "DeleteCharAtCursor"
    }
}

/// Ctrl+L empties the buffer
pub struct ClearBufferCommand;

impl Command for ClearBufferCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        event.code == KeyCode::Char('l')
            && event.modifiers.contains(KeyModifiers::CONTROL)
            && !context.state.is_blank()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ClearRequested])
    }

    fn name(&self) -> &'static str {
        "ClearBuffer"
    }
}
