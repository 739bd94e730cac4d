//! # Command Pattern Implementation
//!
//! Commands translate key events into [`CommandEvent`]s. They are stateless
//! and never touch the session directly: the registry asks each command in
//! turn whether the key is relevant, executes the first match and hands the
//! resulting events to the controller.

use anyhow::Result;
use crossterm::event::KeyEvent;

pub mod app;
pub mod context;
pub mod editing;
pub mod events;
pub mod movement;

pub use app::{QuitCommand, RunDebugCommand};
pub use context::{CommandContext, SessionSnapshot};
pub use editing::{
    ClearBufferCommand, DeleteCharAtCursorCommand, DeleteCharCommand, InsertCharCommand,
    InsertNewLineCommand, InsertTabCommand,
};
pub use events::{CommandEvent, DeleteDirection};
pub use movement::MoveCaretCommand;

/// A key binding
pub trait Command: Send + Sync {
    /// Whether this command handles `event` in the current context
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events for `event`
    ///
    /// # Errors
    ///
    /// Implementations may fail; the registry propagates the error.
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Type alias for command collection to reduce complexity
pub type CommandCollection = Vec<Box<dyn Command>>;

/// Registry that holds all available commands
pub struct CommandRegistry {
    commands: CommandCollection,
}

impl CommandRegistry {
    /// Create new command registry with default commands
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };

        registry.register_default_commands();
        registry
    }

    /// Register all default commands. Order matters: control chords must be
    /// claimed before plain character insertion sees them.
    fn register_default_commands(&mut self) {
        // Application commands
        self.add_command(Box::new(QuitCommand));
        self.add_command(Box::new(RunDebugCommand));
        self.add_command(Box::new(ClearBufferCommand));

        // Text editing commands
        self.add_command(Box::new(InsertTabCommand));
        self.add_command(Box::new(InsertNewLineCommand));
        self.add_command(Box::new(DeleteCharCommand));
        self.add_command(Box::new(DeleteCharAtCursorCommand));
        self.add_command(Box::new(InsertCharCommand));

        // Movement commands
        self.add_command(Box::new(MoveCaretCommand));
    }

    /// Add a command to the registry
    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    /// Process a key event through the first relevant command
    ///
    /// # Errors
    ///
    /// Propagates the error of the command that handled the event.
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!("Found relevant command: {} for key {:?}", command.name(), event);
                return command.execute(event, context);
            }
        }
        tracing::debug!("No relevant command found for key {:?}", event);
        Ok(vec![])
    }

    /// Get all commands (for testing/debugging)
    pub fn commands(&self) -> &CommandCollection {
        &self.commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
