//! # Editor Interaction Engine
//!
//! MVVM layout:
//!
//! - **models**: buffer and caret, request and display state
//! - **text**: indentation rules for Tab and Enter
//! - **services**: debounce scheduler, analysis client, request orchestrator
//! - **view_models**: [`EditorSession`], the single owner of live state
//! - **commands**: key bindings that produce [`CommandEvent`]s
//! - **controllers**: the event loop
//! - **views** / **io**: terminal output and input

pub mod commands;
pub mod controllers;
pub mod io;
pub mod models;
pub mod services;
pub mod testing;
pub mod text;
pub mod view_models;
pub mod views;

pub use commands::{Command, CommandContext, CommandEvent, CommandRegistry, SessionSnapshot};
pub use controllers::AppController;
pub use io::{EventStream, MockEventStream, TerminalEventStream};
pub use models::{Buffer, BufferError, DisplayState, Motion, RequestKind, RequestState};
pub use services::{AnalysisClient, AnalysisError, HttpAnalysisClient, RequestOrchestrator};
pub use text::StructuralKey;
pub use view_models::EditorSession;
pub use views::TerminalRenderer;
