//! # Views Module
//!
//! Terminal output for the editor session.

pub mod terminal_renderer;

pub use terminal_renderer::{Layout, TerminalRenderer};
