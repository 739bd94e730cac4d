//! # ViewModel Module
//!
//! The editor session sits between the commands that drive it and the views
//! that render it.

mod editor_session;

pub use editor_session::EditorSession;
