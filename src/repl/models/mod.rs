//! # Models Module
//!
//! Plain data the editor session is built from: the text buffer, the
//! per-kind request state and the text shown in the output panes.

pub mod buffer_model;
pub mod display_model;
pub mod request_model;

pub use buffer_model::{current_line, insert_at, leading_whitespace, Buffer, BufferError, Motion};
pub use display_model::DisplayState;
pub use request_model::{RequestKind, RequestState, RequestStatus};
