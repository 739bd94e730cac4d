//! # Text Policies
//!
//! Pure text transformations applied on top of the buffer model.

pub mod indent;

pub use indent::{StructuralKey, INDENT_UNIT};
