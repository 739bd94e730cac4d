//! # Indentation Engine
//!
//! Stateless policy for the two structural keys, Tab and Enter. Both are
//! always intercepted: the caller never falls back to the terminal's own
//! handling of these keys.
//!
//! Each function takes the current [`Buffer`] and returns the buffer that
//! should be committed in its place. The selection span `[caret_start,
//! caret_end)` is always the replacement span, so a non-empty selection is
//! overwritten rather than pushed aside.

use crate::repl::models::{current_line, leading_whitespace, Buffer, BufferError};

/// Whitespace inserted per indentation level
pub const INDENT_UNIT: &str = "    ";

/// Trailing character that opens a block and earns one extra level
pub const BLOCK_OPENER: char = ':';

/// Keys the engine rewrites before they reach the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralKey {
    Tab,
    Enter,
}

/// Rewrite a structural key press into the buffer that results from it
///
/// # Errors
///
/// Propagates [`BufferError`] from the underlying replacement.
pub fn apply(key: StructuralKey, buffer: &Buffer) -> Result<Buffer, BufferError> {
    match key {
        StructuralKey::Tab => indent(buffer),
        StructuralKey::Enter => newline(buffer),
    }
}

/// Tab: the selection becomes one indent unit
///
/// # Errors
///
/// Propagates [`BufferError`] from the underlying replacement.
pub fn indent(buffer: &Buffer) -> Result<Buffer, BufferError> {
    buffer.replace_selection(INDENT_UNIT)
}

/// Enter: the selection becomes a newline followed by the computed indent
///
/// # Errors
///
/// Propagates [`BufferError`] from the underlying replacement.
pub fn newline(buffer: &Buffer) -> Result<Buffer, BufferError> {
    let indent = newline_indent(buffer.text(), buffer.caret_start());
    tracing::trace!(indent_len = indent.len(), "newline indent computed");
    buffer.replace_selection(&format!("\n{indent}"))
}

/// Indent for a line opened after `caret`: the current line's leading
/// whitespace, plus one unit if the line ends with a block opener
pub fn newline_indent(text: &str, caret: usize) -> String {
    let line = current_line(text, caret);
    let mut indent = leading_whitespace(line).to_string();
    if line.trim().ends_with(BLOCK_OPENER) {
        indent.push_str(INDENT_UNIT);
    }
    indent
}
