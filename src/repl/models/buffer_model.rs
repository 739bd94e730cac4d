//! # Buffer Model
//!
//! Immutable text buffer with a caret/selection span.
//!
//! Offsets are counted in `char`s (Unicode scalar values), never bytes, so an
//! offset can never land inside a multi-byte character. Every editing
//! operation returns a new [`Buffer`]; the previous value stays untouched and
//! can still be inspected.

use thiserror::Error;

/// Faults raised by buffer operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// The requested span does not satisfy `start <= end <= len`
    #[error("invalid range {start}..{end} for text of length {len}")]
    Range { start: usize, end: usize, len: usize },
}

/// Result of [`insert_at`]: the new text and where the caret lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub text: String,
    pub caret: usize,
}

/// Caret motions understood by [`Buffer::move_caret`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

/// Number of chars in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Convert a char offset into a byte offset, clamping to the end of `text`
fn byte_offset(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map_or(text.len(), |(index, _)| index)
}

/// Replace the `[start, end)` span of `text` with `inserted`.
///
/// The caret ends up right after the inserted text.
///
/// # Errors
///
/// Returns [`BufferError::Range`] when `start <= end <= len(text)` does not hold.
pub fn insert_at(
    text: &str,
    start: usize,
    end: usize,
    inserted: &str,
) -> Result<Insertion, BufferError> {
    let len = char_len(text);
    if start > end || end > len {
        return Err(BufferError::Range { start, end, len });
    }

    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end);

    let mut result = String::with_capacity(text.len() - (end_byte - start_byte) + inserted.len());
    result.push_str(&text[..start_byte]);
    result.push_str(inserted);
    result.push_str(&text[end_byte..]);

    Ok(Insertion {
        text: result,
        caret: start + char_len(inserted),
    })
}

/// The part of the line containing `caret` that lies before the caret.
///
/// Offsets past the end of `text` are treated as the end of `text`.
pub fn current_line(text: &str, caret: usize) -> &str {
    let before = &text[..byte_offset(text, caret)];
    let line_start = before.rfind('\n').map_or(0, |index| index + 1);
    &before[line_start..]
}

/// Longest prefix of `line` made only of spaces and tabs
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|ch: char| ch != ' ' && ch != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Editable text plus the caret/selection span
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Buffer {
    text: String,
    caret_start: usize,
    caret_end: usize,
    /// The moving end of the selection is `caret_start` rather than `caret_end`
    backward: bool,
}

impl Buffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text` with the caret at the end
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = char_len(&text);
        Self {
            text,
            caret_start: len,
            caret_end: len,
            backward: false,
        }
    }

    /// Create a buffer with an explicit selection span
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Range`] when the span is not inside `text`.
    pub fn with_selection(
        text: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Result<Self, BufferError> {
        let text = text.into();
        let len = char_len(&text);
        if start > end || end > len {
            return Err(BufferError::Range { start, end, len });
        }
        Ok(Self {
            text,
            caret_start: start,
            caret_end: end,
            backward: false,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret_start(&self) -> usize {
        self.caret_start
    }

    pub fn caret_end(&self) -> usize {
        self.caret_end
    }

    /// Length of the text in chars
    pub fn len(&self) -> usize {
        char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the text is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn has_selection(&self) -> bool {
        self.caret_start != self.caret_end
    }

    /// The currently selected text (empty when the selection is collapsed)
    pub fn selected_text(&self) -> &str {
        let start = byte_offset(&self.text, self.caret_start);
        let end = byte_offset(&self.text, self.caret_end);
        &self.text[start..end]
    }

    /// The moving end of the selection, where the terminal cursor is drawn
    pub fn head(&self) -> usize {
        if self.backward {
            self.caret_start
        } else {
            self.caret_end
        }
    }

    fn anchor(&self) -> usize {
        if self.backward {
            self.caret_end
        } else {
            self.caret_start
        }
    }

    /// Replace `[start, end)` and collapse the caret after the inserted text
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Range`] for spans outside the text.
    pub fn replace_range(
        &self,
        start: usize,
        end: usize,
        inserted: &str,
    ) -> Result<Self, BufferError> {
        let Insertion { text, caret } = insert_at(&self.text, start, end, inserted)?;
        Ok(Self {
            text,
            caret_start: caret,
            caret_end: caret,
            backward: false,
        })
    }

    /// Replace the selected span (or insert at the caret when it is collapsed)
    ///
    /// # Errors
    ///
    /// Only fails if the caret invariant was broken, which the constructors prevent.
    pub fn replace_selection(&self, inserted: &str) -> Result<Self, BufferError> {
        self.replace_range(self.caret_start, self.caret_end, inserted)
    }

    /// Backspace: remove the selection, or the char before the caret
    ///
    /// # Errors
    ///
    /// See [`Buffer::replace_selection`].
    pub fn delete_backward(&self) -> Result<Self, BufferError> {
        if self.has_selection() {
            return self.replace_selection("");
        }
        match self.caret_start {
            0 => Ok(self.clone()),
            caret => self.replace_range(caret - 1, caret, ""),
        }
    }

    /// Delete key: remove the selection, or the char after the caret
    ///
    /// # Errors
    ///
    /// See [`Buffer::replace_selection`].
    pub fn delete_forward(&self) -> Result<Self, BufferError> {
        if self.has_selection() {
            return self.replace_selection("");
        }
        if self.caret_end >= self.len() {
            return Ok(self.clone());
        }
        self.replace_range(self.caret_end, self.caret_end + 1, "")
    }

    /// Line and column (both zero based, column in chars) of `offset`
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        let before = &self.text[..byte_offset(&self.text, offset)];
        let line = before.matches('\n').count();
        let column = char_len(current_line(&self.text, offset));
        (line, column)
    }

    /// Line and column of the caret head
    pub fn caret_line_column(&self) -> (usize, usize) {
        self.line_column(self.head())
    }

    /// Lines of the text; a trailing newline yields a final empty line
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// Char offset of `(line, column)`, clamping the column to the line length
    fn offset_of(&self, line: usize, column: usize) -> usize {
        let mut offset = 0;
        for (index, text) in self.lines().enumerate() {
            let len = char_len(text);
            if index == line {
                return offset + column.min(len);
            }
            offset += len + 1;
        }
        self.len()
    }

    /// Move the caret head. With `extend` the anchor stays put and the
    /// selection grows or shrinks; otherwise the selection collapses.
    pub fn move_caret(&self, motion: Motion, extend: bool) -> Self {
        if !extend && self.has_selection() {
            match motion {
                Motion::Left => return self.collapsed_at(self.caret_start),
                Motion::Right => return self.collapsed_at(self.caret_end),
                _ => {}
            }
        }

        let head = self.head();
        let (line, column) = self.line_column(head);
        let target = match motion {
            Motion::Left => head.saturating_sub(1),
            Motion::Right => (head + 1).min(self.len()),
            Motion::Up if line == 0 => 0,
            Motion::Up => self.offset_of(line - 1, column),
            Motion::Down if line + 1 >= self.line_count() => self.len(),
            Motion::Down => self.offset_of(line + 1, column),
            Motion::LineStart => head - column,
            Motion::LineEnd => self.offset_of(line, usize::MAX),
        };

        if extend {
            self.selected_between(self.anchor(), target)
        } else {
            self.collapsed_at(target)
        }
    }

    fn collapsed_at(&self, offset: usize) -> Self {
        Self {
            text: self.text.clone(),
            caret_start: offset,
            caret_end: offset,
            backward: false,
        }
    }

    fn selected_between(&self, anchor: usize, head: usize) -> Self {
        Self {
            text: self.text.clone(),
            caret_start: anchor.min(head),
            caret_end: anchor.max(head),
            backward: head < anchor,
        }
    }
}
