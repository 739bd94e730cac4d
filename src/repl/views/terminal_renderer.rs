//! # Terminal Renderer
//!
//! Draws the session with crossterm:
//!
//! ```text
//! ┌───────────────────────┬──────────────────┐
//! │ editor                │ Reasoning        │
//! │                       ├──────────────────┤
//! │                       │ Debug Output     │
//! ├───────────────────────┴──────────────────┤
//! │ status line                              │
//! └──────────────────────────────────────────┘
//! ```
//!
//! The renderer only reads the session; it never mutates it.

use crate::repl::models::RequestStatus;
use crate::repl::services::AnalysisClient;
use crate::repl::view_models::EditorSession;
use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{DisableBracketedPaste, EnableBracketedPaste},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::Write;
use unicode_width::UnicodeWidthChar;

const REASONING_TITLE: &str = "Reasoning (auto updates)";
const DEBUG_TITLE: &str = "Debug Output";
const KEY_HELP: &str = "F5/^R debug  ^L clear  ^Q quit";

/// Screen regions for a terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
    /// Columns available to the editor, left of the separator
    pub editor_width: u16,
    /// Rows available to the editor and the output panes
    pub content_height: u16,
    /// First column of the output panes
    pub output_x: u16,
    /// Row of the debug pane title
    pub debug_y: u16,
}

impl Layout {
    pub fn new(width: u16, height: u16) -> Self {
        let editor_width = width.saturating_mul(3) / 5;
        let content_height = height.saturating_sub(1);
        Self {
            width,
            height,
            editor_width,
            content_height,
            output_x: (editor_width + 1).min(width),
            debug_y: content_height / 2,
        }
    }

    pub fn output_width(&self) -> u16 {
        self.width.saturating_sub(self.output_x)
    }
}

/// Cut `text` to at most `width` terminal columns
fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut result = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        result.push(ch);
    }
    result
}

/// Display width of the first `chars` characters of `text`
fn prefix_width(text: &str, chars: usize) -> usize {
    text.chars()
        .take(chars)
        .map(|ch| ch.width().unwrap_or(0))
        .sum()
}

/// Break `text` into rows no wider than `width` columns
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    if width == 0 {
        return rows;
    }
    for line in text.lines() {
        let mut row = String::new();
        let mut used = 0;
        for ch in line.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push(ch);
            used += ch_width;
        }
        rows.push(row);
    }
    rows
}

/// crossterm renderer over any writer
pub struct TerminalRenderer<W: Write> {
    writer: W,
    layout: Layout,
    /// First buffer line shown in the editor
    scroll_offset: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(writer: W, size: (u16, u16)) -> Self {
        Self {
            writer,
            layout: Layout::new(size.0, size.1),
            scroll_offset: 0,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.layout = Layout::new(width, height);
    }

    /// Enter raw mode and the alternate screen. Bracketed paste is enabled so
    /// pasted text arrives as one event instead of key presses.
    ///
    /// # Errors
    ///
    /// Fails when the terminal cannot be switched.
    pub fn initialize(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        queue!(
            self.writer,
            EnterAlternateScreen,
            EnableBracketedPaste,
            Clear(ClearType::All)
        )?;
        self.writer.flush()?;
        Ok(())
    }

    /// Restore the terminal
    ///
    /// # Errors
    ///
    /// Fails when the terminal cannot be restored.
    pub fn cleanup(&mut self) -> Result<()> {
        queue!(self.writer, DisableBracketedPaste, Show, LeaveAlternateScreen)?;
        self.writer.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Redraw everything
    ///
    /// # Errors
    ///
    /// Fails when writing to the terminal fails.
    pub fn render<C: AnalysisClient>(&mut self, session: &EditorSession<C>) -> Result<()> {
        queue!(self.writer, Hide, Clear(ClearType::All))?;
        self.render_outputs(session)?;
        self.render_status_bar(session)?;
        self.render_editor(session)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Keep the caret line inside the visible editor rows
    fn adjust_scroll(&mut self, caret_line: usize) {
        let rows = usize::from(self.layout.content_height).max(1);
        if caret_line < self.scroll_offset {
            self.scroll_offset = caret_line;
        } else if caret_line >= self.scroll_offset + rows {
            self.scroll_offset = caret_line + 1 - rows;
        }
    }

    fn render_editor<C: AnalysisClient>(&mut self, session: &EditorSession<C>) -> Result<()> {
        let buffer = session.buffer();
        let (caret_line, caret_column) = buffer.caret_line_column();
        self.adjust_scroll(caret_line);

        let width = usize::from(self.layout.editor_width);
        let rows = usize::from(self.layout.content_height);

        for (row, line) in buffer.lines().skip(self.scroll_offset).take(rows).enumerate() {
            queue!(
                self.writer,
                MoveTo(0, row as u16),
                Print(truncate_to_width(line, width))
            )?;
        }

        for row in 0..self.layout.content_height {
            queue!(self.writer, MoveTo(self.layout.editor_width, row), Print("│"))?;
        }

        // Terminal cursor goes at the caret head
        let line_text = buffer.lines().nth(caret_line).unwrap_or_default();
        let x = prefix_width(line_text, caret_column).min(width.saturating_sub(1));
        let y = caret_line - self.scroll_offset;
        queue!(self.writer, MoveTo(x as u16, y as u16), Show)?;
        Ok(())
    }

    fn render_outputs<C: AnalysisClient>(&mut self, session: &EditorSession<C>) -> Result<()> {
        let display = session.display();
        let debug_title = match session.debug_status() {
            RequestStatus::InFlight => format!("{DEBUG_TITLE} (running...)"),
            RequestStatus::Failed => format!("{DEBUG_TITLE} (failed)"),
            RequestStatus::Idle | RequestStatus::Succeeded => DEBUG_TITLE.to_string(),
        };

        let debug_y = self.layout.debug_y;
        let bottom = self.layout.content_height;
        self.render_output_pane(REASONING_TITLE, display.reasoning_text(), 0, debug_y)?;
        self.render_output_pane(&debug_title, display.debug_text(), debug_y, bottom)?;
        Ok(())
    }

    /// Title row at `top`, then as much of `body` as fits above `bottom`
    fn render_output_pane(&mut self, title: &str, body: &str, top: u16, bottom: u16) -> Result<()> {
        if top >= bottom {
            return Ok(());
        }
        let x = self.layout.output_x;
        let width = usize::from(self.layout.output_width());

        queue!(
            self.writer,
            MoveTo(x, top),
            SetAttribute(Attribute::Bold),
            Print(truncate_to_width(title, width)),
            SetAttribute(Attribute::Reset)
        )?;

        let rows = wrap_lines(body, width);
        for (offset, row) in rows.iter().take(usize::from(bottom - top - 1)).enumerate() {
            queue!(self.writer, MoveTo(x, top + 1 + offset as u16), Print(row))?;
        }
        Ok(())
    }

    fn render_status_bar<C: AnalysisClient>(&mut self, session: &EditorSession<C>) -> Result<()> {
        let (line, column) = session.buffer().caret_line_column();
        let mut status = format!("Ln {}, Col {}", line + 1, column + 1);
        if session.buffer().has_selection() {
            let selected = session.buffer().caret_end() - session.buffer().caret_start();
            status.push_str(&format!(" ({selected} selected)"));
        }
        if session.is_reasoning_pending() {
            status.push_str("  reasoning queued");
        } else if session.reasoning_status() == RequestStatus::InFlight {
            status.push_str("  reasoning running");
        }
        if session.is_debug_busy() {
            status.push_str("  debug running");
        }
        status.push_str("  ");
        status.push_str(KEY_HELP);

        queue!(
            self.writer,
            MoveTo(0, self.layout.height.saturating_sub(1)),
            SetAttribute(Attribute::Reverse),
            Print(truncate_to_width(&status, usize::from(self.layout.width))),
            SetAttribute(Attribute::Reset)
        )?;
        Ok(())
    }
}
