//! # Application Controller
//!
//! Owns the event loop. Each iteration:
//!
//! 1. waits for input, at most until the next debounce deadline
//! 2. turns key events into [`CommandEvent`]s via the registry and applies
//!    them to the [`EditorSession`]
//! 3. fires the debounce trigger when due
//! 4. applies any completions the request tasks have reported
//! 5. redraws if anything changed
//!
//! Network work never happens on this loop; it runs in tasks spawned by the
//! orchestrator.

use crate::repl::{
    commands::{CommandContext, CommandEvent, CommandRegistry, DeleteDirection, SessionSnapshot},
    io::EventStream,
    services::AnalysisClient,
    view_models::EditorSession,
    views::TerminalRenderer,
};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::io::Write;
use std::time::{Duration, Instant};

/// Upper bound on how long one input poll may block
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Current time on tokio's clock, so paused-time tests drive the debounce too
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

pub struct AppController<ES: EventStream, W: Write, C: AnalysisClient> {
    session: EditorSession<C>,
    renderer: TerminalRenderer<W>,
    registry: CommandRegistry,
    event_stream: ES,
    should_quit: bool,
    needs_render: bool,
}

impl<ES: EventStream, W: Write, C: AnalysisClient> AppController<ES, W, C> {
    pub fn new(session: EditorSession<C>, event_stream: ES, writer: W, size: (u16, u16)) -> Self {
        Self {
            session,
            renderer: TerminalRenderer::with_writer(writer, size),
            registry: CommandRegistry::new(),
            event_stream,
            should_quit: false,
            needs_render: true,
        }
    }

    pub fn session(&self) -> &EditorSession<C> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession<C> {
        &mut self.session
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Take over the terminal, run until quit, then restore it
    ///
    /// # Errors
    ///
    /// Fails on terminal I/O errors. The terminal is restored either way.
    pub async fn run(&mut self) -> Result<()> {
        self.renderer.initialize()?;
        let result = self.run_until_quit().await;
        let cleanup = self.renderer.cleanup();
        result.and(cleanup)
    }

    /// Event loop without terminal mode switching
    ///
    /// # Errors
    ///
    /// Fails on I/O errors from the event stream or the renderer.
    pub async fn run_until_quit(&mut self) -> Result<()> {
        while !self.should_quit {
            self.step().await?;
        }
        tracing::info!("editor loop finished");
        Ok(())
    }

    /// One loop iteration
    ///
    /// # Errors
    ///
    /// Fails on I/O errors from the event stream or the renderer.
    pub async fn step(&mut self) -> Result<()> {
        let timeout = self.poll_timeout(now());
        if self.event_stream.poll(timeout)? {
            let event = self.event_stream.read()?;
            self.handle_event(event)?;
        } else {
            // Let request tasks make progress on single-threaded runtimes
            tokio::task::yield_now().await;
        }

        let now = now();
        if self.session.tick(now) {
            self.needs_render = true;
        }
        if self.session.drain_completions() {
            self.needs_render = true;
        }

        if self.needs_render && !self.should_quit {
            self.renderer.render(&self.session)?;
            self.needs_render = false;
        }
        Ok(())
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        match self.session.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(POLL_INTERVAL),
            None => POLL_INTERVAL,
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.process_key_event(key),
            Event::Paste(text) => self.process_paste(&text),
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
                self.renderer.update_size(width, height);
                self.needs_render = true;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Route one key through the registry and apply what it produces
    ///
    /// # Errors
    ///
    /// Propagates command and buffer errors.
    pub fn process_key_event(&mut self, key: KeyEvent) -> Result<()> {
        tracing::trace!(?key, "key event");
        let context = CommandContext::new(SessionSnapshot::from_session(&self.session));
        let events = self.registry.process_event(key, &context)?;
        if events.is_empty() {
            return Ok(());
        }

        let now = now();
        for event in events {
            self.apply_command_event(event, now)?;
        }
        self.needs_render = true;
        Ok(())
    }

    /// Insert pasted text over the selection as-is, bypassing Tab/Enter
    /// handling
    ///
    /// # Errors
    ///
    /// Propagates buffer errors.
    pub fn process_paste(&mut self, text: &str) -> Result<()> {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        tracing::debug!(len = text.len(), "paste");
        self.apply_command_event(CommandEvent::text_insert(text), now())?;
        self.needs_render = true;
        Ok(())
    }

    /// Apply a command event to the session
    ///
    /// # Errors
    ///
    /// Propagates [`crate::repl::models::BufferError`].
    pub fn apply_command_event(&mut self, event: CommandEvent, now: Instant) -> Result<()> {
        tracing::debug!(?event, "applying command event");
        match event {
            CommandEvent::TextInsertRequested { text } => self.session.insert_text(&text, now)?,
            CommandEvent::StructuralKeyRequested { key } => {
                self.session.press_structural(key, now)?
            }
            CommandEvent::TextDeleteRequested { direction } => match direction {
                DeleteDirection::Backward => self.session.delete_backward(now)?,
                DeleteDirection::Forward => self.session.delete_forward(now)?,
            },
            CommandEvent::CaretMoveRequested { motion, extend } => {
                self.session.move_caret(motion, extend, now)
            }
            CommandEvent::ClearRequested => self.session.clear(now),
            CommandEvent::DebugRequested => {
                if !self.session.run_debug() {
                    tracing::debug!("debug request skipped");
                }
            }
            CommandEvent::QuitRequested => self.should_quit = true,
        }
        Ok(())
    }
}
