//! # Debounce Scheduler
//!
//! Single-slot deferred trigger keyed on "buffer changed".
//!
//! Every change replaces the pending trigger, so a burst of edits spaced
//! closer than the quiescence interval produces exactly one firing, carrying
//! the text of the last edit. The scheduler owns no timer of its own: the
//! caller supplies the current instant and asks for [`Debouncer::deadline`]
//! to know how long it may sleep. That keeps it deterministic under test and
//! independent of the runtime's timer facility.

use std::time::{Duration, Instant};

/// Default quiet period before an auto-trigger fires
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(800);

/// The single outstanding deferred action
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTrigger {
    deadline: Instant,
    snapshot: String,
}

/// What a change notification did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// A trigger is now pending and will fire at `deadline`
    Scheduled { deadline: Instant },
    /// The snapshot was blank: nothing is pending and dependent output
    /// should be cleared right away
    Cleared,
}

#[derive(Debug)]
pub struct Debouncer {
    quiescence: Duration,
    pending: Option<PendingTrigger>,
}

impl Debouncer {
    pub fn new(quiescence: Duration) -> Self {
        Self {
            quiescence,
            pending: None,
        }
    }

    /// Record a buffer change, superseding any pending trigger
    pub fn notify_changed(&mut self, snapshot: &str, now: Instant) -> ChangeOutcome {
        if let Some(previous) = self.pending.take() {
            tracing::trace!(
                remaining_ms = previous.deadline.saturating_duration_since(now).as_millis() as u64,
                "superseding pending trigger"
            );
        }

        if snapshot.trim().is_empty() {
            tracing::debug!("blank buffer, auto trigger suppressed");
            return ChangeOutcome::Cleared;
        }

        let deadline = now + self.quiescence;
        self.pending = Some(PendingTrigger {
            deadline,
            snapshot: snapshot.to_string(),
        });
        ChangeOutcome::Scheduled { deadline }
    }

    /// Fire the pending trigger if its deadline has passed.
    ///
    /// Returns the snapshot at most once per trigger.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|trigger| now >= trigger.deadline);
        if !due {
            return None;
        }

        let trigger = self.pending.take()?;
        tracing::debug!(len = trigger.snapshot.len(), "debounce trigger fired");
        Some(trigger.snapshot)
    }

    /// When the pending trigger is due, if there is one
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|trigger| trigger.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIESCENCE)
    }
}
