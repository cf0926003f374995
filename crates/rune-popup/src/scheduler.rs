//! Cancellable single-shot timers on a virtual clock.
//!
//! The scheduler never reads wall time. The owner advances it explicitly,
//! once per frame or from a test, and pops due timers one at a time so each
//! firing can schedule or cancel others before the next is considered.
//!
//! # Usage
//!
//! ```ignore
//! let mut scheduler = Scheduler::new();
//! scheduler.schedule(TimerKind::AutoDismiss, 5000);
//!
//! let target = scheduler.now_ms() + 16;
//! while let Some((id, kind)) = scheduler.next_due(target) {
//!     // react to `kind`
//! }
//! scheduler.advance_to(target);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

/// Unique identifier for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// What a timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Residency expiry; closes the window.
    AutoDismiss,
    /// Next mask fade step during teardown.
    FadeStep,
    /// Coalesces viewport resize bursts in fill mode.
    ResizeDebounce,
    /// Window in which a second title click counts as a double click.
    ClickDebounce,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    kind: TimerKind,
    due_ms: u64,
}

/// Timer table driven by [`Scheduler::advance_to`].
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    timers: HashMap<TimerId, Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule a timer `delay_ms` from now.
    pub fn schedule(&mut self, kind: TimerKind, delay_ms: u64) -> TimerId {
        let id = TimerId::next();
        let due_ms = self.now_ms.saturating_add(delay_ms);
        trace!("schedule {:?} #{} at {}ms", kind, id.0, due_ms);
        self.timers.insert(id, Timer { kind, due_ms });
        id
    }

    /// Cancel every timer of `kind` and schedule a fresh one.
    pub fn reschedule(&mut self, kind: TimerKind, delay_ms: u64) -> TimerId {
        self.cancel_kind(kind);
        self.schedule(kind, delay_ms)
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Cancel every pending timer of `kind`, returning how many were dropped.
    pub fn cancel_kind(&mut self, kind: TimerKind) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, t| t.kind != kind);
        before - self.timers.len()
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.timers.values().any(|t| t.kind == kind)
    }

    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to the timer's due time. Ties fire in scheduling order.
    pub fn next_due(&mut self, until_ms: u64) -> Option<(TimerId, TimerKind)> {
        let (&id, timer) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(id, t)| (t.due_ms, **id))?;
        let timer = *timer;

        self.timers.remove(&id);
        self.now_ms = self.now_ms.max(timer.due_ms);
        trace!("fire {:?} #{} at {}ms", timer.kind, id.0, self.now_ms);
        Some((id, timer.kind))
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, target_ms: u64) {
        self.now_ms = self.now_ms.max(target_ms);
    }
}
