//! Search debouncer (pure, time-injected).
//!
//! Holds at most one pending value. Every `schedule` replaces the pending
//! value and restarts the quiet period, so only the last value of a burst
//! is ever released. Time is passed in by the caller; nothing here reads a
//! clock.

use std::time::{Duration, Instant};

/// Trailing-edge debouncer.
#[derive(Debug, Clone)]
pub struct Debouncer<V> {
    delay: Duration,
    pending: Option<Pending<V>>,
}

#[derive(Debug, Clone)]
struct Pending<V> {
    value: V,
    deadline: Instant,
}

impl<V> Debouncer<V> {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value and restart the timer from `now`.
    ///
    /// Any earlier pending value is dropped without ever being released.
    pub fn schedule(&mut self, value: V, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Release the pending value if its quiet period has elapsed.
    ///
    /// Returns `None` when nothing is pending or the deadline is still ahead.
    pub fn poll(&mut self, now: Instant) -> Option<V> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// When the pending value becomes releasable.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// The value waiting to be released.
    pub fn pending(&self) -> Option<&V> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// A value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod tests;
