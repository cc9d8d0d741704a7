//! Debounce scheduling for field validation.
//!
//! Each edit records a per-field deadline; editing the same field again
//! inside the window replaces the deadline, so only the final value of a
//! burst of keystrokes is validated. The request-id guard in the engine
//! remains the correctness backstop regardless of how the host loop
//! drives this scheduler.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::store::FieldKey;

/// Per-field debounce deadline table.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: BTreeMap<FieldKey, Instant>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet window.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: BTreeMap::new(),
        }
    }

    /// Schedules (or reschedules) validation of a field one quiet
    /// window from now.
    pub fn touch(&mut self, key: FieldKey) {
        self.pending.insert(key, Instant::now() + self.delay);
    }

    /// Drops a pending validation, if any.
    pub fn cancel(&mut self, key: FieldKey) {
        self.pending.remove(&key);
    }

    /// Whether a field has a validation waiting to fire.
    #[must_use]
    pub fn is_pending(&self, key: FieldKey) -> bool {
        self.pending.contains_key(&key)
    }

    /// Drains and returns every field whose quiet window has elapsed.
    pub fn due(&mut self) -> Vec<FieldKey> {
        let now = Instant::now();
        let ready: Vec<FieldKey> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| *key)
            .collect();
        for key in &ready {
            self.pending.remove(key);
        }
        ready
    }

    /// Earliest pending deadline, for the host event loop's sleep.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }
}
