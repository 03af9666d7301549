//! Per-field debounce timer bookkeeping.

use std::collections::HashMap;

use tokio::task::AbortHandle;

/// A scheduled validation that has not fired yet.
#[derive(Debug)]
struct PendingValidation {
    generation: u64,
    handle: AbortHandle,
}

/// Tracks at most one pending validation timer per field.
///
/// Each timer is tagged with a generation. A timer that wakes up after it was
/// replaced or cancelled finds a different generation (or none) and does
/// nothing, even if its task could not be aborted in time.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: HashMap<String, PendingValidation>,
    next_generation: u64,
}

impl Debouncer {
    /// Reserves the generation for the next timer.
    pub const fn next_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Registers a timer for `field`, aborting the one it replaces.
    pub fn insert(&mut self, field: &str, generation: u64, handle: AbortHandle) {
        let replaced = self
            .pending
            .insert(field.to_string(), PendingValidation { generation, handle });
        if let Some(old) = replaced {
            old.handle.abort();
        }
    }

    /// Cancels the pending timer for `field`. Returns whether one existed.
    pub fn cancel(&mut self, field: &str) -> bool {
        let Some(old) = self.pending.remove(field) else {
            return false;
        };
        old.handle.abort();
        true
    }

    /// Cancels every pending timer.
    pub fn cancel_all(&mut self) {
        for (_, pending) in self.pending.drain() {
            pending.handle.abort();
        }
    }

    /// Claims the timer for `field` if `generation` is still the live one.
    pub fn take_if_current(&mut self, field: &str, generation: u64) -> bool {
        let current = self
            .pending
            .get(field)
            .is_some_and(|pending| pending.generation == generation);
        if current {
            self.pending.remove(field);
        }
        current
    }

    /// Returns the number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether `field` has a pending timer.
    pub fn is_pending(&self, field: &str) -> bool {
        self.pending.contains_key(field)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
