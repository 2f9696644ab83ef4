//! Poll-driven one-shot timers.
//!
//! Everything here runs on the host's single event thread: callers schedule
//! deadlines, then drain due timers once per frame with [`TimerQueue::fire_due`].
//! There are no background threads and nothing blocks.

use std::time::{Duration, Instant};

/// Handle to one scheduled deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A queue of one-shot deadlines.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: Vec<(TimerHandle, Instant)>,
}

impl TimerQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a deadline `delay` from `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push((handle, now + delay));
        handle
    }

    /// Invalidate a pending deadline. Unknown or already-fired handles are
    /// ignored.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }

    /// Remove and return every handle whose deadline has passed, earliest
    /// deadline first. Each handle fires at most once.
    pub fn fire_due(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut due: Vec<(TimerHandle, Instant)> = Vec::new();
        self.pending.retain(|entry| {
            if entry.1 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(_, deadline)| *deadline);
        due.into_iter().map(|(handle, _)| handle).collect()
    }

    /// Number of deadlines still pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
