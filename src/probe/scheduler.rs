//! Drift-correcting send scheduler
//!
//! Computes the next send deadline on a fixed interval. When the loop falls
//! more than one full interval behind, the schedule is re-anchored to
//! `now + interval` instead of firing repeatedly to catch up: the probe
//! keeps a bounded cadence rather than an exact send count.

use std::time::{Duration, Instant};

/// Fixed-interval scheduler with bounded catch-up
#[derive(Debug)]
pub struct CadenceScheduler {
    interval: Duration,
    next_send: Instant,
}

impl CadenceScheduler {
    /// Create a scheduler whose first tick is due immediately
    pub fn new(interval: Duration) -> Self {
        Self::anchored_at(interval, Instant::now())
    }

    /// Create a scheduler with an explicit initial deadline
    pub fn anchored_at(interval: Duration, now: Instant) -> Self {
        CadenceScheduler {
            interval,
            next_send: now,
        }
    }

    /// Check whether a send is due at `now`, advancing the deadline if so
    ///
    /// Advances by exactly one interval per due tick. Slips shorter than one
    /// interval keep the original phase; once execution falls more than one
    /// interval behind, the deadline is re-anchored to `now + interval` so
    /// at most one extra tick fires back to back.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_send {
            return false;
        }

        self.next_send += self.interval;

        let behind = now.saturating_duration_since(self.next_send);
        if behind > self.interval {
            log::warn!(
                "send cycle overrun: {:?} behind (interval {:?}), re-anchoring",
                behind,
                self.interval
            );
            self.next_send = now + self.interval;
        }

        true
    }

    /// Configured send interval
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
