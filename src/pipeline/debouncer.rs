use std::time::{Duration, Instant};

/// Trailing-edge debouncer driven by the UI tick
///
/// Every `schedule_at` call restarts the countdown, discarding the previous
/// deadline, so only the last-started countdown can fire. Nothing runs on a
/// timer thread: the event loop asks `fire_at` on each tick.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            deadline: None,
        }
    }

    /// Restart the countdown from `now`
    pub fn schedule_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending countdown; it will never fire
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn has_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn should_execute_at(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    pub fn mark_executed(&mut self) {
        self.deadline = None;
    }

    /// Returns true exactly once per elapsed countdown
    pub fn fire_at(&mut self, now: Instant) -> bool {
        if self.should_execute_at(now) {
            self.mark_executed();
            true
        } else {
            false
        }
    }

    /// Remaining quiet time, used by the event loop to size its poll timeout
    pub fn time_until_fire(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
