// Debounced hide timer for the player's control surface
use std::time::{Duration, Instant};

/// Default delay before controls hide during playback
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(2500);

/// Single-owner, cancellable countdown
///
/// At most one deadline is pending at a time: arming again replaces it, so two
/// countdowns can never race each other.
#[derive(Debug, Clone)]
pub struct HideTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl HideTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Takes effect the next time the timer is armed
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Start (or restart) the countdown from `now`
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true exactly once when the deadline has passed, disarming the timer
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the deadline, for scheduling a wake-up
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl Default for HideTimer {
    fn default() -> Self {
        Self::new(DEFAULT_HIDE_DELAY)
    }
}
