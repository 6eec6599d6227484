//! One-shot delay timer advanced by elapsed-time deltas

use std::time::Duration;

/// Fires once after `delay` has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneShot {
    delay: Duration,
    elapsed: Duration,
    fired: bool,
    cancelled: bool,
}

impl OneShot {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            elapsed: Duration::ZERO,
            fired: false,
            cancelled: false,
        }
    }

    /// Advance by `dt`; returns true exactly once, on the advance that reaches the delay
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.fired || self.cancelled {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.delay {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Fraction of the delay elapsed, clamped to 0.0–1.0
    pub fn progress(&self) -> f64 {
        if self.delay.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.delay.as_secs_f64()).min(1.0)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
