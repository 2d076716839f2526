//! Fixed-rate tick deadlines
//!
//! Deadlines advance from the previous deadline, not from "now", so a steady host
//! never drifts. A tick that overruns by more than a whole interval re-anchors on
//! the current time instead of firing a burst of catch-up ticks.

/// Target tick period: 60 ticks per second
pub const TICK_INTERVAL_MS: f64 = 1000.0 / 60.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    interval_ms: f64,
    next_ms: f64,
}

impl FrameClock {
    /// First tick is due immediately at `now_ms`
    pub fn new(now_ms: f64) -> Self {
        Self::with_interval(now_ms, TICK_INTERVAL_MS)
    }

    pub fn with_interval(now_ms: f64, interval_ms: f64) -> Self {
        let interval_ms = if interval_ms.is_finite() && interval_ms > 0.0 {
            interval_ms
        } else {
            TICK_INTERVAL_MS
        };
        Self { interval_ms, next_ms: now_ms }
    }

    #[inline]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    #[inline]
    pub fn next_deadline_ms(&self) -> f64 {
        self.next_ms
    }

    #[inline]
    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms >= self.next_ms
    }

    /// Time left until the next tick (0 when due)
    #[inline]
    pub fn delay_ms(&self, now_ms: f64) -> f64 {
        (self.next_ms - now_ms).max(0.0)
    }

    /// Mark a tick as taken at `now_ms` and schedule the next one
    pub fn advance(&mut self, now_ms: f64) {
        self.next_ms += self.interval_ms;
        if now_ms - self.next_ms > self.interval_ms {
            self.next_ms = now_ms + self.interval_ms;
        }
    }
}
