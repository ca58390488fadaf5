//! Time-based eased tween standing in for the host's native smooth scroll.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    started_at: Duration,
    duration: Duration,
}

impl Tween {
    pub fn new(from: f64, to: f64, started_at: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration: duration.max(Duration::from_millis(1)),
        }
    }

    pub fn is_done(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.duration
    }

    /// Offset at `now`, ease-in-out (quad).
    pub fn sample(&self, now: Duration) -> f64 {
        let elapsed = now.saturating_sub(self.started_at);
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        let eased = if t < 0.5 {
            2.0 * t * t
        } else {
            1.0 - 2.0 * (1.0 - t) * (1.0 - t)
        };
        self.from + (self.to - self.from) * eased
    }

    /// Move both ends by `delta` so an in-flight animation follows a warp.
    pub fn shift(&mut self, delta: f64) {
        self.from += delta;
        self.to += delta;
    }
}
