use std::time::Duration;

/// Throttles paint ticks down to a target frame interval.
///
/// Timestamps are paint times measured from the host's time origin. The last frame time
/// starts at zero, so the first tick after a reset is due as soon as one interval has
/// passed since that origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePacer {
    interval: Duration,
    last_frame: Duration,
}

impl FramePacer {
    /// A pacer whose last frame sits at the time origin.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_frame: Duration::ZERO,
        }
    }

    /// Minimum time between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Paint time of the last executed frame.
    pub fn last_frame(&self) -> Duration {
        self.last_frame
    }

    /// Move the last frame time back to the origin.
    pub fn reset(&mut self) {
        self.last_frame = Duration::ZERO;
    }

    /// Whether a tick at `now` should run a frame.
    pub fn due(&self, now: Duration) -> bool {
        now.saturating_sub(self.last_frame) >= self.interval
    }

    /// Record that the frame triggered at `now` ran.
    pub fn mark(&mut self, now: Duration) {
        self.last_frame = now;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/pacer.rs"]
mod tests;
