//! Simulated display refresh: fires the pending paint callback once per refresh.

use std::time::{Duration, Instant};

use crate::schedule::paint::{PaintQueue, PaintRequest};
use crate::schedule::scheduler::TickOutcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Clock {
    /// Sleep until each refresh deadline.
    Realtime { origin: Instant },
    /// Jump straight to each refresh.
    Virtual,
}

/// Counts from one [`RefreshDriver::run_frames`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveSummary {
    /// Refreshes that fired a paint callback.
    pub refreshes: u64,
    /// Paints the loop ignored (idle or stale request).
    pub ignored: u64,
    /// Paints throttled by the frame interval.
    pub skipped: u64,
    /// Frames whose colors were applied.
    pub rendered: u64,
    /// Frames that ran and failed.
    pub failed: u64,
    /// The run ended because nothing was registered for the next paint.
    pub stopped: bool,
    /// Paint time of the last refresh.
    pub elapsed: Duration,
}

impl DriveSummary {
    /// Logical frames that ran, successfully or not.
    pub fn executed(&self) -> u64 {
        self.rendered + self.failed
    }

    fn record(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Ignored => self.ignored += 1,
            TickOutcome::Skipped => self.skipped += 1,
            TickOutcome::Rendered(_) => self.rendered += 1,
            TickOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Drives paint callbacks at a fixed refresh rate.
///
/// Paint times are measured from the driver's origin and keep increasing across calls.
#[derive(Debug)]
pub struct RefreshDriver {
    interval: Duration,
    clock: Clock,
    now: Duration,
}

impl RefreshDriver {
    /// A driver that sleeps between refreshes.
    pub fn realtime(interval: Duration) -> Self {
        Self {
            interval,
            clock: Clock::Realtime {
                origin: Instant::now(),
            },
            now: Duration::ZERO,
        }
    }

    /// A driver that advances a virtual clock without sleeping.
    pub fn virtual_time(interval: Duration) -> Self {
        Self {
            interval,
            clock: Clock::Virtual,
            now: Duration::ZERO,
        }
    }

    /// Time between display refreshes.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Paint time of the latest refresh.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire refreshes until `frames` logical frames executed, nothing is registered, or
    /// `max_refreshes` refreshes fired.
    pub fn run_frames<F>(
        &mut self,
        queue: &PaintQueue,
        frames: u64,
        max_refreshes: u64,
        mut on_paint: F,
    ) -> DriveSummary
    where
        F: FnMut(PaintRequest, Duration) -> TickOutcome,
    {
        let mut summary = DriveSummary::default();
        while summary.executed() < frames && summary.refreshes < max_refreshes {
            if queue.pending().is_none() {
                summary.stopped = true;
                break;
            }
            self.wait_for_refresh();
            let Some(request) = queue.take() else {
                summary.stopped = true;
                break;
            };
            summary.refreshes += 1;
            summary.record(on_paint(request, self.now));
        }
        summary.elapsed = self.now;
        tracing::debug!(?summary, "refresh run finished");
        summary
    }

    fn wait_for_refresh(&mut self) {
        self.now += self.interval;
        if let Clock::Realtime { origin } = self.clock {
            let deadline = origin + self.now;
            std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/refresh.rs"]
mod tests;
