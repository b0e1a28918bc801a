//! Logging and timing sinks the frame scheduler reports into.

use std::cell::{Cell, RefCell};

use crate::foundation::core::FrameIndex;

/// Receiver for frame-loop diagnostics.
///
/// `log` is called at most once per logical frame, only when the frame failed. `frame_ms`
/// is called exactly once per executed frame and never for skipped ticks.
pub trait FrameReporter {
    /// A message about `frame`; `is_error` marks frame failures.
    fn log(&self, _message: &str, _frame: FrameIndex, _is_error: bool) {}

    /// Wall-clock cost of one executed frame.
    fn frame_ms(&self, _cost_ms: f64) {}
}

impl FrameReporter for () {}

/// Forwards reports as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl FrameReporter for TracingReporter {
    fn log(&self, message: &str, frame: FrameIndex, is_error: bool) {
        if is_error {
            tracing::warn!(frame = frame.0, "{message}");
        } else {
            tracing::info!(frame = frame.0, "{message}");
        }
    }

    fn frame_ms(&self, cost_ms: f64) {
        tracing::trace!(cost_ms, "frame");
    }
}

/// Running totals over everything reported so far.
#[derive(Debug, Default)]
pub struct FrameStats {
    frames: Cell<u64>,
    failures: Cell<u64>,
    total_ms: Cell<f64>,
    max_ms: Cell<f64>,
    last_message: RefCell<Option<(FrameIndex, String)>>,
}

impl FrameStats {
    /// Empty totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames timed.
    pub fn frames(&self) -> u64 {
        self.frames.get()
    }

    /// Error reports received.
    pub fn failures(&self) -> u64 {
        self.failures.get()
    }

    /// Summed frame cost.
    pub fn total_ms(&self) -> f64 {
        self.total_ms.get()
    }

    /// Costliest frame so far.
    pub fn max_ms(&self) -> f64 {
        self.max_ms.get()
    }

    /// Mean frame cost, 0 before the first frame.
    pub fn mean_ms(&self) -> f64 {
        match self.frames.get() {
            0 => 0.0,
            n => self.total_ms.get() / n as f64,
        }
    }

    /// Most recent logged message and the frame it belonged to.
    pub fn last_message(&self) -> Option<(FrameIndex, String)> {
        self.last_message.borrow().clone()
    }
}

impl FrameReporter for FrameStats {
    fn log(&self, message: &str, frame: FrameIndex, is_error: bool) {
        if is_error {
            self.failures.set(self.failures.get() + 1);
        }
        *self.last_message.borrow_mut() = Some((frame, message.to_string()));
    }

    fn frame_ms(&self, cost_ms: f64) {
        self.frames.set(self.frames.get() + 1);
        self.total_ms.set(self.total_ms.get() + cost_ms);
        self.max_ms.set(self.max_ms.get().max(cost_ms));
    }
}

/// Fans every report out to two reporters.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: FrameReporter, B: FrameReporter> FrameReporter for Tee<A, B> {
    fn log(&self, message: &str, frame: FrameIndex, is_error: bool) {
        self.0.log(message, frame, is_error);
        self.1.log(message, frame, is_error);
    }

    fn frame_ms(&self, cost_ms: f64) {
        self.0.frame_ms(cost_ms);
        self.1.frame_ms(cost_ms);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/report/sinks.rs"]
mod tests;
