//! Frame scheduler: the self-rescheduling paint loop that turns generator steps into node
//! colors.
//!
//! While running, every paint callback re-registers for the next paint. Callbacks that
//! arrive before the target interval has elapsed are skipped; the others run one logical
//! frame: advance the bridge, decode the packed buffer, write colors to the registry and
//! report the frame's cost. A failing frame is logged once and the loop carries on.

use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::bridge::session::GeneratorBridge;
use crate::color::packed::decode_frame;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TreevisError, TreevisResult};
use crate::pattern::runtime::PatternRuntime;
use crate::registry::nodes::NodeRegistry;
use crate::report::sinks::FrameReporter;
use crate::schedule::pacer::FramePacer;
use crate::schedule::paint::{PaintRequest, PaintSignal};

/// Timing of one executed logical frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameMetrics {
    /// Index of the frame.
    pub frame: FrameIndex,
    /// Wall-clock time spent advancing, decoding and applying.
    pub cost: Duration,
}

impl FrameMetrics {
    /// Wall-clock cost in milliseconds.
    pub fn cost_ms(&self) -> f64 {
        self.cost.as_secs_f64() * 1000.0
    }
}

/// What a paint callback did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The scheduler is idle or the callback was stale.
    Ignored,
    /// Too soon after the previous frame.
    Skipped,
    /// A frame ran and its colors were applied.
    Rendered(FrameMetrics),
    /// A frame ran and failed; the failure was logged.
    Failed(FrameMetrics),
}

impl TickOutcome {
    /// Whether a logical frame executed, successfully or not.
    pub fn executed(&self) -> bool {
        matches!(self, Self::Rendered(_) | Self::Failed(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { pending: Option<PaintRequest> },
}

/// Drives one generator bridge into one node registry.
pub struct FrameScheduler<R: PatternRuntime, P: PaintSignal> {
    bridge: GeneratorBridge<R>,
    registry: Rc<NodeRegistry>,
    reporter: Rc<dyn FrameReporter>,
    paint: P,
    pacer: FramePacer,
    phase: Phase,
    frame: FrameIndex,
}

impl<R: PatternRuntime, P: PaintSignal> FrameScheduler<R, P> {
    /// An idle scheduler pacing frames at least `interval` apart.
    pub fn new(
        bridge: GeneratorBridge<R>,
        registry: Rc<NodeRegistry>,
        reporter: Rc<dyn FrameReporter>,
        paint: P,
        interval: Duration,
    ) -> Self {
        Self {
            bridge,
            registry,
            reporter,
            paint,
            pacer: FramePacer::new(interval),
            phase: Phase::Idle,
            frame: FrameIndex::default(),
        }
    }

    /// Whether the loop is registered for paints.
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Index the next executed frame will carry.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Target time between logical frames.
    pub fn interval(&self) -> Duration {
        self.pacer.interval()
    }

    /// The bridge being driven.
    pub fn bridge(&self) -> &GeneratorBridge<R> {
        &self.bridge
    }

    /// The bridge being driven, mutably; used to drain its runtime's console.
    pub fn bridge_mut(&mut self) -> &mut GeneratorBridge<R> {
        &mut self.bridge
    }

    /// Nodes the frames are applied to.
    pub fn registry(&self) -> &Rc<NodeRegistry> {
        &self.registry
    }

    /// Enter `Running`: reset the frame counter and register for the next paint.
    /// No-op when already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.frame = FrameIndex::default();
        self.pacer.reset();
        let pending = self.paint.request();
        self.phase = Phase::Running {
            pending: Some(pending),
        };
        tracing::debug!(interval_ms = self.pacer.interval().as_secs_f64() * 1000.0, "frame loop started");
    }

    /// Leave `Running` and cancel the pending paint registration.
    pub fn stop(&mut self) {
        if let Phase::Running { pending } = self.phase {
            if let Some(request) = pending {
                self.paint.cancel(request);
            }
            self.phase = Phase::Idle;
            tracing::debug!(frames = self.frame.0, "frame loop stopped");
        }
    }

    /// Paint callback for `request` at paint time `now`.
    ///
    /// Requests other than the currently pending one are ignored. While running, the
    /// scheduler re-registers before returning, whether the tick ran a frame or not.
    pub fn on_paint(&mut self, request: PaintRequest, now: Duration) -> TickOutcome {
        match self.phase {
            Phase::Running { pending } if pending == Some(request) => {}
            _ => return TickOutcome::Ignored,
        }
        self.phase = Phase::Running { pending: None };

        let outcome = self.tick(now);
        if self.is_running() {
            self.phase = Phase::Running {
                pending: Some(self.paint.request()),
            };
        }
        outcome
    }

    /// Run the throttle check and, when due, one logical frame. Does not touch the paint
    /// registration.
    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }
        if !self.pacer.due(now) {
            return TickOutcome::Skipped;
        }

        let frame = self.frame;
        let started = Instant::now();
        let result = self.render_frame();
        let metrics = FrameMetrics {
            frame,
            cost: started.elapsed(),
        };

        if let Err(err) = &result {
            tracing::warn!(frame = frame.0, error = %err, "frame failed");
            self.reporter
                .log(&format!("Error in animation loop: {err}"), frame, true);
        }
        self.reporter.frame_ms(metrics.cost_ms());
        tracing::trace!(frame = frame.0, cost_ms = metrics.cost_ms(), "frame done");

        self.frame = frame.next();
        self.pacer.mark(now);

        match result {
            Ok(()) => TickOutcome::Rendered(metrics),
            Err(_) => TickOutcome::Failed(metrics),
        }
    }

    /// Stop and hand back the bridge, keeping its generator session.
    pub fn into_bridge(mut self) -> GeneratorBridge<R> {
        self.stop();
        self.bridge
    }

    fn render_frame(&mut self) -> TreevisResult<()> {
        let packed = self.bridge.advance_and_snapshot()?;
        if packed.len() != self.registry.len() {
            return Err(TreevisError::contract(format!(
                "pattern returned {} light values for {} nodes",
                packed.len(),
                self.registry.len()
            )));
        }
        let colors = decode_frame(packed.as_slice());
        drop(packed);
        self.registry.apply(&colors);
        Ok(())
    }
}

impl<R: PatternRuntime, P: PaintSignal> std::fmt::Debug for FrameScheduler<R, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("phase", &self.phase)
            .field("frame", &self.frame)
            .field("interval", &self.pacer.interval())
            .field("nodes", &self.registry.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
