//! Lifecycle controller: keeps exactly one frame loop alive while the run flag is set and
//! an interpreter is loaded.
//!
//! Every change is reconciled by tearing the current loop down first and only then
//! registering a new one, so two loops never overlap. Pausing keeps the generator session
//! (the bridge is parked); loading a different interpreter discards it.

use std::rc::Rc;
use std::time::Duration;

use crate::bridge::session::GeneratorBridge;
use crate::foundation::core::FrameIndex;
use crate::pattern::runtime::PatternRuntime;
use crate::registry::nodes::NodeRegistry;
use crate::report::sinks::FrameReporter;
use crate::schedule::paint::{PaintRequest, PaintSignal};
use crate::schedule::scheduler::{FrameScheduler, TickOutcome};

/// Owns the loaded interpreter and at most one live [`FrameScheduler`] for it.
pub struct LifecycleController<R: PatternRuntime, P: PaintSignal + Clone> {
    registry: Rc<NodeRegistry>,
    reporter: Rc<dyn FrameReporter>,
    paint: P,
    interval: Duration,
    running: bool,
    parked: Option<GeneratorBridge<R>>,
    active: Option<FrameScheduler<R, P>>,
}

impl<R: PatternRuntime, P: PaintSignal + Clone> LifecycleController<R, P> {
    /// A controller with the run flag off and no interpreter.
    pub fn new(
        registry: Rc<NodeRegistry>,
        reporter: Rc<dyn FrameReporter>,
        paint: P,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            reporter,
            paint,
            interval,
            running: false,
            parked: None,
            active: None,
        }
    }

    /// Current run flag.
    pub fn run_flag(&self) -> bool {
        self.running
    }

    /// Whether a frame loop is live.
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(FrameScheduler::is_running)
    }

    /// Whether an interpreter is loaded, running or paused.
    pub fn has_interpreter(&self) -> bool {
        self.active.is_some() || self.parked.is_some()
    }

    /// Index of the next frame of the live loop.
    pub fn frame(&self) -> Option<FrameIndex> {
        self.active.as_ref().map(FrameScheduler::frame)
    }

    /// Nodes every loop writes to.
    pub fn registry(&self) -> &Rc<NodeRegistry> {
        &self.registry
    }

    /// The loaded interpreter's bridge, live or parked.
    pub fn bridge(&self) -> Option<&GeneratorBridge<R>> {
        match &self.active {
            Some(sched) => Some(sched.bridge()),
            None => self.parked.as_ref(),
        }
    }

    /// Mutable access to the loaded bridge, live or parked.
    pub fn bridge_mut(&mut self) -> Option<&mut GeneratorBridge<R>> {
        match &mut self.active {
            Some(sched) => Some(sched.bridge_mut()),
            None => self.parked.as_mut(),
        }
    }

    /// Set the run flag. Unchanged values are ignored.
    pub fn set_running(&mut self, running: bool) {
        if self.running == running {
            return;
        }
        self.running = running;
        self.reconcile();
    }

    /// Load a new interpreter, or unload with `None`. Always restarts the loop, discarding
    /// the previous interpreter's generator session.
    pub fn set_interpreter(&mut self, runtime: Option<R>) {
        if let Some(sched) = self.active.take() {
            drop(sched.into_bridge());
        }
        self.parked = runtime.map(GeneratorBridge::new);
        self.reconcile();
    }

    /// Forward a host paint callback to the live loop.
    pub fn on_paint(&mut self, request: PaintRequest, now: Duration) -> TickOutcome {
        match self.active.as_mut() {
            Some(sched) => sched.on_paint(request, now),
            None => TickOutcome::Ignored,
        }
    }

    #[tracing::instrument(level = "debug", skip(self), fields(running = self.running))]
    fn reconcile(&mut self) {
        if !self.running {
            if let Some(sched) = self.active.take() {
                self.parked = Some(sched.into_bridge());
                tracing::info!("frame loop paused");
            }
            return;
        }
        if self.active.is_some() {
            return;
        }
        let Some(bridge) = self.parked.take() else {
            tracing::debug!("no interpreter loaded, staying idle");
            return;
        };
        let mut sched = FrameScheduler::new(
            bridge,
            Rc::clone(&self.registry),
            Rc::clone(&self.reporter),
            self.paint.clone(),
            self.interval,
        );
        sched.start();
        self.active = Some(sched);
        tracing::info!(nodes = self.registry.len(), "frame loop running");
    }
}

impl<R: PatternRuntime, P: PaintSignal + Clone> Drop for LifecycleController<R, P> {
    fn drop(&mut self) {
        if let Some(mut sched) = self.active.take() {
            sched.stop();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/controller.rs"]
mod tests;
