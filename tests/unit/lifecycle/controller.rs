use std::cell::RefCell;

use super::*;
use crate::color::packed::PackedLightState;
use crate::foundation::core::{Point3, Rgb};
use crate::foundation::error::TreevisResult;
use crate::pattern::runtime::Resume;
use crate::report::sinks::FrameStats;
use crate::schedule::paint::PaintQueue;
use crate::topology::tree::Topology;

/// Paints one fixed color on every node.
struct Solid(u32);

impl PatternRuntime for Solid {
    type Generator = ();

    fn create(&mut self) -> TreevisResult<Option<()>> {
        Ok(Some(()))
    }

    fn resume(&mut self, _generator: &mut ()) -> TreevisResult<Resume> {
        Ok(Resume::Yielded)
    }

    fn report(&mut self, _message: &str) {}

    fn request_frame(&mut self) -> TreevisResult<PackedLightState> {
        Ok(PackedLightState::new(vec![self.0; 2]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Request(u64),
    Cancel(u64),
}

/// Paint queue that also records registrations in order.
#[derive(Clone, Default)]
struct Tracked {
    queue: PaintQueue,
    events: Rc<RefCell<Vec<Event>>>,
}

impl PaintSignal for Tracked {
    fn request(&self) -> PaintRequest {
        let r = self.queue.request();
        self.events.borrow_mut().push(Event::Request(r.0));
        r
    }

    fn cancel(&self, request: PaintRequest) {
        self.events.borrow_mut().push(Event::Cancel(request.0));
        self.queue.cancel(request);
    }
}

fn controller() -> (LifecycleController<Solid, Tracked>, Tracked, Rc<FrameStats>) {
    let topo = Topology::new(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0)]);
    let registry = Rc::new(NodeRegistry::from_topology(&topo));
    let stats = Rc::new(FrameStats::new());
    let paint = Tracked::default();
    let ctl = LifecycleController::new(
        registry,
        stats.clone(),
        paint.clone(),
        Duration::from_millis(20),
    );
    (ctl, paint, stats)
}

fn paint_now(ctl: &mut LifecycleController<Solid, Tracked>, paint: &Tracked, ms: u64) -> TickOutcome {
    let req = paint.queue.take().expect("a paint request should be pending");
    ctl.on_paint(req, Duration::from_millis(ms))
}

#[test]
fn needs_both_flag_and_interpreter() {
    let (mut ctl, paint, _) = controller();
    ctl.set_running(true);
    assert!(!ctl.is_running());
    assert_eq!(paint.queue.pending(), None);

    ctl.set_interpreter(Some(Solid(0xFF0000)));
    assert!(ctl.is_running());
    assert_eq!(ctl.frame(), Some(FrameIndex(0)));

    assert!(paint_now(&mut ctl, &paint, 30).executed());
    assert_eq!(
        ctl.registry().snapshot(),
        vec![Some(Rgb::new(1.0, 0.0, 0.0)); 2]
    );
}

#[test]
fn pausing_keeps_the_session_and_resets_the_counter() {
    let (mut ctl, paint, stats) = controller();
    ctl.set_interpreter(Some(Solid(0)));
    ctl.set_running(true);
    paint_now(&mut ctl, &paint, 30);
    paint_now(&mut ctl, &paint, 60);
    assert_eq!(ctl.frame(), Some(FrameIndex(2)));

    ctl.set_running(false);
    assert!(!ctl.is_running());
    assert_eq!(paint.queue.pending(), None);
    assert_eq!(ctl.on_paint(PaintRequest(1), Duration::from_secs(1)), TickOutcome::Ignored);
    assert_eq!(stats.frames(), 2);
    assert_eq!(ctl.bridge().map(|b| b.generations()), Some(1));

    ctl.set_running(true);
    assert_eq!(ctl.frame(), Some(FrameIndex(0)));
    paint_now(&mut ctl, &paint, 30);
    assert_eq!(ctl.bridge().map(|b| b.generations()), Some(1));
}

#[test]
fn repeated_flag_values_do_not_restart() {
    let (mut ctl, paint, _) = controller();
    ctl.set_interpreter(Some(Solid(0)));
    ctl.set_running(true);
    let before = paint.events.borrow().len();
    ctl.set_running(true);
    assert_eq!(paint.events.borrow().len(), before);
}

#[test]
fn new_interpreter_tears_down_before_registering() {
    let (mut ctl, paint, _) = controller();
    ctl.set_running(true);
    ctl.set_interpreter(Some(Solid(0xFF0000)));
    paint_now(&mut ctl, &paint, 30);
    let old = paint.queue.pending().unwrap();
    paint.events.borrow_mut().clear();

    ctl.set_interpreter(Some(Solid(0x0000FF)));
    let events = paint.events.borrow().clone();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], Event::Cancel(old.0));
    assert!(matches!(events[1], Event::Request(id) if id != old.0));

    assert_eq!(ctl.on_paint(old, Duration::from_secs(1)), TickOutcome::Ignored);
    assert_eq!(ctl.bridge().map(|b| b.generations()), Some(0));
    paint_now(&mut ctl, &paint, 30);
    assert_eq!(
        ctl.registry().snapshot(),
        vec![Some(Rgb::new(0.0, 0.0, 1.0)); 2]
    );
}

#[test]
fn unloading_the_interpreter_stops_the_loop() {
    let (mut ctl, paint, _) = controller();
    ctl.set_running(true);
    ctl.set_interpreter(Some(Solid(0)));
    ctl.set_interpreter(None);
    assert!(!ctl.is_running());
    assert!(!ctl.has_interpreter());
    assert!(ctl.run_flag());
    assert_eq!(paint.queue.pending(), None);
}

#[test]
fn dropping_cancels_the_pending_paint() {
    let (mut ctl, paint, _) = controller();
    ctl.set_interpreter(Some(Solid(0)));
    ctl.set_running(true);
    assert!(paint.queue.pending().is_some());
    drop(ctl);
    assert_eq!(paint.queue.pending(), None);
}

#[test]
fn bridge_mut_reaches_live_and_parked_runtimes() {
    let (mut ctl, paint, _) = controller();
    assert!(ctl.bridge_mut().is_none());

    ctl.set_interpreter(Some(Solid(0)));
    ctl.set_running(true);
    if let Some(bridge) = ctl.bridge_mut() {
        bridge.runtime_mut().0 = 0x00FF00;
    }
    paint_now(&mut ctl, &paint, 30);
    assert_eq!(ctl.registry().snapshot()[0], Some(Rgb::new(0.0, 1.0, 0.0)));

    ctl.set_running(false);
    if let Some(bridge) = ctl.bridge_mut() {
        bridge.runtime_mut().0 = 0x0000FF;
    }
    ctl.set_running(true);
    paint_now(&mut ctl, &paint, 30);
    assert_eq!(ctl.registry().snapshot()[0], Some(Rgb::new(0.0, 0.0, 1.0)));
}
