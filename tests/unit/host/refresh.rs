use std::cell::RefCell;

use super::*;
use crate::schedule::pacer::FramePacer;
use crate::schedule::paint::PaintSignal;
use crate::schedule::scheduler::FrameMetrics;
use crate::foundation::core::{FrameIndex, Fps};

/// Throttled loop without a bridge: re-registers and reports due ticks.
fn throttled(queue: &PaintQueue, fps: u32) -> impl FnMut(PaintRequest, Duration) -> TickOutcome + '_ {
    let mut pacer = FramePacer::new(Fps::new(fps, 1).unwrap().frame_interval());
    move |_req, now| {
        queue.request();
        if !pacer.due(now) {
            return TickOutcome::Skipped;
        }
        pacer.mark(now);
        TickOutcome::Rendered(FrameMetrics {
            frame: FrameIndex(0),
            cost: Duration::ZERO,
        })
    }
}

#[test]
fn sixty_hz_refresh_runs_forty_five_fps_loop_every_other_paint() {
    let queue = PaintQueue::new();
    queue.request();
    let mut driver = RefreshDriver::virtual_time(Duration::from_secs_f64(1.0 / 60.0));

    let summary = driver.run_frames(&queue, 3, 100, throttled(&queue, 45));
    assert_eq!(summary.rendered, 3);
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.refreshes, 6);
    assert!(!summary.stopped);
    assert_eq!(summary.elapsed, driver.now());
}

#[test]
fn stops_when_nothing_is_registered() {
    let queue = PaintQueue::new();
    queue.request();
    let mut driver = RefreshDriver::virtual_time(Duration::from_millis(10));
    let seen = RefCell::new(Vec::new());

    // A loop that never re-registers fires exactly once.
    let summary = driver.run_frames(&queue, 10, 100, |req, now| {
        seen.borrow_mut().push((req, now));
        TickOutcome::Skipped
    });
    assert!(summary.stopped);
    assert_eq!(summary.refreshes, 1);
    assert_eq!(seen.borrow()[0].1, Duration::from_millis(10));
}

#[test]
fn refresh_cap_bounds_the_run() {
    let queue = PaintQueue::new();
    queue.request();
    let mut driver = RefreshDriver::virtual_time(Duration::from_millis(10));
    let summary = driver.run_frames(&queue, 10, 4, |_, _| {
        queue.request();
        TickOutcome::Ignored
    });
    assert_eq!(summary.refreshes, 4);
    assert_eq!(summary.ignored, 4);
    assert_eq!(summary.executed(), 0);
    assert_eq!(driver.now(), Duration::from_millis(40));
}

#[test]
fn realtime_driver_waits_for_each_refresh() {
    let queue = PaintQueue::new();
    queue.request();
    let mut driver = RefreshDriver::realtime(Duration::from_millis(2));
    let started = Instant::now();
    let summary = driver.run_frames(&queue, 3, 100, throttled(&queue, 1000));
    assert_eq!(summary.rendered, 3);
    assert!(started.elapsed() >= Duration::from_millis(5));
}
