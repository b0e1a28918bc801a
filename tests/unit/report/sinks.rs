use super::*;

#[test]
fn stats_accumulate_costs_and_failures() {
    let stats = FrameStats::new();
    assert_eq!(stats.mean_ms(), 0.0);

    stats.frame_ms(2.0);
    stats.frame_ms(6.0);
    stats.log("boom", FrameIndex(1), true);
    stats.log("note", FrameIndex(2), false);

    assert_eq!(stats.frames(), 2);
    assert_eq!(stats.failures(), 1);
    assert_eq!(stats.total_ms(), 8.0);
    assert_eq!(stats.max_ms(), 6.0);
    assert_eq!(stats.mean_ms(), 4.0);
    assert_eq!(stats.last_message(), Some((FrameIndex(2), "note".to_string())));
}

#[test]
fn tee_reaches_both_sides() {
    let tee = Tee(FrameStats::new(), FrameStats::new());
    tee.frame_ms(1.5);
    tee.log("x", FrameIndex(0), true);
    assert_eq!(tee.0.frames(), 1);
    assert_eq!(tee.1.frames(), 1);
    assert_eq!(tee.0.failures(), 1);
    assert_eq!(tee.1.failures(), 1);
}

#[test]
fn unit_and_tracing_reporters_accept_everything() {
    ().log("ignored", FrameIndex(3), true);
    ().frame_ms(1.0);
    TracingReporter.log("warned", FrameIndex(3), true);
    TracingReporter.frame_ms(1.0);
}
