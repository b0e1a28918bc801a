use super::*;

#[test]
fn frame_index_next_increments_by_one() {
    assert_eq!(FrameIndex(0).next(), FrameIndex(1));
    assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
}

#[test]
fn fps_rejects_zero_components() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(45, 0).is_err());
}

#[test]
fn fps_45_interval_is_about_22ms() {
    let fps = Fps::new(45, 1).unwrap();
    let ms = fps.frame_interval().as_secs_f64() * 1000.0;
    assert!((ms - 22.222).abs() < 1e-3, "{ms}");
}

#[test]
fn point_polar_helpers() {
    let p = Point3::new(0.0, 1.0, 0.5);
    assert!((p.polar_angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert!((p.trunk_distance() - 1.0).abs() < 1e-12);

    let q = Point3::from([3.0, 4.0, 0.0]);
    assert_eq!(q.trunk_distance(), 5.0);
}
