use super::*;
use crate::foundation::core::Point3;
use crate::topology::tree::Topology;

fn two_level_pixels() -> Pixels {
    Pixels::from_topology(&Topology::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 2.0),
    ]))
}

#[test]
fn first_frame_splits_tree_at_half_height() {
    let spin = Spin::default();
    let mut pixels = two_level_pixels();
    let mut step = spin.draw(&pixels).unwrap().unwrap();

    assert_eq!(step.step(&mut pixels).unwrap(), Resume::Yielded);
    assert_eq!(pixels.get(0), Some(spin.color2));
    assert_eq!(pixels.get(1), Some(spin.color1));
}

#[test]
fn spin_never_finishes_and_only_uses_its_two_colors() {
    let spin = Spin {
        speed: 0.7,
        ..Spin::default()
    };
    let mut pixels = two_level_pixels();
    let mut step = spin.draw(&pixels).unwrap().unwrap();

    for _ in 0..200 {
        assert_eq!(step.step(&mut pixels).unwrap(), Resume::Yielded);
        for c in pixels.colors() {
            assert!(*c == spin.color1 || *c == spin.color2);
        }
    }
}
