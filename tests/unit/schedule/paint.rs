use super::*;

#[test]
fn requests_are_one_shot_and_unique() {
    let q = PaintQueue::new();
    let a = q.request();
    assert_eq!(q.pending(), Some(a));
    assert_eq!(q.take(), Some(a));
    assert_eq!(q.take(), None);

    let b = q.request();
    assert_ne!(a, b);
}

#[test]
fn cancel_only_removes_the_matching_request() {
    let q = PaintQueue::new();
    let a = q.request();
    let b = q.request();
    assert_eq!(q.pending(), Some(b));

    q.cancel(a);
    assert_eq!(q.pending(), Some(b));
    q.cancel(b);
    assert_eq!(q.pending(), None);
}

#[test]
fn clones_share_the_queue() {
    let host = PaintQueue::new();
    let loop_side = host.clone();
    let r = loop_side.request();
    assert_eq!(host.take(), Some(r));
    assert_eq!(loop_side.pending(), None);
}
