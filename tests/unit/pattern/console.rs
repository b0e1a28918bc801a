use super::*;

#[test]
fn full_console_evicts_oldest_lines() {
    let mut c = Console::with_capacity(3);
    for i in 0..5 {
        c.push(format!("line {i}"));
    }
    assert_eq!(c.len(), 3);
    assert_eq!(c.dropped(), 2);
    assert_eq!(c.lines().collect::<Vec<_>>(), ["line 2", "line 3", "line 4"]);
}

#[test]
fn drain_empties_but_keeps_the_drop_count() {
    let mut c = Console::with_capacity(2);
    c.push("a");
    c.push("b");
    c.push("c");
    assert_eq!(c.drain(), vec!["b".to_string(), "c".to_string()]);
    assert!(c.is_empty());
    assert_eq!(c.dropped(), 1);

    c.push("d");
    assert_eq!(c.to_vec(), vec!["d".to_string()]);
}

#[test]
fn default_capacity_and_zero_capacity() {
    assert_eq!(Console::new().capacity(), CONSOLE_CAPACITY);

    let mut c = Console::with_capacity(0);
    assert_eq!(c.capacity(), 1);
    c.push("x");
    c.push("y");
    assert_eq!(c.to_vec(), vec!["y".to_string()]);
}
