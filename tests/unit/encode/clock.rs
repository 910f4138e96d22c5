use super::*;

#[test]
fn manual_clock_clones_share_time() {
    let clock = ManualClock::new(10.0);
    let handle = clock.clone();
    handle.advance(5.0);
    assert_eq!(clock.now_ms(), 15.0);
    handle.advance(-100.0);
    assert_eq!(clock.now_ms(), 15.0);
    clock.set(2.0);
    assert_eq!(handle.now_ms(), 2.0);
}

#[test]
fn system_clock_is_monotonic() {
    let clock = SystemClock::new();
    let a = clock.now_ms();
    let b = clock.now_ms();
    assert!(a >= 0.0);
    assert!(b >= a);
}

#[test]
fn references_are_clocks() {
    fn read<C: Clock>(clock: C) -> f64 {
        clock.now_ms()
    }
    let clock = ManualClock::new(3.0);
    assert_eq!(read(&clock), 3.0);
    let by_ref: &dyn Clock = &clock;
    assert_eq!(by_ref.now_ms(), 3.0);
}
