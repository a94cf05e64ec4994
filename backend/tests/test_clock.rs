//! Tests for SimClock

use traffic_flow_core_rs::SimClock;

#[test]
fn test_clock_new() {
    let clock = SimClock::new();
    assert_eq!(clock.current_tick(), 0);
    assert_eq!(clock.elapsed_seconds(), 0.0);
}

#[test]
fn test_fixed_timestep_accumulates() {
    let mut clock = SimClock::new();
    for _ in 0..60 {
        clock.advance(1.0 / 60.0);
    }
    assert_eq!(clock.current_tick(), 60);
    assert!((clock.elapsed_seconds() - 1.0).abs() < 1e-9);
}

#[test]
fn test_variable_timestep_accumulates() {
    let mut clock = SimClock::new();
    clock.advance(0.016);
    clock.advance(0.034);
    clock.advance(0.0);
    assert_eq!(clock.current_tick(), 3);
    assert!((clock.elapsed_seconds() - 0.05).abs() < 1e-12);
}
