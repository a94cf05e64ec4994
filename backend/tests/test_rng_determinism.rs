//! Determinism of the random sources

use traffic_flow_core_rs::rng::{RandomSource, RngManager, SequenceRng};

#[test]
fn test_same_seed_same_sequence() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(12345);

    for _ in 0..1000 {
        assert_eq!(rng1.next_u64(), rng2.next_u64());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut rng1 = RngManager::new(1);
    let mut rng2 = RngManager::new(2);

    let a: Vec<u64> = (0..10).map(|_| rng1.next_u64()).collect();
    let b: Vec<u64> = (0..10).map(|_| rng2.next_u64()).collect();
    assert_ne!(a, b);
}

#[test]
fn test_uniform_within_bounds() {
    let mut rng = RngManager::new(42);
    for _ in 0..10_000 {
        let speed = rng.uniform(2.0, 5.0);
        assert!((2.0..5.0).contains(&speed), "uniform produced {}", speed);
    }
}

#[test]
fn test_uniform_degenerate_range() {
    let mut rng = RngManager::new(42);
    assert_eq!(rng.uniform(3.0, 3.0), 3.0);
}

#[test]
fn test_chance_frequency_close_to_probability() {
    let mut rng = RngManager::new(2024);
    let trials = 20_000;
    let hits = (0..trials).filter(|_| rng.chance(0.3)).count();
    let rate = hits as f64 / trials as f64;
    assert!((rate - 0.3).abs() < 0.02, "observed rate {}", rate);
}

#[test]
fn test_color_channel_range() {
    let mut rng = RngManager::new(5);
    for _ in 0..10_000 {
        let channel = rng.uniform_u8(50, 255);
        assert!(channel >= 50);
    }
}

#[test]
fn test_sequence_rng_replays_in_order() {
    let mut rng = SequenceRng::new(vec![0.1, 0.2, 0.3]);
    let drawn: Vec<f64> = (0..4).map(|_| rng.next_f64()).collect();
    assert_eq!(drawn, vec![0.1, 0.2, 0.3, 0.1]);
}
