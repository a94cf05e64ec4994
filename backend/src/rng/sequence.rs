//! Scripted random source for tests and replays

use super::RandomSource;

/// Replays a fixed list of draws, cycling when exhausted.
///
/// # Example
/// ```
/// use traffic_flow_core_rs::rng::{RandomSource, SequenceRng};
///
/// let mut rng = SequenceRng::new(vec![0.1, 0.9]);
/// assert!(rng.chance(0.5));
/// assert!(!rng.chance(0.5));
/// assert!(rng.chance(0.5)); // wrapped around
/// ```
#[derive(Debug, Clone)]
pub struct SequenceRng {
    draws: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    /// Create a source replaying `draws`
    ///
    /// # Panics
    /// Panics if `draws` is empty or any value lies outside `[0.0, 1.0)`.
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "draw sequence must not be empty");
        assert!(
            draws.iter().all(|d| (0.0..1.0).contains(d)),
            "draws must lie in [0.0, 1.0)"
        );
        Self { draws, cursor: 0 }
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_consumed_draws() {
        let mut rng = SequenceRng::new(vec![0.25]);
        rng.next_f64();
        rng.next_f64();
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    #[should_panic(expected = "draws must lie in [0.0, 1.0)")]
    fn test_rejects_out_of_range_draw() {
        SequenceRng::new(vec![1.0]);
    }

    #[test]
    fn test_uniform_u8_covers_inclusive_range() {
        let mut rng = SequenceRng::new(vec![0.0, 0.999_999]);
        assert_eq!(rng.uniform_u8(50, 255), 50);
        assert_eq!(rng.uniform_u8(50, 255), 255);
    }
}
