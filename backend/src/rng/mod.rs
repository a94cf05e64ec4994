//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator MUST go through this module.
//!
//! Consumers never call a generator directly; they take `&mut impl RandomSource`
//! so tests can substitute a scripted sequence of draws.

mod sequence;
mod xorshift;

pub use sequence::SequenceRng;
pub use xorshift::RngManager;

/// Source of uniform draws in `[0.0, 1.0)`.
///
/// Only `next_f64` is required; the sampling helpers used by the fleet are
/// derived from it, so a scripted source controls every draw exactly.
pub trait RandomSource {
    /// Next uniform value in `[0.0, 1.0)`
    fn next_f64(&mut self) -> f64;

    /// Bernoulli trial: `true` with probability `p`
    ///
    /// Consumes exactly one draw. `p <= 0.0` never succeeds and `p >= 1.0`
    /// always does.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform real in `[min, max)` (or exactly `min` when `min == max`)
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    /// Uniform integer in `[min, max]` (inclusive on both ends)
    fn uniform_u8(&mut self, min: u8, max: u8) -> u8 {
        debug_assert!(min <= max, "min must not exceed max");
        let span = u16::from(max - min) + 1;
        let offset = (self.next_f64() * f64::from(span)) as u16;
        min + offset.min(span - 1) as u8
    }
}
