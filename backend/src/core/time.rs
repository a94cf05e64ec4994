//! Time management for the simulation
//!
//! The simulation advances in discrete ticks, one per rendered frame. The
//! timestep is supplied by the caller on every tick and may vary, so the clock
//! tracks elapsed simulated seconds alongside the tick count.

use serde::{Deserialize, Serialize};

/// Tick counter plus accumulated simulated time
///
/// # Example
/// ```
/// use traffic_flow_core_rs::SimClock;
///
/// let mut clock = SimClock::new();
/// assert_eq!(clock.current_tick(), 0);
///
/// clock.advance(1.0 / 60.0);
/// clock.advance(1.0 / 30.0);
/// assert_eq!(clock.current_tick(), 2);
/// assert!((clock.elapsed_seconds() - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    /// Ticks completed since start (or last reset)
    current_tick: u64,
    /// Sum of all timesteps applied
    elapsed_seconds: f64,
}

impl SimClock {
    /// Create a clock at tick 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed tick of length `dt`
    pub fn advance(&mut self, dt: f64) {
        self.current_tick += 1;
        self.elapsed_seconds += dt;
    }

    /// Number of completed ticks
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Simulated seconds elapsed
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }
}
