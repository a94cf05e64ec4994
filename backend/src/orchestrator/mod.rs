//! Orchestrator - the simulation context and its tick loop
//!
//! See `engine.rs` for full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{FleetStats, Simulation, SimulationConfig, SimulationError, TickResult};
