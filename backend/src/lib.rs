//! Traffic Flow Core - Rust Engine
//!
//! Single-lane longitudinal traffic simulation with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Simulation clock
//! - **models**: Domain types (ParameterSet, Vehicle, Event)
//! - **fleet**: Spawning, IDM car-following update, eviction
//! - **jam**: Traffic-jam detection state machine
//! - **orchestrator**: Simulation context and tick loop
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Every vehicle's speed stays within `[0, desired_speed]`
//! 2. All randomness is deterministic (seeded or injected RNG)
//! 3. Invalid parameters never reach the dynamics update

// Module declarations
pub mod core;
pub mod fleet;
pub mod jam;
pub mod models;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use crate::core::time::SimClock;
pub use fleet::{FleetModel, OrderGuard, RoadConfig};
pub use jam::{JamConfig, JamDetector, JamPhase, JamReport, JamState, JamTransition};
pub use models::{
    event::Event,
    params::{ParameterBounds, ParameterError, ParameterKey, ParameterSet},
    vehicle::{Color, DriverProfile, Vehicle},
};
pub use orchestrator::{FleetStats, Simulation, SimulationConfig, SimulationError, TickResult};
pub use rng::{RandomSource, RngManager, SequenceRng};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn traffic_flow_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulation::PySimulation>()?;
    Ok(())
}
