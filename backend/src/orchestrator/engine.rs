//! Simulation Engine
//!
//! Owns every piece of mutable simulation state and runs the tick loop:
//!
//! ```text
//! For each tick t:
//! 1. Spawn (Bernoulli trial if the entry zone is clear)
//! 2. Update dynamics (IDM, leader first) and evict vehicles past the road end
//! 3. Observe the fleet for jams
//! 4. Advance the clock
//! ```
//!
//! The outer surface supplies parameters through `configure` between ticks and
//! reads `vehicles()` / `jam_state()` after each tick for display.
//!
//! # Example
//!
//! ```rust
//! use traffic_flow_core_rs::{ParameterSet, Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
//!
//! for _ in 0..600 {
//!     let result = sim.tick(1.0 / 60.0).unwrap();
//!     assert_eq!(result.vehicle_count, sim.vehicles().len());
//! }
//!
//! // a rejected change keeps the old parameters
//! let broken = ParameterSet { min_speed: 0.0, ..ParameterSet::default() };
//! assert!(sim.configure(broken).is_err());
//! assert_eq!(*sim.parameters(), ParameterSet::default());
//! ```

use crate::core::time::SimClock;
use crate::fleet::{FleetModel, RoadConfig};
use crate::jam::{JamConfig, JamDetector, JamPhase, JamState, JamTransition};
use crate::models::event::Event;
use crate::models::params::{ParameterError, ParameterSet};
use crate::models::vehicle::Vehicle;
use crate::rng::{RandomSource, RngManager};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete simulation configuration
///
/// Every section falls back to its default when absent from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for spawn decisions, desired speeds and colors
    pub rng_seed: u64,

    /// Road geometry and integration scale
    pub road: RoadConfig,

    /// Jam detection thresholds
    pub jam: JamConfig,

    /// Initial parameter set
    pub parameters: ParameterSet,
}

impl SimulationConfig {
    /// Parse a JSON document
    ///
    /// # Example
    /// ```
    /// use traffic_flow_core_rs::SimulationConfig;
    ///
    /// let config = SimulationConfig::from_json_str(
    ///     r#"{ "rng_seed": 7, "parameters": { "spawn_probability": 0.8 } }"#,
    /// ).unwrap();
    /// assert_eq!(config.rng_seed, 7);
    /// assert_eq!(config.parameters.spawn_probability, 0.8);
    /// assert_eq!(config.parameters.max_speed, 5.0);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json)
            .map_err(|e| SimulationError::InvalidConfig(format!("malformed configuration: {}", e)))
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Aggregate view of the fleet for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FleetStats {
    pub vehicle_count: usize,

    /// Mean speed; 0.0 on an empty road
    pub average_speed: f64,
}

/// Result of a single tick
#[derive(Debug, Clone)]
pub struct TickResult {
    /// Index of the tick just executed (0-based)
    pub tick: u64,

    /// Vehicles that entered this tick (0 or 1)
    pub num_spawned: usize,

    /// Vehicles evicted this tick
    pub num_exited: usize,

    /// Vehicles on the road after the tick
    pub vehicle_count: usize,

    /// Mean speed after the tick (0.0 on an empty road)
    pub average_speed: f64,

    /// Detector phase after the tick
    pub jam_phase: JamPhase,

    /// Everything that happened this tick, in order
    pub events: Vec<Event>,
}

/// Simulation error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Timestep must be finite and non-negative, got {0}")]
    InvalidTimestep(f64),
}

// ============================================================================
// Simulation
// ============================================================================

/// Simulation context owning fleet, parameters, jam state and random source
///
/// There is no shared or global state: independent instances never influence
/// each other, and the same seed, configuration and timestep sequence always
/// reproduce the same run.
pub struct Simulation<R: RandomSource = RngManager> {
    /// Identifies this instance in log output
    simulation_id: Uuid,

    clock: SimClock,

    rng: R,

    /// Active configuration, applied to spawns from the next tick on
    parameters: ParameterSet,

    fleet: FleetModel,

    jam_detector: JamDetector,
}

impl Simulation<RngManager> {
    /// Create a simulation seeded from `config.rng_seed`
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let rng = RngManager::new(config.rng_seed);
        Self::with_random_source(config, rng)
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Create a simulation drawing from an injected random source
    ///
    /// `config.rng_seed` is ignored.
    pub fn with_random_source(config: SimulationConfig, rng: R) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let simulation_id = Uuid::new_v4();
        info!(
            %simulation_id,
            road_length = config.road.length,
            vehicle_length = config.road.vehicle_length,
            order_guard = ?config.road.order_guard,
            "simulation created"
        );

        Ok(Self {
            simulation_id,
            clock: SimClock::new(),
            rng,
            parameters: config.parameters,
            fleet: FleetModel::new(config.road),
            jam_detector: JamDetector::new(config.jam),
        })
    }

    fn validate_config(config: &SimulationConfig) -> Result<(), SimulationError> {
        let road = &config.road;
        if !(road.length.is_finite() && road.length > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "road length must be positive, got {}",
                road.length
            )));
        }

        if !(road.vehicle_length.is_finite() && road.vehicle_length > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "vehicle length must be positive, got {}",
                road.vehicle_length
            )));
        }

        if !(road.tick_rate_scale.is_finite() && road.tick_rate_scale > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "tick rate scale must be positive, got {}",
                road.tick_rate_scale
            )));
        }

        if !(config.jam.speed_threshold.is_finite() && config.jam.speed_threshold >= 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "jam speed threshold must be non-negative, got {}",
                config.jam.speed_threshold
            )));
        }

        config.parameters.validate()?;
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn simulation_id(&self) -> Uuid {
        self.simulation_id
    }

    /// Number of ticks executed so far
    pub fn current_tick(&self) -> u64 {
        self.clock.current_tick()
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.clock.elapsed_seconds()
    }

    /// Active parameter set
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn fleet(&self) -> &FleetModel {
        &self.fleet
    }

    /// Read-only fleet snapshot, leader first
    pub fn vehicles(&self) -> &[Vehicle] {
        self.fleet.vehicles()
    }

    pub fn jam_state(&self) -> &JamState {
        self.jam_detector.state()
    }

    pub fn jam_config(&self) -> &JamConfig {
        self.jam_detector.config()
    }

    pub fn stats(&self) -> FleetStats {
        FleetStats {
            vehicle_count: self.fleet.len(),
            average_speed: self.fleet.average_speed().unwrap_or(0.0),
        }
    }

    // ========================================================================
    // External Actions
    // ========================================================================

    /// Replace the active parameter set
    ///
    /// Takes effect from the next spawn and update. Vehicles already on the
    /// road keep their driver profile. On rejection the previous parameters
    /// stay active.
    pub fn configure(&mut self, parameters: ParameterSet) -> Result<(), SimulationError> {
        if let Err(e) = parameters.validate() {
            warn!(simulation_id = %self.simulation_id, error = %e, "parameter change rejected");
            return Err(e.into());
        }

        if parameters != self.parameters {
            debug!(simulation_id = %self.simulation_id, ?parameters, "parameters changed");
        }
        self.parameters = parameters;
        Ok(())
    }

    /// Empty the road and return the jam detector to NORMAL
    ///
    /// The active parameters are kept.
    pub fn reset(&mut self) {
        self.fleet.clear();
        self.jam_detector.reset();
        info!(
            simulation_id = %self.simulation_id,
            tick = self.clock.current_tick(),
            "simulation reset"
        );
    }

    /// Restore default parameters and return the jam detector to NORMAL
    ///
    /// Vehicles stay on the road.
    pub fn restore_default_parameters(&mut self) {
        self.parameters = ParameterSet::default();
        self.jam_detector.reset();
        info!(simulation_id = %self.simulation_id, "parameters restored to defaults");
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one simulation tick of length `dt` seconds
    ///
    /// # Errors
    ///
    /// `InvalidTimestep` for a negative or non-finite `dt`; state is untouched.
    pub fn tick(&mut self, dt: f64) -> Result<TickResult, SimulationError> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SimulationError::InvalidTimestep(dt));
        }

        let tick = self.clock.current_tick();
        let mut events = Vec::new();

        // STEP 1: SPAWN
        let mut num_spawned = 0;
        if let Some(vehicle) = self.fleet.spawn(&self.parameters, &mut self.rng) {
            num_spawned = 1;
            debug!(
                simulation_id = %self.simulation_id,
                tick,
                vehicle_id = vehicle.id(),
                desired_speed = vehicle.desired_speed(),
                "vehicle spawned"
            );
            events.push(Event::VehicleSpawned {
                tick,
                vehicle_id: vehicle.id(),
                desired_speed: vehicle.desired_speed(),
            });
        }

        // STEP 2: DYNAMICS + EVICTION
        let exited = self.fleet.update(dt);
        for vehicle in &exited {
            debug!(
                simulation_id = %self.simulation_id,
                tick,
                vehicle_id = vehicle.id(),
                "vehicle exited"
            );
            events.push(Event::VehicleExited {
                tick,
                vehicle_id: vehicle.id(),
                position: vehicle.position(),
            });
        }

        // STEP 3: JAM DETECTION
        match self
            .jam_detector
            .observe(self.fleet.vehicles(), &self.parameters)
        {
            JamTransition::Confirmed(report) => {
                info!(
                    simulation_id = %self.simulation_id,
                    tick,
                    vehicle_count = report.vehicle_count,
                    average_speed = report.average_speed,
                    "traffic jam confirmed"
                );
                events.push(Event::JamConfirmed { tick, report });
            }
            JamTransition::Cleared => {
                info!(simulation_id = %self.simulation_id, tick, "traffic jam cleared");
                events.push(Event::JamCleared { tick });
            }
            JamTransition::None => {}
        }

        // STEP 4: ADVANCE TIME
        self.clock.advance(dt);

        let stats = self.stats();
        Ok(TickResult {
            tick,
            num_spawned,
            num_exited: exited.len(),
            vehicle_count: stats.vehicle_count,
            average_speed: stats.average_speed,
            jam_phase: self.jam_detector.state().phase(),
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceRng;

    #[test]
    fn test_rejects_non_positive_road() {
        let config = SimulationConfig {
            road: RoadConfig {
                length: 0.0,
                ..RoadConfig::default()
            },
            ..SimulationConfig::default()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_initial_parameters() {
        let config = SimulationConfig {
            parameters: ParameterSet {
                min_speed: 4.0,
                max_speed: 3.0,
                ..ParameterSet::default()
            },
            ..SimulationConfig::default()
        };
        assert_eq!(
            Simulation::new(config).err(),
            Some(SimulationError::InvalidParameters(
                ParameterError::InvertedSpeedRange {
                    min_speed: 4.0,
                    max_speed: 3.0
                }
            ))
        );
    }

    #[test]
    fn test_invalid_timestep_leaves_clock() {
        let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
        assert_eq!(
            sim.tick(-0.1).err(),
            Some(SimulationError::InvalidTimestep(-0.1))
        );
        assert!(sim.tick(f64::NAN).is_err());
        assert_eq!(sim.current_tick(), 0);
    }

    #[test]
    fn test_scripted_spawn_reported_as_event() {
        let rng = SequenceRng::new(vec![0.0, 0.5, 0.1, 0.2, 0.3]);
        let mut sim = Simulation::with_random_source(SimulationConfig::default(), rng).unwrap();

        let result = sim.tick(1.0 / 60.0).unwrap();
        assert_eq!(result.tick, 0);
        assert_eq!(result.num_spawned, 1);
        assert_eq!(
            result.events,
            vec![Event::VehicleSpawned {
                tick: 0,
                vehicle_id: 1,
                desired_speed: 3.5
            }]
        );
    }

    #[test]
    fn test_zero_dt_freezes_positions() {
        let rng = SequenceRng::new(vec![0.0, 0.5, 0.1, 0.2, 0.3]);
        let mut sim = Simulation::with_random_source(SimulationConfig::default(), rng).unwrap();
        sim.tick(0.0).unwrap();
        assert_eq!(sim.vehicles()[0].position(), 0.0);
        assert_eq!(sim.elapsed_seconds(), 0.0);
        assert_eq!(sim.current_tick(), 1);
    }
}
