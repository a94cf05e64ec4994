use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;
use traffic_flow_core_rs::{
    Event, JamPhase, JamReport, ParameterError, ParameterKey, Simulation, SimulationConfig,
    SimulationError,
};

use crate::args::CommandLineArgs;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to read config {path:?}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Override(#[from] ParameterError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Totals over a headless run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed_seconds: f64,
    pub vehicles_spawned: usize,
    pub vehicles_exited: usize,
    pub final_vehicle_count: usize,
    pub final_average_speed: f64,
    pub final_phase: JamPhase,
    pub jams: Vec<JamReport>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ticks run: {} ({:.1} s simulated)", self.ticks, self.elapsed_seconds)?;
        writeln!(f, "Vehicles spawned: {}", self.vehicles_spawned)?;
        writeln!(f, "Vehicles exited: {}", self.vehicles_exited)?;
        writeln!(f, "Vehicles on road: {}", self.final_vehicle_count)?;
        writeln!(f, "Average speed: {:.1}", self.final_average_speed)?;
        writeln!(f, "Detector phase: {}", self.final_phase)?;
        write!(f, "Jams confirmed: {}", self.jams.len())?;
        for report in &self.jams {
            write!(f, "\n\n{}", report)?;
        }
        Ok(())
    }
}

/// Merge the config file with command-line overrides
pub fn load_config(args: &CommandLineArgs) -> Result<SimulationConfig, RunError> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| RunError::ReadConfig {
                path: path.clone(),
                source,
            })?;
            SimulationConfig::from_json_str(&json)?
        }
        None => SimulationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }
    if let Some(guard) = args.order_guard {
        config.road.order_guard = guard.into();
    }
    for (name, value) in &args.overrides {
        let key: ParameterKey = name.parse()?;
        config.parameters.set(key, *value);
    }

    Ok(config)
}

pub fn run(args: &CommandLineArgs) -> Result<RunSummary, RunError> {
    let config = load_config(args)?;
    let mut sim = Simulation::new(config)?;

    let mut vehicles_spawned = 0;
    let mut vehicles_exited = 0;
    let mut jams = Vec::new();

    for _ in 0..args.ticks {
        let result = sim.tick(args.dt)?;
        vehicles_spawned += result.num_spawned;
        vehicles_exited += result.num_exited;

        for event in result.events {
            if let Event::JamConfirmed { tick, report } = event {
                info!("jam confirmed at tick {}:\n{}", tick, report);
                jams.push(report);
            }
        }
    }

    let stats = sim.stats();
    Ok(RunSummary {
        ticks: sim.current_tick(),
        elapsed_seconds: sim.elapsed_seconds(),
        vehicles_spawned,
        vehicles_exited,
        final_vehicle_count: stats.vehicle_count,
        final_average_speed: stats.average_speed,
        final_phase: sim.jam_state().phase(),
        jams,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> CommandLineArgs {
        let mut argv = vec!["traffic-sim"];
        argv.extend_from_slice(extra);
        CommandLineArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_overrides_applied() {
        let config = load_config(&args(&["--seed", "9", "--set", "min_gap=4"])).unwrap();
        assert_eq!(config.rng_seed, 9);
        assert_eq!(config.parameters.min_gap, 4.0);
    }

    #[test]
    fn test_unknown_override_rejected() {
        let err = load_config(&args(&["--set", "top_speed=4"])).unwrap_err();
        assert!(matches!(err, RunError::Override(ParameterError::UnknownKey(_))));
    }

    #[test]
    fn test_invalid_parameters_fail_run() {
        let err = run(&args(&["--ticks", "1", "--set", "min_speed=0"])).unwrap_err();
        assert!(matches!(err, RunError::Simulation(SimulationError::InvalidParameters(_))));
    }

    #[test]
    fn test_run_counts_ticks() {
        let summary = run(&args(&["--ticks", "120", "--seed", "3"])).unwrap();
        assert_eq!(summary.ticks, 120);
        assert!(summary.vehicles_spawned >= summary.final_vehicle_count);
        assert!(summary.to_string().starts_with("Ticks run: 120"));
    }
}
