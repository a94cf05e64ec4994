//! PyO3 wrapper for Simulation
//!
//! This module provides the Python interface to the Rust simulation core.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{
    jam_state_to_py, parameters_to_py, parse_parameter_overrides, parse_simulation_config,
    stats_to_py, tick_result_to_py, vehicles_to_py,
};
use crate::models::params::{ParameterBounds, ParameterKey};
use crate::orchestrator::{Simulation, SimulationConfig};

/// Python wrapper for Rust Simulation
///
/// # Example (from Python)
///
/// ```python
/// from traffic_flow_core_rs import Simulation
///
/// sim = Simulation({"rng_seed": 12345})
/// while running:
///     sim.configure({"spawn_probability": slider.get_current_value()})
///     result = sim.tick(clock.tick(60) / 1000.0)
///     for car in sim.vehicles():
///         draw(car["position"], car["color"])
///     for event in result["events"]:
///         if event["event_type"] == "JamConfirmed":
///             show(event["report"]["summary"])
/// ```
#[pyclass(name = "Simulation")]
pub struct PySimulation {
    inner: Simulation,
}

#[pymethods]
impl PySimulation {
    /// Create a simulation; `config` may omit any section
    ///
    /// Raises ValueError if the configuration is invalid.
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let rust_config = match config {
            Some(dict) => parse_simulation_config(dict)?,
            None => SimulationConfig::default(),
        };
        Ok(PySimulation {
            inner: Simulation::new(rust_config)?,
        })
    }

    /// Apply parameter changes; missing keys keep their current value
    ///
    /// Raises ValueError and keeps the previous parameters if the merged
    /// set is invalid.
    fn configure(&mut self, params: &Bound<'_, PyDict>) -> PyResult<()> {
        let merged = parse_parameter_overrides(params, *self.inner.parameters())?;
        self.inner.configure(merged)?;
        Ok(())
    }

    /// Execute one tick of `dt` seconds and return its summary dict
    fn tick(&mut self, py: Python, dt: f64) -> PyResult<Py<PyDict>> {
        let result = self.inner.tick(dt)?;
        tick_result_to_py(py, &result)
    }

    /// Empty the road and clear jam state; parameters are kept
    fn reset(&mut self) {
        self.inner.reset();
    }

    /// Restore default parameters and clear jam state
    fn restore_default_parameters(&mut self) {
        self.inner.restore_default_parameters();
    }

    /// Vehicles, leader first, as dicts
    fn vehicles(&self, py: Python) -> PyResult<Py<PyList>> {
        Ok(vehicles_to_py(py, self.inner.vehicles())?.unbind())
    }

    fn jam_state(&self, py: Python) -> PyResult<Py<PyDict>> {
        Ok(jam_state_to_py(py, self.inner.jam_state())?.unbind())
    }

    fn stats(&self, py: Python) -> PyResult<Py<PyDict>> {
        Ok(stats_to_py(py, &self.inner.stats())?.unbind())
    }

    fn parameters(&self, py: Python) -> PyResult<Py<PyDict>> {
        Ok(parameters_to_py(py, self.inner.parameters())?.unbind())
    }

    fn current_tick(&self) -> u64 {
        self.inner.current_tick()
    }

    fn simulation_id(&self) -> String {
        self.inner.simulation_id().to_string()
    }

    /// Slider ranges: `{key: (label, min, max)}`
    #[staticmethod]
    fn parameter_bounds(py: Python) -> PyResult<Py<PyDict>> {
        let dict = PyDict::new_bound(py);
        for key in ParameterKey::ALL {
            let (min, max) = ParameterBounds::range(key);
            dict.set_item(key.name(), (key.label(), min, max))?;
        }
        Ok(dict.unbind())
    }
}
