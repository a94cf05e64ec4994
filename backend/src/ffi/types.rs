//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList, etc.)

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::fleet::{OrderGuard, RoadConfig};
use crate::jam::{JamConfig, JamReport, JamState};
use crate::models::event::Event;
use crate::models::params::{ParameterKey, ParameterSet};
use crate::models::vehicle::Vehicle;
use crate::orchestrator::{FleetStats, SimulationConfig, SimulationError, TickResult};

impl From<SimulationError> for PyErr {
    fn from(err: SimulationError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a field with a default value if missing.
fn extract_with_default<'py, T>(dict: &Bound<'py, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

/// Extract an optional nested dict.
fn extract_section<'py>(
    dict: &Bound<'py, PyDict>,
    key: &str,
) -> PyResult<Option<Bound<'py, PyDict>>> {
    match dict.get_item(key)? {
        Some(value) => Ok(Some(value.downcast_into::<PyDict>()?)),
        None => Ok(None),
    }
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Overlay the keys present in `py_params` onto `base`
///
/// Unknown keys are rejected so that a typo in a slider binding does not go
/// unnoticed. The result is not validated here; `Simulation::configure` does
/// that.
pub fn parse_parameter_overrides(
    py_params: &Bound<'_, PyDict>,
    base: ParameterSet,
) -> PyResult<ParameterSet> {
    let mut params = base;
    for (key, value) in py_params.iter() {
        let name: String = key.extract()?;
        let key: ParameterKey = name.parse().map_err(|e: crate::models::params::ParameterError| {
            PyValueError::new_err(e.to_string())
        })?;
        params.set(key, value.extract()?);
    }
    Ok(params)
}

fn parse_road_config(py_road: &Bound<'_, PyDict>) -> PyResult<RoadConfig> {
    let defaults = RoadConfig::default();
    let guard: String = extract_with_default(py_road, "order_guard", "off".to_string())?;
    let order_guard = match guard.as_str() {
        "off" => OrderGuard::Off,
        "clamp" => OrderGuard::Clamp,
        other => {
            return Err(PyValueError::new_err(format!(
                "order_guard must be 'off' or 'clamp', got '{}'",
                other
            )))
        }
    };

    Ok(RoadConfig {
        length: extract_with_default(py_road, "length", defaults.length)?,
        vehicle_length: extract_with_default(py_road, "vehicle_length", defaults.vehicle_length)?,
        tick_rate_scale: extract_with_default(
            py_road,
            "tick_rate_scale",
            defaults.tick_rate_scale,
        )?,
        order_guard,
    })
}

fn parse_jam_config(py_jam: &Bound<'_, PyDict>) -> PyResult<JamConfig> {
    let defaults = JamConfig::default();
    Ok(JamConfig {
        density_threshold: extract_with_default(
            py_jam,
            "density_threshold",
            defaults.density_threshold,
        )?,
        speed_threshold: extract_with_default(py_jam, "speed_threshold", defaults.speed_threshold)?,
        detection_window_ticks: extract_with_default(
            py_jam,
            "detection_window_ticks",
            defaults.detection_window_ticks,
        )?,
    })
}

/// Convert Python dict to SimulationConfig; every section is optional
pub fn parse_simulation_config(py_config: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    let mut config = SimulationConfig {
        rng_seed: extract_with_default(py_config, "rng_seed", 0u64)?,
        ..SimulationConfig::default()
    };

    if let Some(road) = extract_section(py_config, "road")? {
        config.road = parse_road_config(&road)?;
    }
    if let Some(jam) = extract_section(py_config, "jam")? {
        config.jam = parse_jam_config(&jam)?;
    }
    if let Some(params) = extract_section(py_config, "parameters")? {
        config.parameters = parse_parameter_overrides(&params, ParameterSet::default())?;
    }

    Ok(config)
}

// ========================================================================
// Result Converters
// ========================================================================

pub fn parameters_to_py<'py>(
    py: Python<'py>,
    params: &ParameterSet,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    for (key, value) in params.entries() {
        dict.set_item(key.name(), value)?;
    }
    Ok(dict)
}

pub fn vehicle_to_py<'py>(py: Python<'py>, vehicle: &Vehicle) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    let color = vehicle.color();
    dict.set_item("id", vehicle.id())?;
    dict.set_item("position", vehicle.position())?;
    dict.set_item("speed", vehicle.speed())?;
    dict.set_item("desired_speed", vehicle.desired_speed())?;
    dict.set_item("color", (color.r, color.g, color.b))?;
    Ok(dict)
}

pub fn vehicles_to_py<'py>(py: Python<'py>, vehicles: &[Vehicle]) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty_bound(py);
    for vehicle in vehicles {
        list.append(vehicle_to_py(py, vehicle)?)?;
    }
    Ok(list)
}

pub fn jam_state_to_py<'py>(py: Python<'py>, state: &JamState) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("is_jammed", state.is_jammed())?;
    dict.set_item("sustained_low_speed_ticks", state.sustained_low_speed_ticks())?;
    dict.set_item("phase", state.phase().to_string())?;
    match state.captured_parameters() {
        Some(params) => dict.set_item("captured_parameters", parameters_to_py(py, params)?)?,
        None => dict.set_item("captured_parameters", py.None())?,
    }
    Ok(dict)
}

pub fn stats_to_py<'py>(py: Python<'py>, stats: &FleetStats) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("vehicle_count", stats.vehicle_count)?;
    dict.set_item("average_speed", stats.average_speed)?;
    Ok(dict)
}

fn jam_report_to_py<'py>(py: Python<'py>, report: &JamReport) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("parameters", parameters_to_py(py, &report.parameters)?)?;
    dict.set_item("vehicle_count", report.vehicle_count)?;
    dict.set_item("average_speed", report.average_speed)?;
    dict.set_item("summary", report.to_string())?;
    Ok(dict)
}

fn event_to_py<'py>(py: Python<'py>, event: &Event) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("event_type", event.event_type())?;
    dict.set_item("tick", event.tick())?;
    match event {
        Event::VehicleSpawned {
            vehicle_id,
            desired_speed,
            ..
        } => {
            dict.set_item("vehicle_id", vehicle_id)?;
            dict.set_item("desired_speed", desired_speed)?;
        }
        Event::VehicleExited {
            vehicle_id,
            position,
            ..
        } => {
            dict.set_item("vehicle_id", vehicle_id)?;
            dict.set_item("position", position)?;
        }
        Event::JamConfirmed { report, .. } => {
            dict.set_item("report", jam_report_to_py(py, report)?)?;
        }
        Event::JamCleared { .. } => {}
    }
    Ok(dict)
}

pub fn tick_result_to_py(py: Python, result: &TickResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("tick", result.tick)?;
    dict.set_item("num_spawned", result.num_spawned)?;
    dict.set_item("num_exited", result.num_exited)?;
    dict.set_item("vehicle_count", result.vehicle_count)?;
    dict.set_item("average_speed", result.average_speed)?;
    dict.set_item("jam_phase", result.jam_phase.to_string())?;

    let events = PyList::empty_bound(py);
    for event in &result.events {
        events.append(event_to_py(py, event)?)?;
    }
    dict.set_item("events", events)?;

    Ok(dict.unbind())
}
