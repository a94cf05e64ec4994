//! Traffic-jam detection
//!
//! Hysteresis state machine over per-tick fleet aggregates:
//!
//! ```text
//!            low speed & dense            counter reaches window
//!  NORMAL ───────────────────▶ ACCUMULATING ──────────────────▶ JAMMED
//!     ▲                             │                             │
//!     └──── sparse or recovered ────┴──── sparse or recovered ────┘
//! ```
//!
//! ACCUMULATING is not stored; it is implied by a non-zero counter while not
//! jammed. The parameters captured on confirmation are those active on the
//! confirming tick, not on the first low-speed tick.

use crate::fleet::average_speed;
use crate::models::params::ParameterSet;
use crate::models::vehicle::Vehicle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Thresholds for jam detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JamConfig {
    /// Minimum vehicle count for the road to be considered dense
    pub density_threshold: usize,

    /// Average speed strictly below this counts as low
    pub speed_threshold: f64,

    /// Consecutive qualifying ticks needed to confirm a jam
    pub detection_window_ticks: u32,
}

impl Default for JamConfig {
    fn default() -> Self {
        Self {
            density_threshold: 10,
            speed_threshold: 1.5,
            // three seconds at 60 frames per second
            detection_window_ticks: 180,
        }
    }
}

/// Derived state of the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JamPhase {
    Normal,
    Accumulating,
    Jammed,
}

impl fmt::Display for JamPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JamPhase::Normal => "normal",
            JamPhase::Accumulating => "accumulating",
            JamPhase::Jammed => "jammed",
        };
        f.write_str(name)
    }
}

/// Jam flag, low-speed streak counter and the captured configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JamState {
    is_jammed: bool,
    sustained_low_speed_ticks: u32,
    captured_parameters: Option<ParameterSet>,
}

impl JamState {
    pub fn is_jammed(&self) -> bool {
        self.is_jammed
    }

    pub fn sustained_low_speed_ticks(&self) -> u32 {
        self.sustained_low_speed_ticks
    }

    /// Parameters in effect when the current jam was confirmed
    pub fn captured_parameters(&self) -> Option<&ParameterSet> {
        self.captured_parameters.as_ref()
    }

    pub fn phase(&self) -> JamPhase {
        if self.is_jammed {
            JamPhase::Jammed
        } else if self.sustained_low_speed_ticks > 0 {
            JamPhase::Accumulating
        } else {
            JamPhase::Normal
        }
    }
}

/// Summary emitted when a jam is confirmed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JamReport {
    pub parameters: ParameterSet,
    pub vehicle_count: usize,
    pub average_speed: f64,
}

impl fmt::Display for JamReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Traffic jam detected!")?;
        writeln!(f, "Parameters that led to the jam:")?;
        for (key, value) in self.parameters.entries() {
            writeln!(f, "  {}: {:.2}", key.label(), value)?;
        }
        writeln!(f, "Vehicles on road: {}", self.vehicle_count)?;
        write!(f, "Average speed: {:.2}", self.average_speed)
    }
}

/// Outcome of one observation
#[derive(Debug, Clone, PartialEq)]
pub enum JamTransition {
    /// No change of the jam flag
    None,
    /// Jam newly confirmed on this tick
    Confirmed(JamReport),
    /// Previously confirmed jam dissolved on this tick
    Cleared,
}

/// Jam detection state machine
///
/// # Example
/// ```
/// use traffic_flow_core_rs::jam::{JamConfig, JamDetector, JamPhase};
/// use traffic_flow_core_rs::ParameterSet;
///
/// let mut detector = JamDetector::new(JamConfig::default());
/// detector.observe(&[], &ParameterSet::default());
/// assert_eq!(detector.state().phase(), JamPhase::Normal);
/// ```
#[derive(Debug, Clone)]
pub struct JamDetector {
    config: JamConfig,
    state: JamState,
}

impl JamDetector {
    pub fn new(config: JamConfig) -> Self {
        Self {
            config,
            state: JamState::default(),
        }
    }

    pub fn config(&self) -> &JamConfig {
        &self.config
    }

    pub fn state(&self) -> &JamState {
        &self.state
    }

    /// Evaluate one tick against the live fleet
    ///
    /// `params` is the configuration active on this tick; it is copied only
    /// when a jam is confirmed.
    pub fn observe(&mut self, fleet: &[Vehicle], params: &ParameterSet) -> JamTransition {
        if fleet.is_empty() || fleet.len() < self.config.density_threshold {
            return self.recover();
        }

        let average = match average_speed(fleet) {
            Some(avg) if avg < self.config.speed_threshold => avg,
            _ => return self.recover(),
        };

        self.state.sustained_low_speed_ticks =
            self.state.sustained_low_speed_ticks.saturating_add(1);

        if self.state.sustained_low_speed_ticks >= self.config.detection_window_ticks
            && !self.state.is_jammed
        {
            self.state.is_jammed = true;
            self.state.captured_parameters = Some(*params);
            return JamTransition::Confirmed(JamReport {
                parameters: *params,
                vehicle_count: fleet.len(),
                average_speed: average,
            });
        }

        JamTransition::None
    }

    /// Force NORMAL regardless of the current fleet
    pub fn reset(&mut self) {
        self.state = JamState::default();
    }

    fn recover(&mut self) -> JamTransition {
        self.state.sustained_low_speed_ticks = 0;
        if self.state.is_jammed {
            self.state.is_jammed = false;
            self.state.captured_parameters = None;
            JamTransition::Cleared
        } else {
            JamTransition::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::DriverProfile;

    fn fleet(count: usize, speed: f64) -> Vec<Vehicle> {
        let driver = DriverProfile::from_params(&ParameterSet::default(), 5.0);
        (0..count)
            .map(|i| Vehicle::new(i as u64 + 1, 1000.0 - 50.0 * i as f64, speed, driver))
            .collect()
    }

    #[test]
    fn test_sparse_fleet_never_accumulates() {
        let mut detector = JamDetector::new(JamConfig::default());
        for _ in 0..500 {
            detector.observe(&fleet(9, 0.0), &ParameterSet::default());
        }
        assert_eq!(detector.state().phase(), JamPhase::Normal);
    }

    #[test]
    fn test_zero_density_threshold_treats_empty_as_sparse() {
        let config = JamConfig {
            density_threshold: 0,
            ..JamConfig::default()
        };
        let mut detector = JamDetector::new(config);
        detector.observe(&[], &ParameterSet::default());
        assert_eq!(detector.state().sustained_low_speed_ticks(), 0);
    }

    #[test]
    fn test_speed_exactly_at_threshold_is_recovered() {
        let mut detector = JamDetector::new(JamConfig::default());
        detector.observe(&fleet(12, 1.0), &ParameterSet::default());
        assert_eq!(detector.state().phase(), JamPhase::Accumulating);
        detector.observe(&fleet(12, 1.5), &ParameterSet::default());
        assert_eq!(detector.state().phase(), JamPhase::Normal);
    }

    #[test]
    fn test_report_lists_every_parameter() {
        let report = JamReport {
            parameters: ParameterSet::default(),
            vehicle_count: 12,
            average_speed: 1.0,
        };
        let text = report.to_string();
        assert!(text.contains("Spawn probability: 0.30"));
        assert!(text.contains("Reaction time: 1.50"));
        assert!(text.contains("Vehicles on road: 12"));
        assert!(text.ends_with("Average speed: 1.00"));
    }
}
