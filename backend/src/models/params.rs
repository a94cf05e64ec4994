//! Simulation parameters
//!
//! A `ParameterSet` is the bag of constants the outer surface hands to the
//! core before each tick: the spawn rate and the driver profile that newly
//! spawned vehicles copy. Values are validated once at the configuration
//! boundary (`Simulation::configure`), never inside the dynamics update.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when a parameter set is rejected
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Parameter '{name}' must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("Spawn probability must lie in [0, 1], got {0}")]
    SpawnProbabilityOutOfRange(f64),

    #[error("Desired speed range must be strictly positive, got min_speed={min_speed}")]
    NonPositiveSpeed { min_speed: f64 },

    #[error("Speed range is inverted: min_speed={min_speed} > max_speed={max_speed}")]
    InvertedSpeedRange { min_speed: f64, max_speed: f64 },

    #[error("Parameter '{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("Parameter '{name}' must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("Unknown parameter '{0}'")]
    UnknownKey(String),
}

/// Names of the tunable parameters, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKey {
    SpawnProbability,
    MinSpeed,
    MaxSpeed,
    MaxAcceleration,
    ComfortableDeceleration,
    MinGap,
    ReactionTime,
}

impl ParameterKey {
    pub const ALL: [ParameterKey; 7] = [
        ParameterKey::SpawnProbability,
        ParameterKey::MinSpeed,
        ParameterKey::MaxSpeed,
        ParameterKey::MaxAcceleration,
        ParameterKey::ComfortableDeceleration,
        ParameterKey::MinGap,
        ParameterKey::ReactionTime,
    ];

    /// Stable snake_case key, matching the serialized field name
    pub fn name(self) -> &'static str {
        match self {
            ParameterKey::SpawnProbability => "spawn_probability",
            ParameterKey::MinSpeed => "min_speed",
            ParameterKey::MaxSpeed => "max_speed",
            ParameterKey::MaxAcceleration => "max_acceleration",
            ParameterKey::ComfortableDeceleration => "comfortable_deceleration",
            ParameterKey::MinGap => "min_gap",
            ParameterKey::ReactionTime => "reaction_time",
        }
    }

    /// Human-readable label for reports
    pub fn label(self) -> &'static str {
        match self {
            ParameterKey::SpawnProbability => "Spawn probability",
            ParameterKey::MinSpeed => "Min speed",
            ParameterKey::MaxSpeed => "Max speed",
            ParameterKey::MaxAcceleration => "Acceleration",
            ParameterKey::ComfortableDeceleration => "Deceleration",
            ParameterKey::MinGap => "Min gap",
            ParameterKey::ReactionTime => "Reaction time",
        }
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParameterKey {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| ParameterError::UnknownKey(s.to_string()))
    }
}

/// Parameter configuration in effect for one tick
///
/// # Example
/// ```
/// use traffic_flow_core_rs::ParameterSet;
///
/// let params = ParameterSet::default();
/// assert_eq!(params.spawn_probability, 0.3);
/// assert!(params.validate().is_ok());
///
/// let broken = ParameterSet { min_speed: 6.0, ..params };
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// Per-tick probability of a spawn when the entry zone is clear
    pub spawn_probability: f64,

    /// Lower bound for a new vehicle's desired speed
    pub min_speed: f64,

    /// Upper bound for a new vehicle's desired speed
    pub max_speed: f64,

    /// IDM maximum acceleration `a`
    pub max_acceleration: f64,

    /// IDM comfortable deceleration `b`
    pub comfortable_deceleration: f64,

    /// Static jam distance `s0`
    pub min_gap: f64,

    /// Safe time headway `T`
    pub reaction_time: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            spawn_probability: 0.3,
            min_speed: 2.0,
            max_speed: 5.0,
            max_acceleration: 2.0,
            comfortable_deceleration: 2.0,
            min_gap: 2.0,
            reaction_time: 1.5,
        }
    }
}

impl ParameterSet {
    /// Read a parameter by key
    pub fn get(&self, key: ParameterKey) -> f64 {
        match key {
            ParameterKey::SpawnProbability => self.spawn_probability,
            ParameterKey::MinSpeed => self.min_speed,
            ParameterKey::MaxSpeed => self.max_speed,
            ParameterKey::MaxAcceleration => self.max_acceleration,
            ParameterKey::ComfortableDeceleration => self.comfortable_deceleration,
            ParameterKey::MinGap => self.min_gap,
            ParameterKey::ReactionTime => self.reaction_time,
        }
    }

    /// Overwrite a parameter by key (unvalidated)
    pub fn set(&mut self, key: ParameterKey, value: f64) {
        let slot = match key {
            ParameterKey::SpawnProbability => &mut self.spawn_probability,
            ParameterKey::MinSpeed => &mut self.min_speed,
            ParameterKey::MaxSpeed => &mut self.max_speed,
            ParameterKey::MaxAcceleration => &mut self.max_acceleration,
            ParameterKey::ComfortableDeceleration => &mut self.comfortable_deceleration,
            ParameterKey::MinGap => &mut self.min_gap,
            ParameterKey::ReactionTime => &mut self.reaction_time,
        };
        *slot = value;
    }

    /// All parameters with their keys, in display order
    pub fn entries(&self) -> impl Iterator<Item = (ParameterKey, f64)> + '_ {
        ParameterKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Check every range rule
    ///
    /// Rejects anything that would make the dynamics ill-defined, most
    /// importantly a desired-speed range that can produce 0 (the free-road
    /// term divides by the desired speed).
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (key, value) in self.entries() {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite {
                    name: key.name(),
                    value,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ParameterError::SpawnProbabilityOutOfRange(
                self.spawn_probability,
            ));
        }

        if self.min_speed <= 0.0 {
            return Err(ParameterError::NonPositiveSpeed {
                min_speed: self.min_speed,
            });
        }

        if self.min_speed > self.max_speed {
            return Err(ParameterError::InvertedSpeedRange {
                min_speed: self.min_speed,
                max_speed: self.max_speed,
            });
        }

        for key in [
            ParameterKey::MaxAcceleration,
            ParameterKey::ComfortableDeceleration,
        ] {
            let value = self.get(key);
            if value <= 0.0 {
                return Err(ParameterError::NonPositive {
                    name: key.name(),
                    value,
                });
            }
        }

        for key in [ParameterKey::MinGap, ParameterKey::ReactionTime] {
            let value = self.get(key);
            if value < 0.0 {
                return Err(ParameterError::Negative {
                    name: key.name(),
                    value,
                });
            }
        }

        Ok(())
    }
}

/// Allowed range of each parameter on the interactive control surface
///
/// The core never clamps implicitly; a UI or CLI that accepts raw values
/// calls [`ParameterBounds::clamp`] before `configure`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterBounds;

impl ParameterBounds {
    /// Inclusive `(min, max)` range for `key`
    pub fn range(key: ParameterKey) -> (f64, f64) {
        match key {
            ParameterKey::SpawnProbability => (0.0, 1.0),
            ParameterKey::MinSpeed => (0.0, 5.0),
            ParameterKey::MaxSpeed => (2.0, 10.0),
            ParameterKey::MaxAcceleration => (0.5, 5.0),
            ParameterKey::ComfortableDeceleration => (0.5, 5.0),
            ParameterKey::MinGap => (1.0, 5.0),
            ParameterKey::ReactionTime => (0.5, 3.0),
        }
    }

    /// Clamp every parameter into its control range
    ///
    /// NaN values are left untouched so that validation still rejects them.
    pub fn clamp(params: &ParameterSet) -> ParameterSet {
        let mut clamped = *params;
        for key in ParameterKey::ALL {
            let (min, max) = Self::range(key);
            clamped.set(key, params.get(key).clamp(min, max));
        }
        clamped
    }
}
