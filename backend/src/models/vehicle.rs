//! Vehicle model
//!
//! A vehicle is a point on the road (its front bumper, in domain units) with a
//! current speed and a driver profile frozen at spawn time. Reconfiguring the
//! simulation never touches vehicles already on the road.

use crate::models::params::ParameterSet;
use serde::{Deserialize, Serialize};

/// Driver constants copied from the active `ParameterSet` when a vehicle spawns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriverProfile {
    /// Free-flow target speed; current speed never exceeds it
    pub desired_speed: f64,
    pub max_acceleration: f64,
    pub comfortable_deceleration: f64,
    pub min_gap: f64,
    pub reaction_time: f64,
}

impl DriverProfile {
    /// Profile for a new vehicle with the given desired speed
    pub fn from_params(params: &ParameterSet, desired_speed: f64) -> Self {
        Self {
            desired_speed,
            max_acceleration: params.max_acceleration,
            comfortable_deceleration: params.comfortable_deceleration,
            min_gap: params.min_gap,
            reaction_time: params.reaction_time,
        }
    }
}

/// Display color; has no effect on dynamics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self {
            r: 128,
            g: 128,
            b: 128,
        }
    }
}

/// One car on the road
///
/// # Example
/// ```
/// use traffic_flow_core_rs::{DriverProfile, ParameterSet, Vehicle};
///
/// let driver = DriverProfile::from_params(&ParameterSet::default(), 4.0);
/// let car = Vehicle::new(1, 100.0, 3.5, driver);
/// assert_eq!(car.position(), 100.0);
/// assert_eq!(car.desired_speed(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: u64,
    position: f64,
    speed: f64,
    driver: DriverProfile,
    color: Color,
}

impl Vehicle {
    /// Create a vehicle at an arbitrary state
    pub fn new(id: u64, position: f64, speed: f64, driver: DriverProfile) -> Self {
        Self {
            id,
            position,
            speed,
            driver,
            color: Color::default(),
        }
    }

    /// Replace the display color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Distance travelled from the entry point
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn desired_speed(&self) -> f64 {
        self.driver.desired_speed
    }

    pub fn driver(&self) -> &DriverProfile {
        &self.driver
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn set_kinematics(&mut self, position: f64, speed: f64) {
        self.position = position;
        self.speed = speed;
    }
}
