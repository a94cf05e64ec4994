//! Fleet model: spawn, car-following update, eviction
//!
//! # Ordering
//!
//! `vehicles[0]` is the furthest-advanced vehicle and the last element is the
//! most recent arrival. New vehicles are only ever appended at position 0,
//! which is behind everyone else, and the IDM interaction term slows a
//! follower down as it closes on its leader. Nothing sorts the fleet; order is
//! a soft invariant of the dynamics.
//!
//! With [`OrderGuard::Clamp`] a follower that would pass its leader is held at
//! the leader's position instead. This deviates from the reference dynamics
//! and is off by default.

pub mod idm;

use crate::models::params::ParameterSet;
use crate::models::vehicle::{Color, DriverProfile, Vehicle};
use crate::rng::RandomSource;
use idm::LeaderView;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Handling of a follower overtaking its leader during an update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderGuard {
    /// Reference behavior: log the inversion and let it stand
    #[default]
    Off,
    /// Cap the follower's position at its leader's
    Clamp,
}

/// Geometry of the simulated road segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    /// Vehicles whose position exceeds this are evicted
    pub length: f64,

    /// Bumper-to-bumper length of every vehicle
    pub vehicle_length: f64,

    /// Position units advanced per unit of speed per simulated second
    pub tick_rate_scale: f64,

    pub order_guard: OrderGuard,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            length: 1200.0,
            vehicle_length: 40.0,
            tick_rate_scale: 60.0,
            order_guard: OrderGuard::Off,
        }
    }
}

/// Ordered collection of vehicles on one lane
///
/// # Example
/// ```
/// use traffic_flow_core_rs::fleet::{FleetModel, RoadConfig};
/// use traffic_flow_core_rs::rng::RngManager;
/// use traffic_flow_core_rs::ParameterSet;
///
/// let mut fleet = FleetModel::new(RoadConfig::default());
/// let params = ParameterSet { spawn_probability: 1.0, ..ParameterSet::default() };
/// let mut rng = RngManager::new(7);
///
/// assert!(fleet.spawn(&params, &mut rng).is_some());
/// // entry zone now blocked
/// assert!(fleet.spawn(&params, &mut rng).is_none());
///
/// fleet.update(1.0 / 60.0);
/// assert!(fleet.vehicles()[0].position() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct FleetModel {
    road: RoadConfig,
    vehicles: Vec<Vehicle>,
    next_vehicle_id: u64,
}

impl FleetModel {
    /// Empty road
    pub fn new(road: RoadConfig) -> Self {
        Self {
            road,
            vehicles: Vec::new(),
            next_vehicle_id: 1,
        }
    }

    /// Fleet with a prepared vehicle sequence, leader first
    ///
    /// The caller is responsible for the ordering.
    pub fn from_vehicles(road: RoadConfig, vehicles: Vec<Vehicle>) -> Self {
        let next_vehicle_id = vehicles.iter().map(Vehicle::id).max().map_or(1, |id| id + 1);
        Self {
            road,
            vehicles,
            next_vehicle_id,
        }
    }

    pub fn road(&self) -> &RoadConfig {
        &self.road
    }

    /// Vehicles in leader-to-follower order
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Furthest-advanced vehicle
    pub fn leader(&self) -> Option<&Vehicle> {
        self.vehicles.first()
    }

    /// Most recently spawned vehicle
    pub fn tail(&self) -> Option<&Vehicle> {
        self.vehicles.last()
    }

    /// Mean current speed, `None` on an empty road
    pub fn average_speed(&self) -> Option<f64> {
        average_speed(&self.vehicles)
    }

    /// Whether positions are non-increasing from leader to tail
    pub fn is_ordered(&self) -> bool {
        self.vehicles
            .windows(2)
            .all(|pair| pair[0].position() >= pair[1].position())
    }

    /// Remove every vehicle
    pub fn clear(&mut self) {
        self.vehicles.clear();
    }

    /// True when a vehicle can enter without overlapping the tail
    pub fn entry_zone_clear(&self) -> bool {
        self.tail()
            .map_or(true, |tail| tail.position() > 2.0 * self.road.vehicle_length)
    }

    /// Attempt one spawn at the entry point
    ///
    /// Blocked entry zones return `None` without consuming a draw. Otherwise a
    /// Bernoulli trial with `params.spawn_probability` decides; on success the
    /// new vehicle enters at its desired speed, drawn uniformly from
    /// `[min_speed, max_speed]`, and is appended at the tail.
    pub fn spawn<R>(&mut self, params: &ParameterSet, rng: &mut R) -> Option<&Vehicle>
    where
        R: RandomSource + ?Sized,
    {
        if !self.entry_zone_clear() || !rng.chance(params.spawn_probability) {
            return None;
        }

        let desired_speed = rng.uniform(params.min_speed, params.max_speed);
        let color = Color {
            r: rng.uniform_u8(50, 255),
            g: rng.uniform_u8(50, 255),
            b: rng.uniform_u8(50, 255),
        };

        let id = self.next_vehicle_id;
        self.next_vehicle_id += 1;

        let driver = DriverProfile::from_params(params, desired_speed);
        self.vehicles
            .push(Vehicle::new(id, 0.0, desired_speed, driver).with_color(color));
        self.vehicles.last()
    }

    /// Advance every vehicle by `dt` and evict those past the road end
    ///
    /// Vehicles are processed leader first, so each follower reacts to its
    /// leader's already-updated state. Returns the evicted vehicles in fleet
    /// order.
    pub fn update(&mut self, dt: f64) -> Vec<Vehicle> {
        let road = self.road;

        for i in 0..self.vehicles.len() {
            let (ahead, rest) = self.vehicles.split_at_mut(i);
            let vehicle = &mut rest[0];
            let leader = ahead.last();

            let view = leader.map(|lead| LeaderView {
                gap: lead.position() - vehicle.position() - road.vehicle_length,
                speed: lead.speed(),
            });

            let accel = idm::acceleration(vehicle.speed(), vehicle.driver(), view);
            let (mut position, speed) = idm::integrate(
                vehicle.position(),
                vehicle.speed(),
                accel,
                vehicle.desired_speed(),
                dt,
                road.tick_rate_scale,
            );

            if let Some(lead) = leader {
                if position > lead.position() {
                    warn!(
                        vehicle_id = vehicle.id(),
                        leader_id = lead.id(),
                        position,
                        leader_position = lead.position(),
                        "follower passed its leader"
                    );
                    if road.order_guard == OrderGuard::Clamp {
                        position = lead.position();
                    }
                }
            }

            vehicle.set_kinematics(position, speed);
        }

        let (kept, exited): (Vec<Vehicle>, Vec<Vehicle>) = std::mem::take(&mut self.vehicles)
            .into_iter()
            .partition(|v| v.position() <= road.length);
        self.vehicles = kept;
        exited
    }
}

/// Mean speed of a vehicle slice, `None` when empty
pub fn average_speed(vehicles: &[Vehicle]) -> Option<f64> {
    if vehicles.is_empty() {
        return None;
    }
    Some(vehicles.iter().map(Vehicle::speed).sum::<f64>() / vehicles.len() as f64)
}
