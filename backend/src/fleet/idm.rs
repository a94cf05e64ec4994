//! Intelligent Driver Model
//!
//! Pure functions over explicit inputs: the same speed, gap, leader speed,
//! driver profile and timestep always give the same next state.
//!
//! ```text
//! a_free = a * (1 - (v / v0)^4)
//! s*     = s0 + max(0, v*T + v*(v - v_lead) / (2*sqrt(a*b)))
//! accel  = a * (a_free/a - (s* / max(gap, 0.1))^2)
//! ```

use crate::models::vehicle::DriverProfile;

/// Floor applied to the gap in the interaction term's divisor
pub const GAP_FLOOR: f64 = 0.1;

/// What a follower sees of the vehicle directly ahead
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderView {
    /// Bumper-to-bumper distance (may be negative after an overlap)
    pub gap: f64,
    pub speed: f64,
}

/// Acceleration on an empty road: approach to the desired speed
pub fn free_road_acceleration(speed: f64, driver: &DriverProfile) -> f64 {
    driver.max_acceleration * (1.0 - (speed / driver.desired_speed).powi(4))
}

/// Dynamic safe distance `s*` towards a leader moving at `leader_speed`
pub fn desired_gap(speed: f64, leader_speed: f64, driver: &DriverProfile) -> f64 {
    let braking = 2.0 * (driver.max_acceleration * driver.comfortable_deceleration).sqrt();
    let dynamic = speed * driver.reaction_time + speed * (speed - leader_speed) / braking;
    driver.min_gap + dynamic.max(0.0)
}

/// IDM acceleration; `leader` is `None` for the head of the fleet
pub fn acceleration(speed: f64, driver: &DriverProfile, leader: Option<LeaderView>) -> f64 {
    let free = free_road_acceleration(speed, driver);
    match leader {
        None => free,
        Some(ahead) => {
            let ratio = desired_gap(speed, ahead.speed, driver) / ahead.gap.max(GAP_FLOOR);
            free - driver.max_acceleration * ratio.powi(2)
        }
    }
}

/// Explicit Euler step
///
/// Speed is clamped into `[0, desired_speed]`; position advances by
/// `speed * dt * tick_rate_scale` using the new speed. Returns
/// `(position, speed)`.
pub fn integrate(
    position: f64,
    speed: f64,
    acceleration: f64,
    desired_speed: f64,
    dt: f64,
    tick_rate_scale: f64,
) -> (f64, f64) {
    let new_speed = (speed + acceleration * dt).min(desired_speed).max(0.0);
    (position + new_speed * dt * tick_rate_scale, new_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(desired_speed: f64) -> DriverProfile {
        DriverProfile {
            desired_speed,
            max_acceleration: 2.0,
            comfortable_deceleration: 2.0,
            min_gap: 2.0,
            reaction_time: 1.5,
        }
    }

    #[test]
    fn test_free_road_zero_at_desired_speed() {
        assert_eq!(free_road_acceleration(5.0, &driver(5.0)), 0.0);
        assert_eq!(free_road_acceleration(0.0, &driver(5.0)), 2.0);
    }

    #[test]
    fn test_leader_uses_free_road_term() {
        let d = driver(5.0);
        assert_eq!(acceleration(3.0, &d, None), free_road_acceleration(3.0, &d));
    }

    #[test]
    fn test_follower_is_free_term_minus_interaction() {
        let d = driver(5.0);
        let ahead = LeaderView { gap: 20.0, speed: 2.0 };
        let s_star = desired_gap(3.0, 2.0, &d);
        let expected = free_road_acceleration(3.0, &d) - 2.0 * (s_star / 20.0).powi(2);
        assert!((acceleration(3.0, &d, Some(ahead)) - expected).abs() < 1e-12);
        // a distant leader barely matters
        let far = LeaderView { gap: 1.0e6, speed: 0.0 };
        assert!((acceleration(3.0, &d, Some(far)) - free_road_acceleration(3.0, &d)).abs() < 1e-6);
    }

    #[test]
    fn test_desired_gap_never_below_min_gap() {
        // much faster leader would make the dynamic term negative
        assert_eq!(desired_gap(1.0, 50.0, &driver(5.0)), 2.0);
    }

    #[test]
    fn test_gap_floor_bounds_penalty() {
        let d = driver(5.0);
        let touching = acceleration(0.0, &d, Some(LeaderView { gap: 0.0, speed: 0.0 }));
        let overlapping = acceleration(0.0, &d, Some(LeaderView { gap: -30.0, speed: 0.0 }));
        assert_eq!(touching, overlapping);
        // 2 * (1 - (2 / 0.1)^2)
        assert!((touching - (2.0 * (1.0 - 400.0))).abs() < 1e-9);
    }

    #[test]
    fn test_integrate_clamps_speed() {
        let (_, up) = integrate(0.0, 4.9, 100.0, 5.0, 1.0 / 60.0, 60.0);
        assert_eq!(up, 5.0);
        let (pos, down) = integrate(10.0, 0.1, -100.0, 5.0, 1.0 / 60.0, 60.0);
        assert_eq!(down, 0.0);
        assert_eq!(pos, 10.0);
    }
}
