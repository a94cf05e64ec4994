//! Per-tick simulation events
//!
//! Events describe what changed during one tick so an outer surface can
//! update its display or print notifications. They are handed out with the
//! tick's result and not retained afterwards.
//!
//! # Example
//!
//! ```rust
//! use traffic_flow_core_rs::models::Event;
//!
//! let event = Event::VehicleSpawned {
//!     tick: 10,
//!     vehicle_id: 4,
//!     desired_speed: 3.2,
//! };
//!
//! assert_eq!(event.tick(), 10);
//! assert_eq!(event.event_type(), "VehicleSpawned");
//! ```

use crate::jam::JamReport;

/// Simulation event, stamped with the tick it occurred on
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Vehicle entered at the start of the road
    VehicleSpawned {
        tick: u64,
        vehicle_id: u64,
        desired_speed: f64,
    },

    /// Vehicle passed the end of the road and was removed
    VehicleExited {
        tick: u64,
        vehicle_id: u64,
        position: f64,
    },

    /// Sustained low-speed, high-density condition confirmed
    JamConfirmed { tick: u64, report: JamReport },

    /// Confirmed jam dissolved
    JamCleared { tick: u64 },
}

impl Event {
    /// Get the tick number when this event occurred
    pub fn tick(&self) -> u64 {
        match self {
            Event::VehicleSpawned { tick, .. } => *tick,
            Event::VehicleExited { tick, .. } => *tick,
            Event::JamConfirmed { tick, .. } => *tick,
            Event::JamCleared { tick } => *tick,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::VehicleSpawned { .. } => "VehicleSpawned",
            Event::VehicleExited { .. } => "VehicleExited",
            Event::JamConfirmed { .. } => "JamConfirmed",
            Event::JamCleared { .. } => "JamCleared",
        }
    }
}
