//! Domain models for the traffic simulator

pub mod event;
pub mod params;
pub mod vehicle;

// Re-exports
pub use event::Event;
pub use params::{ParameterBounds, ParameterError, ParameterKey, ParameterSet};
pub use vehicle::{Color, DriverProfile, Vehicle};
