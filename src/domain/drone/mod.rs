//! Drone aggregate

pub mod model;

pub use model::{Drone, DroneFilter, DroneStatus};
