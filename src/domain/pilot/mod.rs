//! Pilot aggregate

pub mod model;

pub use model::{Pilot, PilotStatus};
