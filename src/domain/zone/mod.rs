//! No-fly zone aggregate

pub mod model;

pub use model::{NoFlyZone, ZoneKind, ZoneStatus};
