//! Flight application aggregate

pub mod model;
pub mod planning;

pub use model::{
    FlightApplication, FlightFilter, FlightPoint, FlightStatus, FlightType, PointType,
};
pub use planning::{FlightDraft, WaypointCollector, DEFAULT_WAYPOINT_ALTITUDE};
