pub mod drone;
pub mod flight;
pub mod geo;
pub mod pilot;
pub mod ports;
pub mod repositories;
pub mod user;
pub mod zone;

// Re-export commonly used types
pub use drone::{Drone, DroneFilter, DroneStatus};
pub use flight::{
    FlightApplication, FlightDraft, FlightFilter, FlightPoint, FlightStatus, FlightType,
    PointType, WaypointCollector,
};
pub use geo::{LatLng, Position};
pub use pilot::{Pilot, PilotStatus};
pub use ports::{WeatherData, WeatherError, WeatherProvider};
pub use repositories::{
    search_drones, search_flights, DomainResult, Entity, Repository, RepositoryProvider,
};
pub use user::{CreateUserDto, RoleRequirement, User, UserRole};
pub use zone::{NoFlyZone, ZoneKind, ZoneStatus};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
