//! Repository implementations
//!
//! The mock provider is the only backend today: in-memory collections seeded
//! with fixed demonstration data.

mod memory;
pub mod seed;

pub use memory::InMemoryRepository;

use crate::domain::{Drone, FlightApplication, NoFlyZone, Pilot, Repository, RepositoryProvider};

pub struct MockRepositoryProvider {
    drones: InMemoryRepository<Drone>,
    pilots: InMemoryRepository<Pilot>,
    flights: InMemoryRepository<FlightApplication>,
    zones: InMemoryRepository<NoFlyZone>,
}

impl MockRepositoryProvider {
    /// Provider pre-filled with the demonstration data set.
    pub fn seeded() -> Self {
        Self {
            drones: InMemoryRepository::seeded(seed::drones()),
            pilots: InMemoryRepository::seeded(seed::pilots()),
            flights: InMemoryRepository::seeded(seed::flights()),
            zones: InMemoryRepository::seeded(seed::zones()),
        }
    }

    pub fn empty() -> Self {
        Self {
            drones: InMemoryRepository::new(),
            pilots: InMemoryRepository::new(),
            flights: InMemoryRepository::new(),
            zones: InMemoryRepository::new(),
        }
    }
}

impl RepositoryProvider for MockRepositoryProvider {
    fn drones(&self) -> &dyn Repository<Drone> {
        &self.drones
    }

    fn pilots(&self) -> &dyn Repository<Pilot> {
        &self.pilots
    }

    fn flights(&self) -> &dyn Repository<FlightApplication> {
        &self.flights
    }

    fn zones(&self) -> &dyn Repository<NoFlyZone> {
        &self.zones
    }
}
