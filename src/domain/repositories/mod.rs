//! Repository traits for the domain layer
//!
//! Contains:
//! - `Entity`: what a record must expose to be stored
//! - `Repository<T>`: backend-agnostic fetch/list/create/update/delete
//! - `RepositoryProvider`: unified access to the per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use async_trait::async_trait;

use super::drone::{Drone, DroneFilter};
use super::flight::{FlightApplication, FlightFilter};
use super::pilot::Pilot;
use super::zone::NoFlyZone;
use crate::shared::errors::DomainError;
use crate::shared::{PaginatedResult, PaginationParams};

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// A record addressable by a string id.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable entity name used in error messages
    const NAME: &'static str;

    fn id(&self) -> &str;

    /// Used by `create` when the caller leaves the id empty.
    fn set_id(&mut self, id: String);
}

#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<T>>;

    /// All records in insertion order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Store a new record. An empty id is replaced by a generated one;
    /// an id already in use is a conflict.
    async fn create(&self, entity: T) -> DomainResult<T>;

    /// Replace an existing record.
    async fn update(&self, entity: T) -> DomainResult<T>;

    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Like `find_by_id`, but a missing record is an error.
    async fn get(&self, id: &str) -> DomainResult<T> {
        self.find_by_id(id).await?.ok_or_else(|| DomainError::NotFound {
            entity: T::NAME,
            field: "id",
            value: id.to_string(),
        })
    }
}

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let drone = repos.drones().get("1").await?;
///     let zones = repos.zones().list().await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn drones(&self) -> &dyn Repository<Drone>;
    fn pilots(&self) -> &dyn Repository<Pilot>;
    fn flights(&self) -> &dyn Repository<FlightApplication>;
    fn zones(&self) -> &dyn Repository<NoFlyZone>;
}

/// Filtered, paginated drone listing on top of any repository.
pub async fn search_drones(
    repo: &dyn Repository<Drone>,
    filter: &DroneFilter,
    page: PaginationParams,
) -> DomainResult<PaginatedResult<Drone>> {
    let matching = repo
        .list()
        .await?
        .into_iter()
        .filter(|d| filter.matches(d))
        .collect();
    Ok(PaginatedResult::from_filtered(matching, page))
}

/// Filtered, paginated flight application listing on top of any repository.
pub async fn search_flights(
    repo: &dyn Repository<FlightApplication>,
    filter: &FlightFilter,
    page: PaginationParams,
) -> DomainResult<PaginatedResult<FlightApplication>> {
    let matching = repo
        .list()
        .await?
        .into_iter()
        .filter(|f| filter.matches(f))
        .collect();
    Ok(PaginatedResult::from_filtered(matching, page))
}
