//! Infrastructure layer - storage, mock data sources and outbound clients

pub mod repositories;
pub mod storage;
pub mod weather;

pub use repositories::MockRepositoryProvider;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
pub use weather::OpenWeatherClient;
