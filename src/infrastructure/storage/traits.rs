//! Storage trait definitions

use crate::shared::StorageError;

/// Durable string slots keyed by name.
///
/// Each slot has exactly one writer in the application: the session store
/// owns the identity slot and the theme store owns the theme slot.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
