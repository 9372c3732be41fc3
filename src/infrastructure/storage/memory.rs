//! In-memory key-value storage

use dashmap::DashMap;

use super::KeyValueStore;
use crate::shared::StorageError;

/// In-memory storage for development and testing
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    slots: DashMap<String, String>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).map(|v| v.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("utm_theme").unwrap(), None);

        store.set("utm_theme", "dark").unwrap();
        assert_eq!(store.get("utm_theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.len(), 1);

        store.remove("utm_theme").unwrap();
        store.remove("utm_theme").unwrap();
        assert!(store.is_empty());
    }
}
