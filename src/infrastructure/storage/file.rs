//! JSON-file key-value storage
//!
//! All slots live in a single JSON object on disk. Every mutation rewrites
//! the file through a temporary sibling and a rename, so a crash mid-write
//! leaves either the old or the new contents.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};

use super::KeyValueStore;
use crate::shared::StorageError;

pub struct FileKeyValueStore {
    path: PathBuf,
    slots: Mutex<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A file that exists but cannot be parsed is treated as empty and will
    /// be overwritten on the next write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let slots = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => map,
                Err(e) => {
                    warn!("Ignoring unreadable storage file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Storage opened at {} ({} slots)", path.display(), slots.len());
        Ok(Self {
            path,
            slots: Mutex::new(slots),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, slots: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(slots)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.lock();
        let mut candidate = slots.clone();
        candidate.insert(key.to_string(), value.to_string());
        self.flush(&candidate)?;
        *slots = candidate;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut slots = self.lock();
        if !slots.contains_key(key) {
            return Ok(());
        }
        let mut candidate = slots.clone();
        candidate.remove(key);
        self.flush(&candidate)?;
        *slots = candidate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileKeyValueStore::open(&path).unwrap();
        store.set("utm_theme", "auto").unwrap();
        store.set("utm_user", "{\"id\":\"1\"}").unwrap();
        store.remove("utm_user").unwrap();
        drop(store);

        let reopened = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(reopened.get("utm_theme").unwrap().as_deref(), Some("auto"));
        assert_eq!(reopened.get("utm_user").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let store = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(store.get("utm_theme").unwrap(), None);

        store.set("utm_theme", "dark").unwrap();
        let reopened = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(reopened.get("utm_theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_failed_write_leaves_slots_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = FileKeyValueStore::open(&path).unwrap();
        store.set("utm_theme", "dark").unwrap();

        // Replace the file with a non-empty directory so the rename fails.
        fs::remove_file(&path).unwrap();
        fs::create_dir_all(path.join("x")).unwrap();

        assert!(store.set("utm_user", "{\"id\":\"1\"}").is_err());
        assert_eq!(store.get("utm_user").unwrap(), None);

        assert!(store.remove("utm_theme").is_err());
        assert_eq!(store.get("utm_theme").unwrap().as_deref(), Some("dark"));
    }
}
