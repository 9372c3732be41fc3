//! In-memory repository implementation

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Entity, Repository};

/// In-memory repository for development and testing.
///
/// Records keep the order in which they were first created; updates do not
/// move a record.
pub struct InMemoryRepository<T: Entity> {
    records: DashMap<String, (u64, T)>,
    sequence: AtomicU64,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Build a repository pre-filled with `records` (ids must be set).
    pub fn seeded(records: impl IntoIterator<Item = T>) -> Self {
        let repo = Self::new();
        for record in records {
            let seq = repo.sequence.fetch_add(1, Ordering::SeqCst);
            repo.records.insert(record.id().to_string(), (seq, record));
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<T>> {
        Ok(self.records.get(id).map(|entry| entry.1.clone()))
    }

    async fn list(&self) -> DomainResult<Vec<T>> {
        let mut all: Vec<(u64, T)> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|(seq, _)| *seq);
        Ok(all.into_iter().map(|(_, record)| record).collect())
    }

    async fn create(&self, mut entity: T) -> DomainResult<T> {
        if entity.id().is_empty() {
            entity.set_id(Uuid::new_v4().to_string());
        }
        let id = entity.id().to_string();
        match self.records.entry(id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "{} with id={}",
                T::NAME,
                id
            ))),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
                slot.insert((seq, entity.clone()));
                debug!("{} created: {}", T::NAME, id);
                Ok(entity)
            }
        }
    }

    async fn update(&self, entity: T) -> DomainResult<T> {
        let Some(mut existing) = self.records.get_mut(entity.id()) else {
            return Err(DomainError::NotFound {
                entity: T::NAME,
                field: "id",
                value: entity.id().to_string(),
            });
        };
        existing.1 = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.records
            .remove(id)
            .map(|_| debug!("{} deleted: {}", T::NAME, id))
            .ok_or_else(|| DomainError::NotFound {
                entity: T::NAME,
                field: "id",
                value: id.to_string(),
            })
    }
}
