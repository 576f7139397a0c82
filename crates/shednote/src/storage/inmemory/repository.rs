//! In-memory repository implementation.
//!
//! Mirrors the SQLite backend's ownership scoping and ordering semantics
//! with an in-process map, filtering and sorting per query.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use shednote_core::entry::{EntryDraft, PracticeEntry};
use shednote_core::storage::{EntryQuery, EntryRepository, RepositoryError, Result};

/// In-memory repository backed by a `HashMap` behind an async lock.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    entries: RwLock<HashMap<Uuid, PracticeEntry>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: Uuid) -> RepositoryError {
        RepositoryError::NotFound {
            entity_type: "PracticeEntry",
            id: id.to_string(),
        }
    }
}

#[async_trait]
impl EntryRepository for InMemoryRepository {
    async fn get_entry(&self, id: Uuid, owner_id: Uuid) -> Result<Option<PracticeEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&id)
            .filter(|entry| entry.owner_id == owner_id)
            .cloned())
    }

    async fn list_entries(&self, query: &EntryQuery) -> Result<Vec<PracticeEntry>> {
        let entries = self.entries.read().await;
        let mut matching: Vec<PracticeEntry> = entries
            .values()
            .filter(|entry| {
                entry.owner_id == query.owner_id
                    && query
                        .played_since
                        .is_none_or(|cutoff| entry.played_on >= cutoff)
            })
            .cloned()
            .collect();

        query.sort.sort(&mut matching);
        Ok(matching)
    }

    async fn create_entry(&self, entry: &PracticeEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn update_entry(
        &self,
        id: Uuid,
        owner_id: Uuid,
        draft: &EntryDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&id).filter(|entry| entry.owner_id == owner_id) {
            Some(entry) => {
                entry.apply_draft(draft, updated_at);
                Ok(())
            }
            None => Err(Self::not_found(id)),
        }
    }

    async fn delete_entry(&self, id: Uuid, owner_id: Uuid) -> Result<()> {
        let mut entries = self.entries.write().await;
        match entries.get(&id) {
            Some(entry) if entry.owner_id == owner_id => {
                entries.remove(&id);
                Ok(())
            }
            _ => Err(Self::not_found(id)),
        }
    }
}
