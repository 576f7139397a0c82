//! Cached entry repository decorator.
//!
//! List results are cached per materialized query and tagged by owner: a
//! successful mutation deletes the owner's whole key family, so a read
//! issued after a write can never observe a pre-mutation snapshot, whatever
//! range/sort combination produced it. Invalidation runs only after the
//! mutation is durably applied and is best-effort - a cache failure is
//! logged, never surfaced, since the worst case is a stale read served
//! until TTL expiry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use shednote_core::cache::{
    deserialize_entries, owner_entries_key, owner_entries_pattern, serialize_entries, Cache,
};
use shednote_core::entry::{EntryDraft, PracticeEntry};
use shednote_core::storage::{EntryQuery, EntryRepository, Result};

/// Cached entry repository decorator.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedEntryRepository<R, C>
where
    R: EntryRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedEntryRepository<R, C>
where
    R: EntryRepository,
    C: Cache,
{
    /// Creates a new cached entry repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for cached list results
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    /// Evicts every cached list variant for the owner. Best-effort: a
    /// failure here must never fail the mutation that triggered it.
    async fn invalidate_owner(&self, owner_id: Uuid) {
        let pattern = owner_entries_pattern(owner_id);
        if let Err(err) = self.cache.delete_pattern(&pattern).await {
            tracing::warn!(
                %owner_id,
                error = %err,
                "Failed to invalidate owner entries cache"
            );
        }
    }
}

#[async_trait]
impl<R, C> EntryRepository for CachedEntryRepository<R, C>
where
    R: EntryRepository + 'static,
    C: Cache + 'static,
{
    async fn get_entry(&self, id: Uuid, owner_id: Uuid) -> Result<Option<PracticeEntry>> {
        // Point reads go straight through; only list results are cached.
        self.repository.get_entry(id, owner_id).await
    }

    async fn list_entries(&self, query: &EntryQuery) -> Result<Vec<PracticeEntry>> {
        let cache_key = owner_entries_key(query);

        // Check cache first
        if let Ok(Some(bytes)) = self.cache.get(&cache_key).await {
            if let Ok(entries) = deserialize_entries(&bytes) {
                tracing::trace!(
                    owner_id = %query.owner_id,
                    key = %cache_key,
                    count = entries.len(),
                    "Cache hit for entry list"
                );
                return Ok(entries);
            }
            // Deserialization failed - treat as cache miss
            tracing::warn!(owner_id = %query.owner_id, "Cache list deserialization failed");
        }

        // Cache miss - fetch from repository
        tracing::trace!(owner_id = %query.owner_id, key = %cache_key, "Cache miss for entry list");
        let entries = self.repository.list_entries(query).await?;

        // Populate cache
        if let Ok(bytes) = serialize_entries(&entries) {
            if let Err(err) = self.cache.set(&cache_key, &bytes, Some(self.ttl)).await {
                tracing::warn!(
                    owner_id = %query.owner_id,
                    error = %err,
                    "Failed to cache entry list"
                );
            }
        }

        Ok(entries)
    }

    async fn create_entry(&self, entry: &PracticeEntry) -> Result<()> {
        // 1. Persist to storage
        self.repository.create_entry(entry).await?;

        // 2. Invalidate all cached list variants for this owner
        self.invalidate_owner(entry.owner_id).await;

        tracing::debug!(entry_id = %entry.id, owner_id = %entry.owner_id, "Entry created");
        Ok(())
    }

    async fn update_entry(
        &self,
        id: Uuid,
        owner_id: Uuid,
        draft: &EntryDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        // 1. Persist to storage; a not-found result returns here and leaves
        //    the cache untouched
        self.repository
            .update_entry(id, owner_id, draft, updated_at)
            .await?;

        // 2. Invalidate all cached list variants for this owner
        self.invalidate_owner(owner_id).await;

        tracing::debug!(entry_id = %id, %owner_id, "Entry updated");
        Ok(())
    }

    async fn delete_entry(&self, id: Uuid, owner_id: Uuid) -> Result<()> {
        // 1. Persist deletion to storage; not-found short-circuits with no
        //    invalidation side effect
        self.repository.delete_entry(id, owner_id).await?;

        // 2. Invalidate all cached list variants for this owner
        self.invalidate_owner(owner_id).await;

        tracing::debug!(entry_id = %id, %owner_id, "Entry deleted");
        Ok(())
    }
}
