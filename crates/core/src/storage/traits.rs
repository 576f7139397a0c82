use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entry::{EntryDraft, PracticeEntry};

use super::{EntryQuery, Result};

/// Repository for practice entry operations.
///
/// Every operation is scoped by the owner id. A point read or mutation that
/// does not match both `id` and `owner_id` behaves as not-found, whether or
/// not the row exists under a different owner.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Gets an entry by its ID, scoped to the given owner.
    async fn get_entry(&self, id: Uuid, owner_id: Uuid) -> Result<Option<PracticeEntry>>;

    /// Gets all entries matching a planned query, in query order.
    async fn list_entries(&self, query: &EntryQuery) -> Result<Vec<PracticeEntry>>;

    /// Creates a new entry. The caller constructs the entity with a fresh id,
    /// the bound owner, and system timestamps.
    async fn create_entry(&self, entry: &PracticeEntry) -> Result<()>;

    /// Overwrites the mutable fields of an owned entry plus `updated_at`.
    /// Fails with `NotFound` when no row matches both id and owner.
    async fn update_entry(
        &self,
        id: Uuid,
        owner_id: Uuid,
        draft: &EntryDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Deletes an owned entry. Fails with `NotFound` when no row matches
    /// both id and owner.
    async fn delete_entry(&self, id: Uuid, owner_id: Uuid) -> Result<()>;
}
