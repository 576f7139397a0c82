//! Entry service: the orchestrator behind the four public operations.
//!
//! Composes the normalizer, the query planner, and the (cache-decorated)
//! repository. The owner id is an explicit parameter on every method,
//! resolved once per request by the `Owner` extractor - never recovered
//! from ambient state.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use shednote_core::entry::{EntryForm, PracticeEntry, ValidationError};
use shednote_core::storage::{EntryQuery, EntryRepository, RangeFilter, RepositoryError, SortOrder};

/// Errors surfaced by the entry service.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Owner-scoped CRUD over practice entries.
#[derive(Clone)]
pub struct EntryService {
    repo: Arc<dyn EntryRepository>,
}

impl EntryService {
    pub fn new(repo: Arc<dyn EntryRepository>) -> Self {
        Self { repo }
    }

    /// Lists the owner's entries for the given range and sort selectors.
    ///
    /// The range cutoff is computed against the current date, so
    /// range-filtered results shift across calendar boundaries.
    pub async fn list_entries(
        &self,
        owner_id: Uuid,
        range: RangeFilter,
        sort: SortOrder,
    ) -> Result<Vec<PracticeEntry>, ServiceError> {
        let today = Utc::now().date_naive();
        let query = EntryQuery::build(owner_id, range, sort, today);
        Ok(self.repo.list_entries(&query).await?)
    }

    /// Validates the raw form and creates a new entry bound to the owner.
    /// Returns the new entry's id. No write happens on validation failure.
    pub async fn create_entry(
        &self,
        owner_id: Uuid,
        form: &EntryForm,
    ) -> Result<Uuid, ServiceError> {
        let draft = form.normalize()?;
        let entry = PracticeEntry::new(owner_id, draft);
        self.repo.create_entry(&entry).await?;

        tracing::info!(entry_id = %entry.id, "Created new entry");
        Ok(entry.id)
    }

    /// Fetches one owned entry; not-found covers both a missing id and an
    /// id owned by someone else.
    pub async fn get_entry(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<PracticeEntry, ServiceError> {
        match self.repo.get_entry(id, owner_id).await? {
            Some(entry) => Ok(entry),
            None => Err(RepositoryError::NotFound {
                entity_type: "PracticeEntry",
                id: id.to_string(),
            }
            .into()),
        }
    }

    /// Validates the raw form and overwrites the mutable fields of an owned
    /// entry. `updated_at` is stamped here; id, owner and `created_at` never
    /// change.
    pub async fn update_entry(
        &self,
        owner_id: Uuid,
        id: Uuid,
        form: &EntryForm,
    ) -> Result<(), ServiceError> {
        let draft = form.normalize()?;
        self.repo
            .update_entry(id, owner_id, &draft, Utc::now())
            .await?;

        tracing::info!(entry_id = %id, "Updated entry");
        Ok(())
    }

    /// Deletes an owned entry. Deletion is final.
    pub async fn delete_entry(&self, owner_id: Uuid, id: Uuid) -> Result<(), ServiceError> {
        self.repo.delete_entry(id, owner_id).await?;

        tracing::info!(entry_id = %id, "Deleted entry");
        Ok(())
    }
}
