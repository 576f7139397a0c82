//! SQLite repository implementation.
//!
//! Implements the repository trait from `shednote_core::storage` using
//! SQLite. Every statement scopes by `owner_id`; the database is expected to
//! sit behind deployment-level row ownership enforcement as well, so this
//! filter is never the only safeguard.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_rusqlite::Connection;
use uuid::Uuid;

use shednote_core::entry::{EntryDraft, PracticeEntry};
use shednote_core::storage::{EntryQuery, EntryRepository, RepositoryError, Result};

use super::conversions::{format_date, format_datetime, row_to_entry, tags_to_json};
use super::error::map_tokio_rusqlite_error_with_id;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for practice entries.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl EntryRepository for SqliteRepository {
    async fn get_entry(&self, id: Uuid, owner_id: Uuid) -> Result<Option<PracticeEntry>> {
        let id_str = id.to_string();
        let owner_str = owner_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ENTRY_BY_ID_AND_OWNER)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str, &owner_str], row_to_entry) {
                    Ok(entry) => Ok(Some(entry)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "PracticeEntry", id.to_string()))
    }

    async fn list_entries(&self, query: &EntryQuery) -> Result<Vec<PracticeEntry>> {
        let owner_str = query.owner_id.to_string();
        let cutoff = query.played_since.map(|d| format_date(&d));
        let sql = schema::select_entries_sql(cutoff.is_some(), query.sort);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                let rows = match &cutoff {
                    Some(cutoff) => {
                        stmt.query_map(rusqlite::params![owner_str, cutoff], row_to_entry)
                    }
                    None => stmt.query_map(rusqlite::params![owner_str], row_to_entry),
                }
                .map_err(wrap_err)?;

                let mut entries = Vec::new();
                for row_result in rows {
                    entries.push(row_result.map_err(wrap_err)?);
                }
                Ok(entries)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_entry(&self, entry: &PracticeEntry) -> Result<()> {
        let id = entry.id.to_string();
        let owner_id = entry.owner_id.to_string();
        let played_on = format_date(&entry.played_on);
        let duration_min = entry.duration_min;
        let piece = entry.piece.clone();
        let bpm = entry.bpm;
        let tags_json = tags_to_json(&entry.tags)?;
        let rating = entry.rating;
        let notes = entry.notes.clone();
        let created_at = format_datetime(&entry.created_at);
        let updated_at = format_datetime(&entry.updated_at);
        let entry_id = entry.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_ENTRY,
                    rusqlite::params![
                        id,
                        owner_id,
                        played_on,
                        duration_min,
                        piece,
                        bpm,
                        tags_json,
                        rating,
                        notes,
                        created_at,
                        updated_at
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "PracticeEntry", entry_id))
    }

    async fn update_entry(
        &self,
        id: Uuid,
        owner_id: Uuid,
        draft: &EntryDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let id_str = id.to_string();
        let owner_str = owner_id.to_string();
        let played_on = format_date(&draft.played_on);
        let duration_min = draft.duration_min;
        let piece = draft.piece.clone();
        let bpm = draft.bpm;
        let tags_json = tags_to_json(&draft.tags)?;
        let rating = draft.rating;
        let notes = draft.notes.clone();
        let updated_at = format_datetime(&updated_at);
        let entry_id = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_ENTRY,
                        rusqlite::params![
                            id_str,
                            owner_str,
                            played_on,
                            duration_min,
                            piece,
                            bpm,
                            tags_json,
                            rating,
                            notes,
                            updated_at
                        ],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "PracticeEntry", entry_id))
    }

    async fn delete_entry(&self, id: Uuid, owner_id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        let owner_str = owner_id.to_string();
        let entry_id = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_ENTRY, [&id_str, &owner_str])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "PracticeEntry", entry_id))
    }
}
