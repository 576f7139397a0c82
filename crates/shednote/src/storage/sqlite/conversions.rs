//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use uuid::Uuid;

use shednote_core::entry::PracticeEntry;
use shednote_core::storage::RepositoryError;

/// Convert a SQLite row to a PracticeEntry.
///
/// Expected columns: id, owner_id, played_on, duration_min, piece, bpm,
/// tags, rating, notes, created_at, updated_at
pub fn row_to_entry(row: &Row) -> rusqlite::Result<PracticeEntry> {
    let id: String = row.get(0)?;
    let owner_id: String = row.get(1)?;
    let played_on: String = row.get(2)?;
    let duration_min: Option<u32> = row.get(3)?;
    let piece: String = row.get(4)?;
    let bpm: Option<u32> = row.get(5)?;
    let tags_json: String = row.get(6)?;
    let rating: f64 = row.get(7)?;
    let notes: String = row.get(8)?;
    let created_at: String = row.get(9)?;
    let updated_at: String = row.get(10)?;

    Ok(PracticeEntry {
        id: parse_uuid(&id)?,
        owner_id: parse_uuid(&owner_id)?,
        played_on: parse_date(&played_on)?,
        duration_min,
        piece,
        bpm,
        tags: json_to_tags_internal(&tags_json)?,
        rating,
        notes,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Serialize the tag list to a JSON string for storage.
pub fn tags_to_json(tags: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(tags).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Internal version that returns rusqlite::Result for use in row conversions.
fn json_to_tags_internal(json: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Format a date as ISO 8601 (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a datetime as RFC 3339.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parse a UUID from string.
fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a date from ISO 8601 string (YYYY-MM-DD).
fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}
