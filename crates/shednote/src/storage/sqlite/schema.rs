//! SQLite schema definitions and SQL query constants.
//!
//! All SQL used by the SQLite repository lives here - pure data, no I/O.
//! List queries are assembled by [`select_entries_sql`] because the date
//! predicate is optional and the ORDER BY clause depends on the sort
//! selector.

use shednote_core::storage::SortOrder;

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Practice entries table
CREATE TABLE IF NOT EXISTS practice_entries (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL,
    played_on TEXT NOT NULL,
    duration_min INTEGER,
    piece TEXT NOT NULL,
    bpm INTEGER,
    tags TEXT NOT NULL,
    rating REAL NOT NULL,
    notes TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Index for owner-scoped range queries
CREATE INDEX IF NOT EXISTS idx_practice_entries_owner_played
    ON practice_entries(owner_id, played_on);
"#;

pub const INSERT_ENTRY: &str = r#"
INSERT INTO practice_entries (id, owner_id, played_on, duration_min, piece, bpm, tags, rating, notes, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
"#;

pub const SELECT_ENTRY_BY_ID_AND_OWNER: &str = r#"
SELECT id, owner_id, played_on, duration_min, piece, bpm, tags, rating, notes, created_at, updated_at
FROM practice_entries
WHERE id = ?1 AND owner_id = ?2
"#;

/// Owner scoping on mutations: the WHERE clause matches both id and owner,
/// so a zero-row result covers "does not exist" and "belongs to someone
/// else" alike.
pub const UPDATE_ENTRY: &str = r#"
UPDATE practice_entries
SET played_on = ?3, duration_min = ?4, piece = ?5, bpm = ?6, tags = ?7, rating = ?8, notes = ?9, updated_at = ?10
WHERE id = ?1 AND owner_id = ?2
"#;

pub const DELETE_ENTRY: &str = r#"
DELETE FROM practice_entries
WHERE id = ?1 AND owner_id = ?2
"#;

const SELECT_ENTRIES_BASE: &str = "SELECT id, owner_id, played_on, duration_min, piece, bpm, tags, rating, notes, created_at, updated_at \
     FROM practice_entries WHERE owner_id = ?1";

/// Builds the list query for an owner, with an optional inclusive
/// `played_on >= ?2` predicate and the ORDER BY for the sort selector.
///
/// Dates and timestamps are stored as ISO 8601 text, so lexicographic
/// comparison matches chronological order.
pub fn select_entries_sql(with_cutoff: bool, sort: SortOrder) -> String {
    let mut sql = String::from(SELECT_ENTRIES_BASE);
    if with_cutoff {
        sql.push_str(" AND played_on >= ?2");
    }
    sql.push_str(order_by_clause(sort));
    sql
}

/// ORDER BY clause per sort selector. Must agree with `SortOrder::sort`.
///
/// `duration_min IS NULL` sorts absent durations after all present ones.
fn order_by_clause(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::PlayedDesc => " ORDER BY played_on DESC, created_at DESC",
        SortOrder::PlayedAsc => " ORDER BY played_on ASC, created_at ASC",
        SortOrder::DurationDesc => {
            " ORDER BY (duration_min IS NULL) ASC, duration_min DESC, played_on DESC, created_at DESC"
        }
    }
}
