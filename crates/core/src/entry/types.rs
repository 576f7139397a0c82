use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded practice session.
///
/// `id` and `owner_id` are immutable after creation; every storage operation
/// must match both. Timestamps are set by the system, never by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeEntry {
    pub id: Uuid,
    /// The authenticated user this entry belongs to.
    pub owner_id: Uuid,
    /// Calendar date the session was played (no time component).
    pub played_on: NaiveDate,
    /// Session length in minutes. Always `Some(n >= 1)` for rows written
    /// through the normalizer; `None` tolerated on read for legacy rows and
    /// ordered last by the duration sort.
    pub duration_min: Option<u32>,
    pub piece: String,
    /// Metronome marking in beats per minute, [1, 400] when present.
    pub bpm: Option<u32>,
    pub tags: Vec<String>,
    /// Self-assessed quality in [1, 5].
    pub rating: f64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PracticeEntry {
    /// Creates a new entry from a normalized draft, bound to `owner_id`,
    /// with a fresh id and both timestamps set to now.
    pub fn new(owner_id: Uuid, draft: EntryDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            played_on: draft.played_on,
            duration_min: Some(draft.duration_min),
            piece: draft.piece,
            bpm: draft.bpm,
            tags: draft.tags,
            rating: draft.rating,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the mutable fields from a draft, leaving id, owner and
    /// `created_at` untouched.
    pub fn apply_draft(&mut self, draft: &EntryDraft, updated_at: DateTime<Utc>) {
        self.played_on = draft.played_on;
        self.duration_min = Some(draft.duration_min);
        self.piece = draft.piece.clone();
        self.bpm = draft.bpm;
        self.tags = draft.tags.clone();
        self.rating = draft.rating;
        self.notes = draft.notes.clone();
        self.updated_at = updated_at;
    }

    /// Sets a specific ID for this entry (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets a specific creation timestamp (useful for testing).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets a specific update timestamp (useful for testing).
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }
}

/// Canonical entry payload produced by the normalizer.
///
/// Everything a caller may set: all entity fields except id, owner and
/// timestamps. `duration_min` is required and validated here; the entity
/// relaxes it to `Option` only to tolerate pre-validation rows on read.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub played_on: NaiveDate,
    pub duration_min: u32,
    pub piece: String,
    pub bpm: Option<u32>,
    pub tags: Vec<String>,
    pub rating: f64,
    pub notes: String,
}
