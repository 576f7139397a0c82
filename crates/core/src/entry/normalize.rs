//! Entry form normalization.
//!
//! Turns the untyped field map of an HTML form submission into a canonical
//! [`EntryDraft`], or a [`ValidationError`] naming the first offending field.
//! Pure transformation, shared verbatim by the create and update paths.

use chrono::NaiveDate;
use serde::Deserialize;

use super::{EntryDraft, ValidationError};

/// Raw entry form payload: every field as submitted, or absent.
///
/// Form encodings deliver everything as strings; parsing and range checks
/// happen in [`EntryForm::normalize`], not at deserialization time, so a
/// malformed value yields a field-level validation error instead of a 400
/// from the form layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub played_on: Option<String>,
    #[serde(default)]
    pub duration_min: Option<String>,
    #[serde(default)]
    pub piece: Option<String>,
    #[serde(default)]
    pub bpm: Option<String>,
    /// Comma-separated tag list as typed in the UI.
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl EntryForm {
    /// Normalizes the raw form into a canonical draft.
    ///
    /// Fields are checked in declaration order and the first failure wins:
    /// `played_on`, `duration_min`, `piece`, `bpm`, `rating`. Tags and notes
    /// cannot fail; they normalize to empty.
    pub fn normalize(&self) -> Result<EntryDraft, ValidationError> {
        let played_on = present(self.played_on.as_deref())
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .ok_or(ValidationError::new("played_on"))?;

        let duration_min = present(self.duration_min.as_deref())
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|d| *d >= 1)
            .ok_or(ValidationError::new("duration_min"))?;

        let piece = present(self.piece.as_deref())
            .ok_or(ValidationError::new("piece"))?
            .to_string();

        let bpm = parse_bpm(self.bpm.as_deref())?;

        let tags = split_tags(self.tags.as_deref().unwrap_or(""));

        let rating = present(self.rating.as_deref())
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|r| (1.0..=5.0).contains(r))
            .ok_or(ValidationError::new("rating"))?;

        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .to_string();

        Ok(EntryDraft {
            played_on,
            duration_min,
            piece,
            bpm,
            tags,
            rating,
            notes,
        })
    }
}

/// Trims a raw value and filters out absent/blank ones.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// BPM is optional: absent, blank, or non-integer input means "not recorded".
/// An integer outside [1, 400] is a validation failure.
fn parse_bpm(raw: Option<&str>) -> Result<Option<u32>, ValidationError> {
    let Some(raw) = present(raw) else {
        return Ok(None);
    };
    match raw.parse::<i64>() {
        Ok(v) if (1..=400).contains(&v) => Ok(Some(v as u32)),
        Ok(_) => Err(ValidationError::new("bpm")),
        Err(_) => Ok(None),
    }
}

/// Splits a comma-separated tag string, trimming each part and discarding
/// empties while preserving the remaining order. A blank input yields an
/// empty vec, never a vec containing one empty string.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}
