use thiserror::Error;

/// Validation failure naming the first offending form field.
///
/// The field name matches the form field as submitted (e.g. `duration_min`),
/// so callers can surface the error next to the right input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value for field: {field}")]
pub struct ValidationError {
    pub field: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}
