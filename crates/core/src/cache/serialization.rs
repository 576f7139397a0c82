//! Pure functions for serializing/deserializing entry lists to/from cache
//! bytes. JSON keeps cached values human-readable for debugging.

use thiserror::Error;

use crate::entry::PracticeEntry;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a slice of practice entries to JSON bytes.
pub fn serialize_entries(entries: &[PracticeEntry]) -> Result<Vec<u8>> {
    serde_json::to_vec(entries).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a vector of practice entries.
pub fn deserialize_entries(bytes: &[u8]) -> Result<Vec<PracticeEntry>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
