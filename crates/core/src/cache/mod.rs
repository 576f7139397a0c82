mod error;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    extract_owner_id_from_key, extract_owner_id_from_pattern, is_owner_entries_key,
    owner_entries_key, owner_entries_pattern, owner_tracking_key,
};
pub use patterns::pattern_matches;
pub use serialization::{deserialize_entries, serialize_entries, SerializationError};
pub use traits::Cache;
