//! Cache key scheme for owner-tagged entry lists.
//!
//! Every materialized list query gets its own key, and all of an owner's
//! list keys share the `owner:{id}:entries:` prefix. Invalidation evicts by
//! the prefix pattern, so one owner-scoped operation covers every cached
//! range/sort variant at once.

use uuid::Uuid;

use crate::storage::EntryQuery;

/// Returns the cache key for one materialized list query.
///
/// The key encodes the concrete predicate and ordering, so distinct
/// range/sort combinations (and range cutoffs computed on different days)
/// never collide.
pub fn owner_entries_key(query: &EntryQuery) -> String {
    let since = query
        .played_since
        .map(|d| d.to_string())
        .unwrap_or_else(|| "all".to_string());
    format!(
        "owner:{}:entries:{}:{}",
        query.owner_id,
        since,
        query.sort.as_str()
    )
}

/// Returns the pattern matching all of an owner's cached list keys.
///
/// This is the owner's invalidation tag: deleting by this pattern evicts
/// every cached list variant for that owner.
pub fn owner_entries_pattern(owner_id: Uuid) -> String {
    format!("owner:{}:entries:*", owner_id)
}

/// Returns the Redis Set key tracking an owner's live cache keys.
///
/// The set enables pattern deletion without SCAN: backends record every
/// list key they store under this set and consult it when invalidating.
pub fn owner_tracking_key(owner_id: Uuid) -> String {
    format!("owner:{}:_keys", owner_id)
}

/// Checks if a cache key is an owner entries key
/// (e.g., `"owner:{id}:entries:..."`). These keys are tracked per owner.
pub fn is_owner_entries_key(key: &str) -> bool {
    let Some(rest) = key.strip_prefix("owner:") else {
        return false;
    };
    let parts: Vec<&str> = rest.split(':').collect();
    // Must have at least UUID + "entries" + more
    if parts.len() < 3 {
        return false;
    }
    parts[1] == "entries" && Uuid::parse_str(parts[0]).is_ok()
}

/// Extracts the owner ID from a cache key, if present.
pub fn extract_owner_id_from_key(key: &str) -> Option<Uuid> {
    let rest = key.strip_prefix("owner:")?;
    let uuid_part = rest.split(':').next()?;
    Uuid::parse_str(uuid_part).ok()
}

/// Extracts the owner ID from a cache pattern, if present.
///
/// Returns `None` for non-owner patterns or patterns with a wildcard in
/// the UUID position.
pub fn extract_owner_id_from_pattern(pattern: &str) -> Option<Uuid> {
    let rest = pattern.strip_prefix("owner:")?;
    let uuid_part = rest.split(':').next()?;
    if uuid_part.contains('*') {
        return None;
    }
    Uuid::parse_str(uuid_part).ok()
}
