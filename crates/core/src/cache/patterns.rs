//! Pure pattern matching functions for cache keys.
//!
//! These functions support glob-style patterns with `*` wildcard
//! that matches any sequence of characters.

/// Checks if a cache key matches a glob pattern.
///
/// The pattern supports `*` as a wildcard that matches any sequence
/// of characters (including empty strings).
///
/// # Examples
///
/// ```
/// use shednote_core::cache::pattern_matches;
///
/// // Exact match
/// assert!(pattern_matches("session:123", "session:123"));
///
/// // Wildcard at end
/// assert!(pattern_matches("owner:123:entries:*", "owner:123:entries:all:played_desc"));
///
/// // Wildcard in middle
/// assert!(pattern_matches("owner:*:entries:*", "owner:456:entries:2024-06-08:played_asc"));
///
/// // No match
/// assert!(!pattern_matches("owner:123:*", "session:456"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    // Handle edge cases
    if pattern.is_empty() {
        return key.is_empty();
    }

    if pattern == "*" {
        return true;
    }

    // Split pattern by '*' to get segments
    let segments: Vec<&str> = pattern.split('*').collect();

    // If no wildcards, require exact match
    if segments.len() == 1 {
        return pattern == key;
    }

    let mut remaining = key;
    let starts_with_wildcard = pattern.starts_with('*');
    let ends_with_wildcard = pattern.ends_with('*');

    for (i, segment) in segments.iter().enumerate() {
        // Skip empty segments (from adjacent wildcards or leading/trailing *)
        if segment.is_empty() {
            continue;
        }

        let is_first = i == 0;
        let is_last = i == segments.len() - 1;

        if is_first && !starts_with_wildcard {
            // First segment must be at the start of the key
            if !remaining.starts_with(segment) {
                return false;
            }
            remaining = &remaining[segment.len()..];
        } else if is_last && !ends_with_wildcard {
            // Last segment must be at the end of the key
            if !remaining.ends_with(segment) {
                return false;
            }
            // No need to update remaining, we're done
        } else {
            // Middle segment (or first with leading *, or last with trailing *)
            // Just needs to be found somewhere in remaining
            match remaining.find(segment) {
                Some(pos) => {
                    remaining = &remaining[pos + segment.len()..];
                }
                None => return false,
            }
        }
    }

    true
}
