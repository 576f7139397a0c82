//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using tokio
//! synchronization primitives and LRU eviction policy.
//!
//! This implementation mirrors the Redis cache behavior for consistency:
//! owner entries keys are tracked per owner, so pattern deletion resolves
//! through the tracking map instead of scanning the whole store.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;
use uuid::Uuid;

use shednote_core::cache::{
    extract_owner_id_from_key, extract_owner_id_from_pattern, is_owner_entries_key,
    pattern_matches, Cache, Result,
};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// Supports TTL with lazy expiration (entries are cleaned up on access).
/// Uses LRU eviction to limit memory usage when max_entries is reached.
///
/// Owner entries keys are tracked per owner ID to enable efficient pattern
/// deletion when an owner's lists are invalidated.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    /// Main key-value store with LRU eviction.
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    /// Tracks owner entries keys by owner ID for efficient invalidation.
    /// Maps owner_id -> Set of cache keys.
    tracking: Arc<RwLock<HashMap<Uuid, HashSet<String>>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of entries before LRU eviction kicks in.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            tracking: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                // Entry exists but is expired - return None.
                // Cleanup is lazy; the entry ages out of the LRU.
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        // Store the value
        {
            let mut store = self.store.write().await;
            let entry = CacheEntry::new(value.to_vec(), ttl);
            store.put(key.to_string(), entry);
        }

        // Track owner entries keys for efficient invalidation
        if is_owner_entries_key(key) {
            if let Some(owner_id) = extract_owner_id_from_key(key) {
                let mut tracking = self.tracking.write().await;
                tracking
                    .entry(owner_id)
                    .or_default()
                    .insert(key.to_string());
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // Deleting an owner entries key - remove it from tracking
        if is_owner_entries_key(key) {
            if let Some(owner_id) = extract_owner_id_from_key(key) {
                let mut tracking = self.tracking.write().await;
                if let Some(keys) = tracking.get_mut(&owner_id) {
                    keys.remove(key);
                    // Clean up empty tracking sets
                    if keys.is_empty() {
                        tracking.remove(&owner_id);
                    }
                }
            }
        }

        // Delete the key itself
        let mut store = self.store.write().await;
        store.pop(key);

        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        // Extract owner ID from pattern for efficient lookup
        let Some(owner_id) = extract_owner_id_from_pattern(pattern) else {
            // Non-owner pattern - fall back to full iteration.
            // This is O(n) but only for non-owner patterns.
            let mut store = self.store.write().await;
            let keys_to_delete: Vec<String> = store
                .iter()
                .filter(|(key, _)| pattern_matches(pattern, key))
                .map(|(key, _)| key.clone())
                .collect();
            for key in keys_to_delete {
                store.pop(&key);
            }
            return Ok(());
        };

        // Get tracked keys for this owner
        let tracked_keys: Vec<String> = {
            let tracking = self.tracking.read().await;
            tracking
                .get(&owner_id)
                .map(|keys| keys.iter().cloned().collect())
                .unwrap_or_default()
        };

        // Filter keys that match the pattern
        let keys_to_delete: Vec<String> = tracked_keys
            .into_iter()
            .filter(|k| pattern_matches(pattern, k))
            .collect();

        if !keys_to_delete.is_empty() {
            // Delete matching keys from store
            {
                let mut store = self.store.write().await;
                for key in &keys_to_delete {
                    store.pop(key);
                }
            }

            // Remove from tracking
            {
                let mut tracking = self.tracking.write().await;
                if let Some(keys) = tracking.get_mut(&owner_id) {
                    for key in &keys_to_delete {
                        keys.remove(key);
                    }
                    // Clean up empty tracking sets
                    if keys.is_empty() {
                        tracking.remove(&owner_id);
                    }
                }
            }
        }

        Ok(())
    }
}
