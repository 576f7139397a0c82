//! Redis cache implementation.
//!
//! Uses set-based key tracking for efficient pattern deletion without SCAN.
//! Owner entries keys are tracked in Redis Sets keyed by owner ID.
//!
//! # Non-Atomicity Safety
//!
//! The operations in this module (especially `delete` and `delete_pattern`)
//! are not atomic - they involve multiple Redis commands. However, this is
//! safe:
//!
//! - **SREM on non-existent key**: If a key is deleted but the process
//!   crashes before SREM, the tracking set will contain a stale reference.
//!   This is harmless because SREM on a non-existent member is a no-op, and
//!   DEL on a non-existent key is also safe.
//!
//! - **Orphaned entries in tracking set**: If keys are added to tracking but
//!   the actual SET fails, the tracking set may reference non-existent keys.
//!   This is harmless because delete_pattern will simply try to delete keys
//!   that don't exist.
//!
//! - **Partial deletion**: If delete_pattern deletes some keys but crashes
//!   before completing, subsequent calls will finish the cleanup safely.
//!
//! The worst case is temporary inconsistency, not data corruption or lost
//! writes.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use shednote_core::cache::{
    extract_owner_id_from_key, extract_owner_id_from_pattern, is_owner_entries_key,
    owner_tracking_key, pattern_matches, Cache, Result,
};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
///
/// Owner entries keys are automatically tracked in Redis Sets to enable
/// efficient pattern-based deletion without using SCAN operations.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be
    /// established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        // Set the value
        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        // Track owner entries keys in the owner's tracking set
        if is_owner_entries_key(key) {
            if let Some(owner_id) = extract_owner_id_from_key(key) {
                let tracking_key = owner_tracking_key(owner_id);
                conn.sadd::<_, _, ()>(&tracking_key, key)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();

        // Deleting an owner entries key - remove it from tracking.
        // See module-level documentation for non-atomicity safety.
        if is_owner_entries_key(key) {
            if let Some(owner_id) = extract_owner_id_from_key(key) {
                let tracking_key = owner_tracking_key(owner_id);
                conn.srem::<_, _, ()>(&tracking_key, key)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        // Delete the key itself
        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;

        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        // Extract owner ID from pattern
        let Some(owner_id) = extract_owner_id_from_pattern(pattern) else {
            // Non-owner pattern - no-op (we only track owner keys)
            return Ok(());
        };

        let mut conn = self.conn.clone();
        let tracking_key = owner_tracking_key(owner_id);

        // Get all tracked keys for this owner
        let tracked_keys: Vec<String> = conn
            .smembers(&tracking_key)
            .await
            .map_err(map_redis_error)?;

        // Filter keys that match the pattern
        let keys_to_delete: Vec<&String> = tracked_keys
            .iter()
            .filter(|k| pattern_matches(pattern, k))
            .collect();

        if !keys_to_delete.is_empty() {
            // Delete matching keys
            conn.del::<_, ()>(&keys_to_delete)
                .await
                .map_err(map_redis_error)?;

            // Remove from tracking set
            conn.srem::<_, _, ()>(&tracking_key, &keys_to_delete)
                .await
                .map_err(map_redis_error)?;
        }

        Ok(())
    }
}
