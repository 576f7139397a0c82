//! Application state with repository-based storage.
//!
//! The shared state handed to request handlers. Storage and cache backends
//! are selected at compile time via feature flags and composed behind the
//! cache-invalidating repository decorator.

use crate::service::EntryService;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!("Must enable exactly one storage feature: 'sqlite' or 'inmemory'");

// Cache features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!("Cannot enable both 'memory' and 'redis' cache features");

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!("Must enable exactly one cache feature: 'memory' or 'redis'");

/// Shared application state.
///
/// Cloned for each request handler. The entry service holds the cache-
/// decorated repository; handlers never talk to storage directly.
#[derive(Clone)]
pub struct AppState {
    pub entries: EntryService,
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use std::sync::Arc;

    use super::AppState;
    use crate::cache::memory::MemoryCache;
    use crate::config::Config;
    use crate::service::EntryService;
    use crate::storage::cached::CachedEntryRepository;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            let cached_repo = Arc::new(CachedEntryRepository::new(
                sqlite_repo,
                memory_cache,
                config.cache_ttl(),
            ));

            Ok(Self {
                entries: EntryService::new(cached_repo),
            })
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use std::sync::Arc;

    use super::AppState;
    use crate::cache::redis_impl::RedisCache;
    use crate::config::Config;
    use crate::service::EntryService;
    use crate::storage::cached::CachedEntryRepository;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            let cached_repo = Arc::new(CachedEntryRepository::new(
                sqlite_repo,
                redis_cache,
                config.cache_ttl(),
            ));

            Ok(Self {
                entries: EntryService::new(cached_repo),
            })
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use std::sync::Arc;

    use super::AppState;
    use crate::cache::memory::MemoryCache;
    use crate::config::Config;
    use crate::service::EntryService;
    use crate::storage::cached::CachedEntryRepository;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        /// Useful for demos without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            let cached_repo = Arc::new(CachedEntryRepository::new(
                inmemory_repo,
                memory_cache,
                config.cache_ttl(),
            ));

            Ok(Self {
                entries: EntryService::new(cached_repo),
            })
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================

#[cfg(test)]
mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use super::AppState;
    use crate::cache::memory::MemoryCache;
    use crate::service::EntryService;
    use crate::storage::cached::CachedEntryRepository;
    use crate::storage::inmemory::InMemoryRepository;

    impl Default for AppState {
        /// Creates an AppState with in-memory storage for testing.
        ///
        /// This is only available in test builds and wires the same
        /// composition as production: store behind the cache decorator.
        fn default() -> Self {
            let repo = Arc::new(InMemoryRepository::new());
            let cache = Arc::new(MemoryCache::new(1000));
            let cached = Arc::new(CachedEntryRepository::new(
                repo,
                cache,
                Duration::from_secs(300),
            ));

            Self {
                entries: EntryService::new(cached),
            }
        }
    }
}
