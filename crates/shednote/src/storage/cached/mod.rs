//! Cached repository decorator.
//!
//! Wraps a repository with the cache-aside pattern for list reads and
//! write-through invalidation for mutations:
//!
//! - **List reads**: Check cache first, on miss fetch from the repository
//!   and populate the cache
//! - **Writes**: Persist to the repository, then invalidate every cached
//!   list variant for the owner via the owner tag
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = Arc::new(SqliteRepository::new("db.sqlite").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//!
//! let cached_repo = CachedEntryRepository::new(repo, cache, Duration::from_secs(300));
//! ```

mod entry;

pub use entry::CachedEntryRepository;
