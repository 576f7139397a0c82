//! Storage backend implementations.
//!
//! Concrete implementations of the repository trait defined in
//! `shednote_core::storage`, selected at compile time via feature flags,
//! plus the cache-invalidating decorator that wraps whichever backend is
//! active.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and
//!   `tokio-rusqlite`
//! - `inmemory`: process-local storage backend (demos; always compiled for
//!   tests)
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.

pub mod cached;

#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
