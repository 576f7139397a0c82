//! Process-local storage backend.
//!
//! Useful for demos and tests - no external dependencies, data is lost on
//! shutdown.

mod repository;

pub use repository::InMemoryRepository;
