//! Core domain logic for ShedNote.
//!
//! This crate is pure: entry normalization, query planning, and the storage
//! and cache contracts live here, with no I/O. Concrete backends are provided
//! by the `shednote` binary crate.

pub mod cache;
pub mod entry;
pub mod storage;
