//! Storage backends for the service layer
//!
//! The SeaORM repositories live next to each module (`users::repo`,
//! `addresses::repo`); this module holds the in-memory backend used by tests,
//! docs and benches.

pub mod memory;

pub use memory::MemoryStore;
