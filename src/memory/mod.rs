//! File-backed memory store.
//!
//! Provides the storage API for adding, searching, listing, updating, and
//! deleting memories, partitioned by owner and persisted as a JSON snapshot.

mod crud;
mod search;

// pub(crate): module internals hidden; public items re-exported explicitly via lib.rs
pub(crate) mod store;

pub use store::MemoryStore;
