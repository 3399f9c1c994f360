//! Backend capability consumed by the tool dispatcher.
//!
//! The dispatcher never names a concrete store. The local file-backed
//! [`MemoryStore`] is one implementation; a provider delegating to an external
//! memory service would be another.

use std::path::PathBuf;

use serde::Serialize;

use crate::errors::Error;
use crate::memory::MemoryStore;
use crate::memory_types::{Metadata, Record, StoreStats};

/// Identity and counters reported by `get_status`.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    /// Human-readable backend name.
    pub backend: String,
    /// Storage medium description.
    pub storage_type: String,
    /// Backing file, when the provider has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
    #[serde(flatten)]
    pub stats: StoreStats,
}

/// Memory operations a backend must offer.
pub trait MemoryProvider {
    /// Store a new memory and return it with its generated id.
    fn add(&mut self, owner: &str, text: &str, metadata: Metadata) -> Result<Record, Error>;

    /// Find at most `limit` memories of `owner` matching `query`.
    fn search(&self, owner: &str, query: &str, limit: usize) -> Result<Vec<Record>, Error>;

    /// All memories of `owner`.
    fn list_all(&self, owner: &str) -> Result<Vec<Record>, Error>;

    /// Remove every memory of `owner`, returning how many were removed.
    fn delete_all(&mut self, owner: &str) -> Result<usize, Error>;

    /// Remove one memory, returning it.
    fn delete_one(&mut self, owner: &str, id: &str) -> Result<Record, Error>;

    /// Replace a memory's text (and metadata when given), returning the result.
    fn update(
        &mut self,
        owner: &str,
        id: &str,
        text: &str,
        metadata: Option<Metadata>,
    ) -> Result<Record, Error>;

    /// Backend identity and counters.
    fn status(&self) -> ProviderStatus;
}

impl MemoryProvider for MemoryStore {
    fn add(&mut self, owner: &str, text: &str, metadata: Metadata) -> Result<Record, Error> {
        MemoryStore::add(self, owner, text, metadata)
    }

    fn search(&self, owner: &str, query: &str, limit: usize) -> Result<Vec<Record>, Error> {
        Ok(MemoryStore::search(self, owner, query, limit)?
            .into_iter()
            .cloned()
            .collect())
    }

    fn list_all(&self, owner: &str) -> Result<Vec<Record>, Error> {
        Ok(MemoryStore::list_owned(self, owner)?.to_vec())
    }

    fn delete_all(&mut self, owner: &str) -> Result<usize, Error> {
        MemoryStore::delete_all(self, owner)
    }

    fn delete_one(&mut self, owner: &str, id: &str) -> Result<Record, Error> {
        MemoryStore::delete_one(self, owner, id)
    }

    fn update(
        &mut self,
        owner: &str,
        id: &str,
        text: &str,
        metadata: Option<Metadata>,
    ) -> Result<Record, Error> {
        MemoryStore::update(self, owner, id, text, metadata)
    }

    fn status(&self) -> ProviderStatus {
        ProviderStatus {
            backend: "OpenMemory Local".to_string(),
            storage_type: "File System".to_string(),
            storage_path: Some(self.path().to_path_buf()),
            stats: self.stats(),
        }
    }
}
