//! Read-side operations for the memory store (substring search and listing).

use crate::errors::Error;
use crate::memory_types::Record;

use super::store::{MemoryStore, validate_limit};

impl MemoryStore {
    #[must_use = "handle the error or results may be lost"]
    /// Search an owner's memories by case-insensitive substring.
    ///
    /// There is no ranking: matches come back in insertion order and the scan
    /// stops once `limit` matches are collected.
    ///
    /// # Arguments
    ///
    /// * `owner` - Namespace to search within
    /// * `query` - Text to look for (1 to 100,000 bytes)
    /// * `limit` - Maximum number of results to return
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Owner or query is empty, or the query is too long
    /// - Limit is 0 or exceeds MAX_SEARCH_LIMIT
    pub fn search(&self, owner: &str, query: &str, limit: usize) -> Result<Vec<&Record>, Error> {
        Self::validate_owner(owner)?;
        validate_limit(limit)?;
        Self::validate_input_length(query)?;

        let needle = query.to_lowercase();
        Ok(self
            .list_all(owner)
            .iter()
            .filter(|record| record.text.to_lowercase().contains(&needle))
            .take(limit)
            .collect())
    }

    /// List all memories of an owner in insertion order.
    ///
    /// An unknown or blank owner has no memories; see
    /// [`MemoryStore::list_owned`] for the checked variant.
    pub fn list_all(&self, owner: &str) -> &[Record] {
        self.owners.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    /// List all memories of an owner, rejecting a blank owner.
    pub fn list_owned(&self, owner: &str) -> Result<&[Record], Error> {
        Self::validate_owner(owner)?;
        Ok(self.list_all(owner))
    }
}
