//! CRUD operations for the memory store.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::errors::Error;
use crate::memory_types::{Metadata, Record};

use super::store::MemoryStore;

impl MemoryStore {
    #[must_use = "handle the error or results may be lost"]
    /// Add a memory for an owner.
    ///
    /// The record is appended after the owner's existing memories and the
    /// store is flushed before returning.
    ///
    /// # Arguments
    ///
    /// * `owner` - Namespace the memory belongs to
    /// * `text` - Text content to store (1 to 100,000 bytes)
    /// * `metadata` - Arbitrary JSON metadata, possibly empty
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Text or owner is empty
    /// - Text exceeds 100,000 bytes
    /// - The snapshot cannot be written (the memory is still held in memory)
    pub fn add(&mut self, owner: &str, text: &str, metadata: Metadata) -> Result<Record, Error> {
        Self::validate_owner(owner)?;
        Self::validate_input_length(text)?;

        let record = Record {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            owner: owner.to_string(),
            metadata,
            created_at: Utc::now(),
            updated_at: None,
        };

        self.owners
            .entry(owner.to_string())
            .or_default()
            .push(record.clone());
        debug!(owner, id = %record.id, "memory added");

        self.flush()?;
        Ok(record)
    }

    /// Get a specific memory by owner and ID.
    ///
    /// Returns `None` if the owner has no memory with that ID.
    pub fn get(&self, owner: &str, id: &str) -> Option<&Record> {
        self.owners
            .get(owner)
            .and_then(|records| records.iter().find(|r| r.id == id))
    }

    #[must_use = "handle the error or results may be lost"]
    /// Replace a memory's text, and its metadata when given.
    ///
    /// The memory ID, owner, and creation timestamp remain unchanged.
    ///
    /// # Errors
    ///
    /// Returns error if the owner or text is invalid, the memory doesn't exist
    /// for this owner, or the snapshot cannot be written.
    pub fn update(
        &mut self,
        owner: &str,
        id: &str,
        text: &str,
        metadata: Option<Metadata>,
    ) -> Result<Record, Error> {
        Self::validate_owner(owner)?;
        Self::validate_input_length(text)?;

        let record = self
            .owners
            .get_mut(owner)
            .and_then(|records| records.iter_mut().find(|r| r.id == id))
            .ok_or_else(|| not_found(owner, id))?;

        record.text = text.to_string();
        if let Some(metadata) = metadata {
            record.metadata = metadata;
        }
        record.updated_at = Some(Utc::now());
        let updated = record.clone();
        debug!(owner, id, "memory updated");

        self.flush()?;
        Ok(updated)
    }

    #[must_use = "handle the error or results may be lost"]
    /// Delete a single memory.
    ///
    /// Removing an owner's last memory also drops the owner.
    ///
    /// # Errors
    ///
    /// Returns error if the owner is blank, the memory doesn't exist for this
    /// owner, or the snapshot cannot be written.
    pub fn delete_one(&mut self, owner: &str, id: &str) -> Result<Record, Error> {
        Self::validate_owner(owner)?;
        let records = self
            .owners
            .get_mut(owner)
            .ok_or_else(|| not_found(owner, id))?;
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| not_found(owner, id))?;

        let removed = records.remove(index);
        if records.is_empty() {
            self.owners.remove(owner);
        }
        debug!(owner, id, "memory deleted");

        self.flush()?;
        Ok(removed)
    }

    #[must_use = "handle the error or results may be lost"]
    /// Delete every memory of an owner.
    ///
    /// Returns the number of memories removed; 0 when the owner had none, in
    /// which case nothing is written.
    ///
    /// # Errors
    ///
    /// Returns error if the owner is blank or the snapshot cannot be written.
    pub fn delete_all(&mut self, owner: &str) -> Result<usize, Error> {
        Self::validate_owner(owner)?;
        let Some(records) = self.owners.remove(owner) else {
            return Ok(0);
        };
        debug!(owner, count = records.len(), "memories deleted");

        self.flush()?;
        Ok(records.len())
    }
}

fn not_found(owner: &str, id: &str) -> Error {
    Error::NotFound {
        owner: owner.to_string(),
        id: id.to_string(),
    }
}
