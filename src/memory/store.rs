//! Core memory store struct and snapshot persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::Error;
use crate::memory_types::{Record, StoreStats};

/// Maximum allowed input length (100,000 bytes).
pub const MAX_INPUT_LENGTH: usize = 100_000;
/// Maximum allowed limit for search operations.
pub const MAX_SEARCH_LIMIT: usize = 10_000;

/// Version tag written into every snapshot.
const SNAPSHOT_VERSION: u32 = 1;

/// On-disk layout: the whole owner -> records mapping.
#[derive(Debug, Deserialize)]
struct Snapshot {
    version: u32,
    #[serde(default)]
    owners: BTreeMap<String, Vec<Record>>,
}

/// File-backed memory store.
///
/// Records are kept in memory, partitioned by owner in insertion order. Every
/// mutation rewrites the complete snapshot file before returning, so the file
/// always holds the state after the last successful operation.
///
/// Concurrent writers from other processes are not supported; the last
/// snapshot written wins.
#[derive(Debug)]
pub struct MemoryStore {
    pub(crate) path: PathBuf,
    pub(crate) owners: BTreeMap<String, Vec<Record>>,
}

impl MemoryStore {
    /// Open the store backed by `path`.
    ///
    /// A missing file yields an empty store. An unreadable or corrupt file is
    /// logged and also yields an empty store; the next mutation overwrites it.
    ///
    /// # Errors
    ///
    /// Returns error if the path is empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::Config("Storage path cannot be empty".to_string()));
        }

        let owners = match load_snapshot(&path) {
            Ok(Some(owners)) => owners,
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!(error = %e, "failed to load memories, starting with an empty store");
                BTreeMap::new()
            }
        };

        let store = MemoryStore { path, owners };
        let stats = store.stats();
        info!(
            path = %store.path.display(),
            memories = stats.total_memories,
            owners = stats.total_owners,
            "memory store opened"
        );
        Ok(store)
    }

    /// Path of the backing snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Count records and owners currently held.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_memories: self.owners.values().map(Vec::len).sum(),
            total_owners: self.owners.len(),
        }
    }

    /// Write the full store to disk.
    ///
    /// The snapshot goes to a sibling temporary file first and is then renamed
    /// over the target, so readers never observe a partial file.
    pub(crate) fn flush(&self) -> Result<(), Error> {
        let persistence = |source: std::io::Error| Error::Persistence {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(persistence)?;
            }
        }

        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            owners: &self.owners,
        };
        let json = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| persistence(std::io::Error::other(e)))?;

        let temp_path = temp_path_for(&self.path);
        if let Err(e) = fs::write(&temp_path, json).and_then(|()| fs::rename(&temp_path, &self.path))
        {
            let _ = fs::remove_file(&temp_path);
            return Err(persistence(e));
        }

        debug!(path = %self.path.display(), "memory snapshot flushed");
        Ok(())
    }

    /// Validate input length (rejects empty and whitespace-only inputs).
    pub(crate) fn validate_input_length(text: &str) -> Result<(), Error> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        if text.len() > MAX_INPUT_LENGTH {
            return Err(Error::InputTooLong {
                max_length: MAX_INPUT_LENGTH,
                actual_length: text.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn validate_owner(owner: &str) -> Result<(), Error> {
        if owner.trim().is_empty() {
            return Err(Error::Validation("user id cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Borrowing twin of [`Snapshot`] so flushing does not clone the store.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    owners: &'a BTreeMap<String, Vec<Record>>,
}

/// Validate a search limit (1 to MAX_SEARCH_LIMIT).
pub(crate) fn validate_limit(limit: usize) -> Result<(), Error> {
    if limit == 0 {
        return Err(Error::InvalidLimit("limit must be at least 1".to_string()));
    }
    if limit > MAX_SEARCH_LIMIT {
        return Err(Error::InvalidLimit(format!(
            "limit {} exceeds maximum of {}",
            limit, MAX_SEARCH_LIMIT
        )));
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Read the snapshot at `path`, or `None` if there is no file yet.
fn load_snapshot(path: &Path) -> Result<Option<BTreeMap<String, Vec<Record>>>, Error> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(Error::Persistence {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let corrupt = |reason: String| Error::CorruptSnapshot {
        path: path.to_path_buf(),
        reason,
    };

    let snapshot: Snapshot = serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(corrupt(format!(
            "unsupported snapshot version {}",
            snapshot.version
        )));
    }

    {
        let mut seen = std::collections::HashSet::new();
        for (owner, records) in &snapshot.owners {
            for record in records {
                if &record.owner != owner {
                    return Err(corrupt(format!(
                        "memory {} is filed under {} but owned by {}",
                        record.id, owner, record.owner
                    )));
                }
                if !seen.insert(record.id.as_str()) {
                    return Err(corrupt(format!("duplicate memory id {}", record.id)));
                }
            }
        }
    }

    let mut owners = snapshot.owners;
    owners.retain(|_, records| !records.is_empty());
    Ok(Some(owners))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_limit_bounds() {
        assert!(matches!(validate_limit(0), Err(Error::InvalidLimit(_))));
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(MAX_SEARCH_LIMIT).is_ok());
        assert!(matches!(
            validate_limit(MAX_SEARCH_LIMIT + 1),
            Err(Error::InvalidLimit(_))
        ));
    }

    #[test]
    fn test_validate_input_length() {
        assert!(matches!(
            MemoryStore::validate_input_length(""),
            Err(Error::EmptyInput)
        ));
        assert!(matches!(
            MemoryStore::validate_input_length("   \n"),
            Err(Error::EmptyInput)
        ));
        assert!(MemoryStore::validate_input_length("ok").is_ok());

        let long_text = "x".repeat(MAX_INPUT_LENGTH + 1);
        assert!(matches!(
            MemoryStore::validate_input_length(&long_text),
            Err(Error::InputTooLong { .. })
        ));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = PathBuf::from("/data/memories.json");
        assert_eq!(temp_path_for(&path), PathBuf::from("/data/memories.json.tmp"));
    }

    #[test]
    fn test_open_accepts_relative_parent_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();

        let path = nested.join("..").join("shared").join("memories.json");
        let mut store = MemoryStore::open(&path).unwrap();
        store.add("alice", "kept", Default::default()).unwrap();

        assert!(dir.path().join("shared").join("memories.json").exists());
    }

    #[test]
    fn test_open_rejects_empty_path() {
        let result = MemoryStore::open("");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load_snapshot(&dir.path().join("absent.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("memories.json");
        fs::write(&path, r#"{"version": 99, "owners": {}}"#).unwrap();

        let result = load_snapshot(&path);
        assert!(matches!(result, Err(Error::CorruptSnapshot { .. })));
    }

    #[test]
    fn test_load_rejects_misfiled_record() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("memories.json");
        fs::write(
            &path,
            r#"{"version": 1, "owners": {"alice": [{
                "id": "a", "text": "t", "owner": "bob",
                "created_at": "2024-01-01T00:00:00Z"
            }]}}"#,
        )
        .unwrap();

        let result = load_snapshot(&path);
        assert!(matches!(result, Err(Error::CorruptSnapshot { .. })));
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("memories.json");
        fs::write(
            &path,
            r#"{"version": 1, "owners": {
                "alice": [{"id": "a", "text": "t", "owner": "alice", "created_at": "2024-01-01T00:00:00Z"}],
                "bob": [{"id": "a", "text": "t", "owner": "bob", "created_at": "2024-01-01T00:00:00Z"}]
            }}"#,
        )
        .unwrap();

        let result = load_snapshot(&path);
        assert!(matches!(result, Err(Error::CorruptSnapshot { .. })));
    }
}
