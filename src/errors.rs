//! Error types for openmemory.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for memory store operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Required text was empty or whitespace only.
    #[error("Input cannot be empty")]
    EmptyInput,

    /// Text exceeded the maximum accepted length.
    #[error("Input too long: {actual_length} bytes (max {max_length})")]
    InputTooLong {
        max_length: usize,
        actual_length: usize,
    },

    /// Result limit outside the accepted range.
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    /// Any other rejected argument.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No record with this id under the owner.
    #[error("Memory {id} not found for user {owner}")]
    NotFound { owner: String, id: String },

    /// Backing file could not be read or written.
    #[error("Storage error at {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backing file was readable but did not hold a valid snapshot.
    #[error("Corrupt snapshot at {}: {reason}", .path.display())]
    CorruptSnapshot { path: PathBuf, reason: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error outside the snapshot file (e.g. the stdio stream).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors caused by the caller's input rather than the store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::EmptyInput
                | Error::InputTooLong { .. }
                | Error::InvalidLimit(_)
                | Error::Validation(_)
        )
    }

    /// True for errors raised by the backing file.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Error::Persistence { .. } | Error::CorruptSnapshot { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(Error::EmptyInput.is_validation());
        assert!(Error::InvalidLimit("0".into()).is_validation());
        assert!(!Error::EmptyInput.is_persistence());

        let err = Error::Persistence {
            path: PathBuf::from("/tmp/memories.json"),
            source: std::io::Error::other("disk full"),
        };
        assert!(err.is_persistence());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotFound {
            owner: "alice".to_string(),
            id: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("abc"));
        assert!(msg.contains("alice"));

        let err = Error::InputTooLong {
            max_length: 100,
            actual_length: 150,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("100"));
        assert!(msg.contains("150"));
    }
}
