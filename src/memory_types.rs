//! Memory store data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form metadata attached to a record.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A single stored memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-wide unique identifier (UUID v4).
    pub id: String,
    /// Stored content.
    pub text: String,
    /// Namespace the record belongs to.
    pub owner: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    /// Set on the first update, absent before that.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Record and owner counts for status reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total_memories: usize,
    pub total_owners: usize,
}
