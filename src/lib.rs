//! openmemory - A local, file-backed memory store for tool-calling AI agents.
//!
//! Memories are partitioned by owner, kept in insertion order, and persisted as
//! a single JSON snapshot that is rewritten after every mutation. Search is a
//! case-insensitive substring scan; there is no ranking.
//!
//! All operations are synchronous (no async/await required).
//!
//! # Example
//!
//! ```no_run
//! use openmemory::{Config, MemoryStore, ToolDispatcher};
//! use serde_json::json;
//!
//! let config = Config::default();
//! let store = MemoryStore::open(&config.storage_path).expect("Failed to open store");
//! let mut dispatcher = ToolDispatcher::new(store);
//!
//! let arguments = json!({"text": "buy milk", "owner": "alice"});
//! for block in dispatcher.dispatch("add_memories", arguments.as_object().unwrap()) {
//!     println!("{}", block.text);
//! }
//!
//! let found = dispatcher.provider().search("alice", "milk", 10).unwrap();
//! assert_eq!(found.len(), 1);
//! ```

pub mod config;
pub mod errors;
pub mod memory;
pub mod memory_types;
pub mod output;
pub mod provider;
pub mod tools;

// Re-export public API
pub use config::Config;
pub use errors::Error;
pub use memory::MemoryStore;
pub use memory::store::{MAX_INPUT_LENGTH, MAX_SEARCH_LIMIT};
pub use memory_types::{Metadata, Record, StoreStats};
pub use output::TextContent;
pub use provider::{MemoryProvider, ProviderStatus};
pub use tools::{DEFAULT_OWNER, DEFAULT_SEARCH_LIMIT, ToolDispatcher, ToolError};
