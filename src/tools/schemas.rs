//! Tool names, per-tool argument structs, and the advertised catalogue.

use serde::Deserialize;
use serde::Serialize;
use serde_json::{Value, json};

use crate::memory_types::Metadata;

/// Every operation the dispatcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    AddMemories,
    SearchMemory,
    ListMemories,
    DeleteAllMemories,
    DeleteMemory,
    UpdateMemory,
    GetStatus,
}

impl ToolName {
    pub const ALL: [ToolName; 7] = [
        ToolName::AddMemories,
        ToolName::SearchMemory,
        ToolName::ListMemories,
        ToolName::DeleteAllMemories,
        ToolName::DeleteMemory,
        ToolName::UpdateMemory,
        ToolName::GetStatus,
    ];

    /// Canonical wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::AddMemories => "add_memories",
            ToolName::SearchMemory => "search_memory",
            ToolName::ListMemories => "list_memories",
            ToolName::DeleteAllMemories => "delete_all_memories",
            ToolName::DeleteMemory => "delete_memory",
            ToolName::UpdateMemory => "update_memory",
            ToolName::GetStatus => "get_status",
        }
    }

    /// Resolve a wire name. `get_server_status` and `get_api_status` are
    /// older names for `get_status`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "get_server_status" | "get_api_status" => Some(ToolName::GetStatus),
            _ => Self::ALL.into_iter().find(|tool| tool.as_str() == name),
        }
    }

    fn description(self) -> &'static str {
        match self {
            ToolName::AddMemories => "Store a new memory",
            ToolName::SearchMemory => "Find memories containing the query text",
            ToolName::ListMemories => "List all stored memories",
            ToolName::DeleteAllMemories => "Delete all memories",
            ToolName::DeleteMemory => "Delete one memory by ID",
            ToolName::UpdateMemory => "Replace the text of an existing memory",
            ToolName::GetStatus => "Report backend, storage location, and memory counts",
        }
    }
}

/// Arguments of `add_memories`.
#[derive(Debug, Deserialize)]
pub struct AddMemoriesArgs {
    pub text: Option<String>,
    #[serde(alias = "user_id")]
    pub owner: Option<String>,
    pub metadata: Option<Metadata>,
}

/// Arguments of `search_memory`.
#[derive(Debug, Deserialize)]
pub struct SearchMemoryArgs {
    pub query: Option<String>,
    #[serde(alias = "user_id")]
    pub owner: Option<String>,
    pub limit: Option<usize>,
}

/// Arguments of `list_memories` and `delete_all_memories`.
#[derive(Debug, Deserialize)]
pub struct OwnerArgs {
    #[serde(alias = "user_id")]
    pub owner: Option<String>,
}

/// Arguments of `delete_memory`.
#[derive(Debug, Deserialize)]
pub struct DeleteMemoryArgs {
    pub memory_id: Option<String>,
    #[serde(alias = "user_id")]
    pub owner: Option<String>,
}

/// Arguments of `update_memory`.
#[derive(Debug, Deserialize)]
pub struct UpdateMemoryArgs {
    pub memory_id: Option<String>,
    pub new_text: Option<String>,
    #[serde(alias = "user_id")]
    pub owner: Option<String>,
    pub metadata: Option<Metadata>,
}

/// One catalogue entry as advertised to the host.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Build the catalogue with the dispatcher's effective defaults.
pub fn tool_catalogue(default_owner: &str, search_limit: usize) -> Vec<ToolSpec> {
    let owner = json!({
        "type": "string",
        "description": "User identifier (alias: user_id)",
        "default": default_owner,
    });
    let metadata = json!({
        "type": "object",
        "description": "Optional metadata for the memory",
    });

    ToolName::ALL
        .into_iter()
        .map(|tool| {
            let input_schema = match tool {
                ToolName::AddMemories => json!({
                    "type": "object",
                    "properties": {
                        "text": {"type": "string", "description": "Text to store as a memory"},
                        "owner": owner,
                        "metadata": metadata,
                    },
                    "required": ["text"],
                }),
                ToolName::SearchMemory => json!({
                    "type": "object",
                    "properties": {
                        "query": {"type": "string", "description": "Text to search for"},
                        "owner": owner,
                        "limit": {
                            "type": "integer",
                            "description": "Maximum number of results",
                            "default": search_limit,
                        },
                    },
                    "required": ["query"],
                }),
                ToolName::ListMemories | ToolName::DeleteAllMemories => json!({
                    "type": "object",
                    "properties": {"owner": owner},
                }),
                ToolName::DeleteMemory => json!({
                    "type": "object",
                    "properties": {
                        "memory_id": {"type": "string", "description": "ID of the memory to delete"},
                        "owner": owner,
                    },
                    "required": ["memory_id"],
                }),
                ToolName::UpdateMemory => json!({
                    "type": "object",
                    "properties": {
                        "memory_id": {"type": "string", "description": "ID of the memory to update"},
                        "new_text": {"type": "string", "description": "Replacement text"},
                        "owner": owner,
                        "metadata": metadata,
                    },
                    "required": ["memory_id", "new_text"],
                }),
                ToolName::GetStatus => json!({"type": "object", "properties": {}}),
            };
            ToolSpec {
                name: tool.as_str(),
                description: tool.description(),
                input_schema,
            }
        })
        .collect()
}
