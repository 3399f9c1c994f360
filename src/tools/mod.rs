//! Tool dispatch layer.
//!
//! Routes named tool invocations with loosely-typed JSON arguments to a
//! [`MemoryProvider`] and renders every outcome, success or failure, as text
//! blocks. Argument schemas and text formatting live in submodules.
//!
//! The dispatcher is the only recovery boundary: store errors never escape
//! [`ToolDispatcher::dispatch`].

mod format;
mod schemas;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::errors::Error;
use crate::output::{StatusResponse, TextContent};
use crate::provider::MemoryProvider;

pub use schemas::{
    AddMemoriesArgs, DeleteMemoryArgs, OwnerArgs, SearchMemoryArgs, ToolName, ToolSpec,
    UpdateMemoryArgs, tool_catalogue,
};

/// Owner used when a call does not name one.
pub const DEFAULT_OWNER: &str = "default_user";
/// Result limit used when `search_memory` does not set one.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Why a tool invocation failed.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required argument '{field}' for {tool}")]
    MissingArgument {
        tool: &'static str,
        field: &'static str,
    },

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: &'static str, message: String },

    #[error(transparent)]
    Store(#[from] Error),
}

/// Routes tool invocations to a memory provider.
pub struct ToolDispatcher<P> {
    provider: P,
    default_owner: String,
    search_limit: usize,
}

impl<P: MemoryProvider> ToolDispatcher<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            default_owner: DEFAULT_OWNER.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Owner applied when a call omits `owner`.
    pub fn with_default_owner(mut self, owner: impl Into<String>) -> Self {
        self.default_owner = owner.into();
        self
    }

    /// Limit applied when `search_memory` omits `limit`.
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Catalogue of supported tools with this dispatcher's defaults filled in.
    pub fn tools(&self) -> Vec<ToolSpec> {
        tool_catalogue(&self.default_owner, self.search_limit)
    }

    /// Run one invocation, always producing text blocks.
    pub fn dispatch(&mut self, name: &str, arguments: &Map<String, Value>) -> Vec<TextContent> {
        let text = match self.call(name, arguments) {
            Ok(text) => text,
            Err(err) => {
                error!(tool = name, error = %err, "tool invocation failed");
                describe_error(name, &err)
            }
        };
        vec![TextContent::text(text)]
    }

    /// Run one invocation, keeping the error kind.
    pub fn call(&mut self, name: &str, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let tool = ToolName::parse(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        debug!(tool = tool.as_str(), "dispatching tool call");

        match tool {
            ToolName::AddMemories => {
                let args: AddMemoriesArgs = parse_args(tool, arguments)?;
                let text = required(tool, "text", args.text)?;
                let owner = self.owner(args.owner);
                let record = self
                    .provider
                    .add(&owner, &text, args.metadata.unwrap_or_default())?;
                Ok(format::added(&record))
            }
            ToolName::SearchMemory => {
                let args: SearchMemoryArgs = parse_args(tool, arguments)?;
                let query = required(tool, "query", args.query)?;
                let owner = self.owner(args.owner);
                let limit = args.limit.unwrap_or(self.search_limit);
                let records = self.provider.search(&owner, &query, limit)?;
                Ok(format::search_results(&query, &records))
            }
            ToolName::ListMemories => {
                let args: OwnerArgs = parse_args(tool, arguments)?;
                let owner = self.owner(args.owner);
                let records = self.provider.list_all(&owner)?;
                Ok(format::memory_list(&owner, &records))
            }
            ToolName::DeleteAllMemories => {
                let args: OwnerArgs = parse_args(tool, arguments)?;
                let owner = self.owner(args.owner);
                let count = self.provider.delete_all(&owner)?;
                Ok(format::deleted_all(&owner, count))
            }
            ToolName::DeleteMemory => {
                let args: DeleteMemoryArgs = parse_args(tool, arguments)?;
                let memory_id = required(tool, "memory_id", args.memory_id)?;
                let owner = self.owner(args.owner);
                let record = self.provider.delete_one(&owner, &memory_id)?;
                Ok(format::deleted(&record))
            }
            ToolName::UpdateMemory => {
                let args: UpdateMemoryArgs = parse_args(tool, arguments)?;
                let memory_id = required(tool, "memory_id", args.memory_id)?;
                let new_text = required(tool, "new_text", args.new_text)?;
                let owner = self.owner(args.owner);
                let record = self
                    .provider
                    .update(&owner, &memory_id, &new_text, args.metadata)?;
                Ok(format::updated(&record))
            }
            ToolName::GetStatus => {
                let report = StatusResponse::running(self.provider.status());
                Ok(format::status(&report))
            }
        }
    }

    fn owner(&self, owner: Option<String>) -> String {
        owner.unwrap_or_else(|| self.default_owner.clone())
    }
}

/// Text shown to the client for a failed invocation of `tool`.
pub fn describe_error(tool: &str, err: &ToolError) -> String {
    format::error(tool, err)
}

fn parse_args<T: DeserializeOwned>(
    tool: ToolName,
    arguments: &Map<String, Value>,
) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments.clone())).map_err(|e| {
        ToolError::InvalidArguments {
            tool: tool.as_str(),
            message: e.to_string(),
        }
    })
}

/// Unwrap a required string argument; absent and empty both count as missing.
fn required(tool: ToolName, field: &'static str, value: Option<String>) -> Result<String, ToolError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ToolError::MissingArgument {
            tool: tool.as_str(),
            field,
        }),
    }
}
