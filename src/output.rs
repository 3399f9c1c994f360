//! Wire and report types shared by the dispatcher and the CLI.

use serde::{Deserialize, Serialize};

use crate::provider::ProviderStatus;

/// One text block of a tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl TextContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

/// A tool invocation read by the stdio adapter.
#[derive(Debug, Deserialize)]
pub struct ToolRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

/// A tool result written by the stdio adapter.
#[derive(Debug, Serialize)]
pub struct ToolResponse {
    pub content: Vec<TextContent>,
}

/// Report rendered by `get_status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub server_name: String,
    pub version: String,
    pub status: String,
    #[serde(flatten)]
    pub provider: ProviderStatus,
}

impl StatusResponse {
    pub fn running(provider: ProviderStatus) -> Self {
        Self {
            server_name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "Running".to_string(),
            provider,
        }
    }
}

/// Print a value as formatted JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}
