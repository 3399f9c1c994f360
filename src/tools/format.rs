//! Human-readable rendering of tool results and errors.

use std::fmt::Write;

use crate::errors::Error;
use crate::memory_types::Record;
use crate::output::StatusResponse;

use super::ToolError;

pub(crate) fn added(record: &Record) -> String {
    let mut out = format!(
        "Memory added successfully.\nContent: {}\nID: {}\nCreated: {}",
        record.text,
        record.id,
        record.created_at.to_rfc3339()
    );
    if !record.metadata.is_empty() {
        let _ = write!(out, "\nMetadata: {}", metadata_json(record));
    }
    out
}

pub(crate) fn search_results(query: &str, records: &[Record]) -> String {
    if records.is_empty() {
        return format!("No memories found matching '{}'", query);
    }
    let mut out = format!("Found {} matching memories:\n", records.len());
    write_records(&mut out, records);
    out
}

pub(crate) fn memory_list(owner: &str, records: &[Record]) -> String {
    if records.is_empty() {
        return format!("No memories stored for user {}", owner);
    }
    let mut out = format!(
        "All memories for user {} ({} total):\n",
        owner,
        records.len()
    );
    write_records(&mut out, records);
    out
}

pub(crate) fn deleted_all(owner: &str, count: usize) -> String {
    format!("Deleted {} memories for user {}", count, owner)
}

pub(crate) fn deleted(record: &Record) -> String {
    format!("Deleted memory {}\nContent: {}", record.id, record.text)
}

pub(crate) fn updated(record: &Record) -> String {
    let mut out = format!(
        "Memory {} updated successfully.\nContent: {}",
        record.id, record.text
    );
    if let Some(updated_at) = record.updated_at {
        let _ = write!(out, "\nUpdated: {}", updated_at.to_rfc3339());
    }
    out
}

pub(crate) fn status(report: &StatusResponse) -> String {
    match serde_json::to_string_pretty(report) {
        Ok(json) => format!("Server status:\n{}", json),
        Err(e) => format!("Server status unavailable: {}", e),
    }
}

/// Map a dispatch failure to the text shown to the client.
pub(crate) fn error(tool: &str, err: &ToolError) -> String {
    match err {
        ToolError::UnknownTool(name) => format!("Unknown tool: {}", name),
        ToolError::MissingArgument { field, .. } => {
            format!("Error: missing required argument '{}'", field)
        }
        ToolError::InvalidArguments { message, .. } => {
            format!("Error: invalid arguments for {}: {}", tool, message)
        }
        ToolError::Store(e) if e.is_validation() => format!("Error: {}", e),
        ToolError::Store(e @ Error::NotFound { .. }) => format!("Error: {}", e),
        ToolError::Store(e @ Error::Persistence { .. }) => format!(
            "Error executing {}: {}. The change was applied in memory but may not survive a restart.",
            tool, e
        ),
        ToolError::Store(e) => format!("Error executing {}: {}", tool, e),
    }
}

fn write_records(out: &mut String, records: &[Record]) {
    for (i, record) in records.iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. {}\n   ID: {}\n   Created: {}\n",
            i + 1,
            record.text,
            record.id,
            record.created_at.to_rfc3339()
        );
        if !record.metadata.is_empty() {
            let _ = writeln!(out, "   Metadata: {}", metadata_json(record));
        }
    }
}

fn metadata_json(record: &Record) -> String {
    serde_json::to_string(&record.metadata).unwrap_or_default()
}
