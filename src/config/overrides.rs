//! Environment variable overrides for configuration.

use crate::errors::Error;
use std::path::PathBuf;

use super::env_parser;

#[cfg(test)]
use super::tests_utils::{ENV_MUTEX, cleanup_env_vars};

/// Apply environment variable overrides to configuration.
pub fn apply_env_overrides(
    storage_path: &mut PathBuf,
    default_owner: &mut String,
    search_limit: &mut usize,
) -> Result<(), Error> {
    env_parser::apply_storage_path_override(storage_path)?;
    env_parser::apply_default_owner_override(default_owner)?;
    env_parser::apply_search_limit_override(search_limit)?;
    Ok(())
}
