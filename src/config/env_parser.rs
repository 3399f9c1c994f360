//! Environment variable parsing utilities for configuration.

use crate::errors::Error;
use std::path::PathBuf;

use super::paths;

pub const STORAGE_PATH_VAR: &str = "OPENMEMORY_STORAGE_PATH";
pub const DEFAULT_OWNER_VAR: &str = "OPENMEMORY_DEFAULT_OWNER";
pub const SEARCH_LIMIT_VAR: &str = "OPENMEMORY_SEARCH_LIMIT";

/// Parse environment variable value or return error if empty/whitespace.
fn parse_env_string(name: &str, value: &str) -> Result<String, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(value.to_string())
}

/// Parse environment variable as a path, expanding tilde.
fn parse_env_path(name: &str, value: &str) -> Result<PathBuf, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(paths::expand_tilde_path(&PathBuf::from(value)))
}

/// Parse environment variable as an unsigned integer; range is checked by validation.
fn parse_env_usize(name: &str, value: &str) -> Result<usize, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {name} value: {e}")))
}

/// Apply OPENMEMORY_STORAGE_PATH environment variable override.
pub fn apply_storage_path_override(storage_path: &mut PathBuf) -> Result<(), Error> {
    if let Ok(val) = std::env::var(STORAGE_PATH_VAR) {
        *storage_path = parse_env_path(STORAGE_PATH_VAR, &val)?;
    }
    Ok(())
}

/// Apply OPENMEMORY_DEFAULT_OWNER environment variable override.
pub fn apply_default_owner_override(default_owner: &mut String) -> Result<(), Error> {
    if let Ok(val) = std::env::var(DEFAULT_OWNER_VAR) {
        *default_owner = parse_env_string(DEFAULT_OWNER_VAR, &val)?;
    }
    Ok(())
}

/// Apply OPENMEMORY_SEARCH_LIMIT environment variable override.
pub fn apply_search_limit_override(search_limit: &mut usize) -> Result<(), Error> {
    if let Ok(val) = std::env::var(SEARCH_LIMIT_VAR) {
        *search_limit = parse_env_usize(SEARCH_LIMIT_VAR, &val)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_string_empty() {
        let result = parse_env_string("TEST_VAR", "");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_env_string_whitespace() {
        let result = parse_env_string("TEST_VAR", "   ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_env_string_valid() {
        let result = parse_env_string("TEST_VAR", "alice");
        assert_eq!(result.unwrap(), "alice");
    }

    #[test]
    fn test_parse_env_usize_invalid() {
        assert!(matches!(
            parse_env_usize("TEST_LIMIT", "ten"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            parse_env_usize("TEST_LIMIT", "-3"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_parse_env_usize_valid() {
        assert_eq!(parse_env_usize("TEST_LIMIT", " 25 ").unwrap(), 25);
    }

    #[test]
    fn test_parse_env_path_plain() {
        let path = parse_env_path("TEST_PATH", "/srv/memories.json").unwrap();
        assert_eq!(path, PathBuf::from("/srv/memories.json"));
    }
}
