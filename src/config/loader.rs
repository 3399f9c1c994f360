//! Configuration file loading and parsing.

use crate::errors::Error;
use crate::tools::DEFAULT_SEARCH_LIMIT;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration loaded from TOML file.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub storage_path: PathBuf,

    #[serde(default)]
    pub default_owner: String,

    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

/// Location of the user's config file.
pub fn config_file_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));

    config_dir.join("openmemory/config.toml")
}

/// Load configuration from the user's TOML file, if present.
pub fn load_from_file() -> Result<Option<ConfigFile>, Error> {
    load_from_path(&config_file_path())
}

/// Load configuration from a TOML file, or `None` if it does not exist.
pub fn load_from_path(config_path: &Path) -> Result<Option<ConfigFile>, Error> {
    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(config_path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {e}",
            config_path.display()
        ))
    })?;

    let config: ConfigFile = toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file {}: {e}",
            config_path.display()
        ))
    })?;

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_toml() {
        let content = r#"
This is not valid TOML
 [[unclosed bracket
 "#;

        let result: Result<ConfigFile, _> = toml::from_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config_file() {
        let result: Result<ConfigFile, _> = toml::from_str("");
        assert!(result.is_ok());

        let config = result.unwrap();
        assert!(config.storage_path.as_os_str().is_empty());
        assert!(config.default_owner.is_empty());
        assert_eq!(config.search_limit, 10); // Should use default, not usize::default() (0)
    }

    #[test]
    fn test_config_file_partial_toml() {
        let content = r#"
            storage_path = "/test/memories.json"
        "#;

        let config: ConfigFile = toml::from_str(content).unwrap();
        assert_eq!(config.storage_path, PathBuf::from("/test/memories.json"));
        assert_eq!(config.search_limit, 10);
    }

    #[test]
    fn test_load_from_missing_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load_from_path(&dir.path().join("config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_from_path_reports_parse_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "search_limit = \"many\"").unwrap();

        let result = load_from_path(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
