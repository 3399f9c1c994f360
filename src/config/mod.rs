//! Configuration system for openmemory.

mod env_parser;
mod loader;
mod overrides;
mod paths;
mod validation;

#[cfg(test)]
mod tests_utils;
#[cfg(test)]
use tests_utils::ENV_MUTEX;

use crate::errors::Error;
use crate::tools::{DEFAULT_OWNER, DEFAULT_SEARCH_LIMIT};
use serde::Deserialize;
use std::path::PathBuf;

pub use loader::ConfigFile;

/// Configuration values with priority: defaults < config file < env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the JSON snapshot file.
    #[serde(default)]
    pub storage_path: PathBuf,

    /// Owner used when a tool call omits one.
    #[serde(default)]
    pub default_owner: String,

    /// Result limit used when a search omits one.
    #[serde(default)]
    pub search_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        // Use home directory with sensible fallback for systems without HOME
        let home = dirs::home_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        });

        Self {
            storage_path: home.join(".openmemory").join("memories.json"),
            default_owner: DEFAULT_OWNER.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration with defaults, file values, and environment overrides.
    pub fn load() -> Result<Self, Error> {
        let file_config = loader::load_from_file()?;
        Self::resolve(file_config)
    }

    fn resolve(file_config: Option<ConfigFile>) -> Result<Self, Error> {
        let mut config = Config::default();

        if let Some(mut file) = file_config {
            paths::expand_tilde(&mut file.storage_path);
            config.merge_from_file(file);
        }

        overrides::apply_env_overrides(
            &mut config.storage_path,
            &mut config.default_owner,
            &mut config.search_limit,
        )?;

        config.validate()?;

        Ok(config)
    }

    /// Merge configuration from a file into this config.
    fn merge_from_file(&mut self, file: ConfigFile) {
        if !file.storage_path.as_os_str().is_empty() {
            self.storage_path = file.storage_path;
        }
        if !file.default_owner.is_empty() {
            self.default_owner = file.default_owner;
        }
        self.search_limit = file.search_limit;
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), Error> {
        let validator = validation::ConfigValidator {
            storage_path: self.storage_path.clone(),
            default_owner: self.default_owner.clone(),
            search_limit: self.search_limit,
        };

        validator.validate()
    }

    /// Ensure the parent directory of the storage path exists.
    pub fn ensure_directories(&self) -> Result<(), Error> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!(
                        "Failed to create storage directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 3] = [
        "OPENMEMORY_STORAGE_PATH",
        "OPENMEMORY_DEFAULT_OWNER",
        "OPENMEMORY_SEARCH_LIMIT",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage_path.ends_with(".openmemory/memories.json"));
        assert_eq!(config.default_owner, "default_user");
        assert_eq!(config.search_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_without_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        tests_utils::cleanup_env_vars(&VARS);

        let config = Config::resolve(None).unwrap();

        assert!(config.storage_path.ends_with(".openmemory/memories.json"));
        assert_eq!(config.default_owner, "default_user");
        assert_eq!(config.search_limit, 10);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        tests_utils::cleanup_env_vars(&VARS);

        let file: ConfigFile = toml::from_str(
            r#"
            storage_path = "/srv/memories.json"
            default_owner = "team"
            search_limit = 25
            "#,
        )
        .unwrap();
        let config = Config::resolve(Some(file)).unwrap();

        assert_eq!(config.storage_path, PathBuf::from("/srv/memories.json"));
        assert_eq!(config.default_owner, "team");
        assert_eq!(config.search_limit, 25);
    }

    #[test]
    fn test_env_overrides_config_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        tests_utils::cleanup_env_vars(&VARS);

        // SAFETY: env access is serialized by ENV_MUTEX.
        unsafe { std::env::set_var("OPENMEMORY_DEFAULT_OWNER", "from-env") };

        let file: ConfigFile = toml::from_str(r#"default_owner = "from-file""#).unwrap();
        let config = Config::resolve(Some(file)).unwrap();
        assert_eq!(config.default_owner, "from-env");

        tests_utils::cleanup_env_vars(&VARS);
    }

    #[test]
    fn test_invalid_file_values_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        tests_utils::cleanup_env_vars(&VARS);

        let file: ConfigFile = toml::from_str("search_limit = 0").unwrap();
        assert!(matches!(Config::resolve(Some(file)), Err(Error::Config(_))));
    }

    #[test]
    fn test_ensure_directories_creates_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            storage_path: dir.path().join("a/b/memories.json"),
            ..Config::default()
        };
        config.ensure_directories().unwrap();
        assert!(dir.path().join("a/b").is_dir());
    }
}
