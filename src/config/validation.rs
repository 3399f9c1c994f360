//! Configuration validation logic.

use crate::errors::Error;
use crate::memory::store::MAX_SEARCH_LIMIT;
use std::path::PathBuf;

/// Validates configuration values.
pub struct ConfigValidator {
    /// Path to the JSON snapshot file.
    pub storage_path: PathBuf,
    /// Owner used when a tool call omits one.
    pub default_owner: String,
    /// Result limit used when a search omits one.
    pub search_limit: usize,
}

impl ConfigValidator {
    /// Validate all configuration values for correctness and constraints.
    ///
    /// Checks that:
    /// - Storage path is not empty
    /// - Default owner is not blank
    /// - Search limit is between 1 and MAX_SEARCH_LIMIT
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any validation check fails.
    pub fn validate(&self) -> Result<(), Error> {
        self.validate_storage_path()?;
        self.validate_default_owner()?;
        self.validate_search_limit()?;

        Ok(())
    }

    fn validate_storage_path(&self) -> Result<(), Error> {
        if self.storage_path.as_os_str().is_empty() {
            return Err(Error::Config("Storage path cannot be empty".to_string()));
        }

        Ok(())
    }

    fn validate_default_owner(&self) -> Result<(), Error> {
        if self.default_owner.trim().is_empty() {
            return Err(Error::Config("Default owner cannot be empty".to_string()));
        }

        Ok(())
    }

    fn validate_search_limit(&self) -> Result<(), Error> {
        if self.search_limit == 0 || self.search_limit > MAX_SEARCH_LIMIT {
            return Err(Error::Config(format!(
                "Invalid search limit: {} (must be between 1 and {})",
                self.search_limit, MAX_SEARCH_LIMIT
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ConfigValidator {
        ConfigValidator {
            storage_path: PathBuf::from("/test/memories.json"),
            default_owner: "default_user".to_string(),
            search_limit: 10,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_empty_storage_path_rejected() {
        let validator = ConfigValidator {
            storage_path: PathBuf::new(),
            ..valid()
        };
        assert!(matches!(validator.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_blank_owner_rejected() {
        let validator = ConfigValidator {
            default_owner: "  ".to_string(),
            ..valid()
        };
        assert!(matches!(validator.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_search_limit_bounds() {
        let mut validator = valid();

        validator.search_limit = 0;
        assert!(matches!(validator.validate(), Err(Error::Config(_))));

        validator.search_limit = 1;
        assert!(validator.validate().is_ok());

        validator.search_limit = MAX_SEARCH_LIMIT;
        assert!(validator.validate().is_ok());

        validator.search_limit = MAX_SEARCH_LIMIT + 1;
        assert!(matches!(validator.validate(), Err(Error::Config(_))));
    }
}
