//! Tilde (`~`) expansion for configured paths.

use std::path::{Path, PathBuf};

/// Expand a leading `~` to the home directory, in place.
pub fn expand_tilde(path: &mut PathBuf) {
    if path.starts_with("~") {
        *path = expand_tilde_path(path);
    }
}

/// Expand a leading `~` to the home directory.
///
/// Paths without a leading `~`, or systems without a home directory, are
/// returned unchanged.
pub fn expand_tilde_path(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let mut path = PathBuf::from("~/.openmemory/memories.json");
        expand_tilde(&mut path);

        assert!(!path.starts_with("~"));
        assert!(path.starts_with(&home));
        assert!(path.ends_with(".openmemory/memories.json"));
    }

    #[test]
    fn test_expand_tilde_no_tilde() {
        let mut path = PathBuf::from("/absolute/memories.json");
        let original = path.clone();

        expand_tilde(&mut path);

        assert_eq!(path, original);
    }

    #[test]
    fn test_tilde_inside_name_untouched() {
        let path = PathBuf::from("/data/~backup/memories.json");
        assert_eq!(expand_tilde_path(&path), path);
    }
}
