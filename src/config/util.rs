//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// ```text
/// /home/user/site/src/content/blog/  ← start
/// /home/user/site/petrona.toml       ← found!
/// ```
///
/// An absolute `config_name` is used as-is.
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_config_upward() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src/content/blog");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("petrona.toml"), "").unwrap();

        let found = find_config_file(&nested, Path::new("petrona.toml")).unwrap();
        assert_eq!(found, dir.path().join("petrona.toml"));
    }

    #[test]
    fn test_find_config_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        assert!(find_config_file(dir.path(), &path).is_none());

        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(Path::new("/"), &path), Some(path));
    }

    #[test]
    fn test_directory_with_config_name_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a");
        fs::create_dir_all(nested.join("petrona.toml")).unwrap();
        fs::write(dir.path().join("petrona.toml"), "").unwrap();

        let found = find_config_file(&nested, Path::new("petrona.toml")).unwrap();
        assert_eq!(found, dir.path().join("petrona.toml"));
    }
}
