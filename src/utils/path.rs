//! Path utilities.
//!
//! Pure functions for path manipulation, plus `normalize_path` which touches
//! the filesystem only to canonicalize.

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first, then falls back to joining relative paths
/// with the current directory.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a CLI path: absolute as-is, cwd-relative if it exists,
/// otherwise relative to `fallback_dir`.
#[inline]
pub fn resolve_path(path: &Path, fallback_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if path.exists() {
        return normalize_path(path);
    }
    normalize_path(&fallback_dir.join(path))
}

/// Join the normal components of a relative path with `/`.
///
/// `blog\2024\post.md` and `blog/2024/post.md` both give `blog/2024/post.md`.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_relative_becomes_absolute() {
        let normalized = normalize_path(Path::new("relative/path/file.txt"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_resolve_path_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_path(Path::new("missing-here.md"), dir.path());
        assert!(resolved.ends_with("missing-here.md"));
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("blog/2024/post.md")), "blog/2024/post.md");
        assert_eq!(to_slash(Path::new("./about/index.html")), "about/index.html");
        assert_eq!(to_slash(Path::new("")), "");
    }
}
