//! Common utilities shared across CLI commands.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::utils::path::resolve_path;

/// Expand CLI paths into files accepted by `is_wanted`.
///
/// A single `-` reads paths from stdin. Relative paths are tried against the
/// working directory, then against `base_dir`. Directories are expanded with
/// `walk`.
pub fn collect_files(
    paths: &[PathBuf],
    base_dir: &Path,
    is_wanted: impl Fn(&Path) -> bool,
    walk: impl Fn(&Path) -> Vec<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let paths: Vec<PathBuf> = if paths.len() == 1 && paths[0].as_os_str() == "-" {
        read_paths_from_stdin()?
    } else {
        paths.to_vec()
    };

    let mut files = Vec::new();
    for path in &paths {
        let resolved = resolve_path(path, base_dir);

        if resolved.is_file() {
            if !is_wanted(&resolved) {
                bail!("Not a supported file: {}", path.display());
            }
            files.push(resolved);
        } else if resolved.is_dir() {
            files.extend(walk(&resolved));
        } else {
            bail!(
                "Path not found: {}\n  Tried:\n    - {}\n    - {}",
                path.display(),
                path.display(),
                base_dir.join(path).display()
            );
        }
    }

    Ok(files)
}

/// Read paths from stdin (one per line)
pub fn read_paths_from_stdin() -> Result<Vec<PathBuf>> {
    let stdin = io::stdin();
    let mut paths = Vec::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }

    Ok(paths)
}
