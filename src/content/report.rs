//! Collection validation report.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;

use super::FieldError;
use crate::utils::plural_s;

/// Field errors grouped by source file.
#[derive(Debug, Default)]
pub struct CollectionReport {
    files: BTreeMap<PathBuf, Vec<FieldError>>,
    checked: usize,
}

impl CollectionReport {
    pub fn new(checked: usize) -> Self {
        Self {
            files: BTreeMap::new(),
            checked,
        }
    }

    pub fn add(&mut self, path: &Path, error: FieldError) {
        self.files.entry(path.to_path_buf()).or_default().push(error);
    }

    pub fn extend(&mut self, path: &Path, errors: Vec<FieldError>) {
        if errors.is_empty() {
            return;
        }
        self.files
            .entry(path.to_path_buf())
            .or_default()
            .extend(errors);
    }

    /// True when every record passed.
    pub fn is_ok(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of records looked at.
    pub fn checked(&self) -> usize {
        self.checked
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn error_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn errors_for(&self, path: &Path) -> Option<&[FieldError]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Keep only the files `keep` accepts.
    pub fn retain(&mut self, mut keep: impl FnMut(&Path) -> bool) {
        self.files.retain(|path, _| keep(path));
    }

    /// Print every failing file with its errors to stderr.
    ///
    /// Paths are shown relative to `root` when possible.
    pub fn print(&self, root: &Path) {
        if self.files.is_empty() {
            return;
        }
        eprintln!();

        for (path, errors) in &self.files {
            let shown = path.strip_prefix(root).unwrap_or(path);
            eprintln!(
                "{}{}{}",
                "[".dimmed(),
                shown.display().cyan(),
                "]".dimmed()
            );
            for e in errors {
                eprintln!("{} {}", "→".red(), e.colored());
            }
        }
        eprintln!();
    }
}

impl fmt::Display for CollectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.error_count();
        if errors == 0 {
            return write!(f, "{}", "all entries valid".green());
        }

        let files = self.file_count();
        write!(
            f,
            "{} {} {}",
            "found".dimmed(),
            errors.to_string().red().bold(),
            format!(
                "error{} in {files} file{}",
                plural_s(errors),
                plural_s(files)
            )
            .dimmed()
        )
    }
}
