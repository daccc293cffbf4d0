//! Content validation error types.

use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// FieldError
// ============================================================================

/// A single field-level problem in a content record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Frontmatter key, with an index for list items (`tags[2]`).
    /// Record-level problems use `*`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Display with the field path highlighted, for terminal reports.
    pub fn colored(&self) -> String {
        format!(
            "{}{}{} {}",
            "[".dimmed(),
            self.field.cyan(),
            "]".dimmed(),
            self.message
        )
    }
}

// ============================================================================
// SchemaErrors
// ============================================================================

/// Every field error found in one record.
///
/// Validation never stops at the first problem, so a single pass reports
/// everything the author has to fix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaErrors {
    errors: Vec<FieldError>,
}

impl SchemaErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// True if any error is reported against `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

// ============================================================================
// FrontmatterError
// ============================================================================

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("invalid YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML frontmatter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("frontmatter must be a table of fields")]
    NotATable,
}

// ============================================================================
// ContentError
// ============================================================================

/// Failures loading a collection (as opposed to records failing the schema).
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("collection directory `{}` not found", .0.display())]
    MissingDir(PathBuf),

    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
}
