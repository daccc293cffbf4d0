//! Site configuration management for `petrona.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [build], [content], [nav], [theme]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # upward config file search
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! Every section is optional; a missing config file means all defaults.

pub mod section;
pub mod types;
mod util;

pub use section::{
    BuildSectionConfig, ContentSectionConfig, NavSectionConfig, ThemeSectionConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};
pub use util::find_config_file;

use crate::{debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "petrona.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing petrona.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub content: ContentSectionConfig,

    #[serde(default)]
    pub nav: NavSectionConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub theme: ThemeSectionConfig,
}

impl SiteConfig {
    /// Load configuration, searching upward from cwd for `config_name`.
    ///
    /// Without a config file the defaults apply and the root is the cwd.
    pub fn load(config_name: &Path) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(&cwd, config_name)
    }

    /// Same as [`Self::load`], searching from `start`.
    pub fn load_from(start: &Path, config_name: &Path) -> Result<Self> {
        let mut config = match find_config_file(start, config_name) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "no {} found, using defaults", config_name.display());
                Self {
                    root: start.to_path_buf(),
                    config_path: start.join(config_name),
                    ..Self::default()
                }
            }
        };

        if config.root.as_os_str().is_empty() {
            config.root = start.to_path_buf();
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("invalid {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Check semantic constraints of every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.content.validate(&mut diag);
        self.nav.validate(&mut diag);
        self.theme.validate(&mut diag);

        if !self.content_dir().is_dir() {
            diag.warn(
                FieldPath::new("content.dir"),
                format!("directory '{}' not found", self.content.dir.display()),
            );
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root_join(&self.content.dir)
    }

    /// Directory of the validated collection (`src/content/blog` by default).
    pub fn collection_dir(&self) -> PathBuf {
        self.root_join(self.content.collection_dir())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root_join(&self.build.output)
    }
}

// ============================================================================
// tests
// ============================================================================
