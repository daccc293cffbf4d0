//! `[build]` section configuration.
//!
//! ```toml
//! [build]
//! output = "dist"   # Rendered site, scanned by `petrona highlight`
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Build output directory (relative to site root).
    pub output: PathBuf,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
        }
    }
}
