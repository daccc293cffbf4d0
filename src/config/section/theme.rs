//! `[theme]` section configuration.
//!
//! Mirrors the Tailwind config the site is styled with.
//!
//! # Example
//!
//! ```toml
//! [theme]
//! content = ["./src/**/*.{astro,html,js,jsx,md,mdx,svelte,ts,tsx,vue}"]
//!
//! [theme.font_family]
//! petrona = ["Petrona", "serif"]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default Tailwind `content` glob.
pub const DEFAULT_CONTENT_GLOB: &str = "./src/**/*.{astro,html,js,jsx,md,mdx,svelte,ts,tsx,vue}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSectionConfig {
    /// Files Tailwind scans for class names.
    pub content: Vec<String>,

    /// Family name to font stack, in declaration order.
    pub font_family: IndexMap<String, Vec<String>>,
}

impl Default for ThemeSectionConfig {
    fn default() -> Self {
        let mut font_family = IndexMap::new();
        font_family.insert("petrona".into(), vec!["Petrona".into(), "serif".into()]);
        Self {
            content: vec![DEFAULT_CONTENT_GLOB.into()],
            font_family,
        }
    }
}

impl ThemeSectionConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.content.is_empty() {
            diag.error_with_hint(
                FieldPath::new("theme.content"),
                "no content globs",
                "Tailwind emits no utilities without files to scan",
            );
        }
        if self.content.iter().any(|glob| glob.trim().is_empty()) {
            diag.error(FieldPath::new("theme.content"), "globs must not be empty");
        }

        for (family, stack) in &self.font_family {
            if family.trim().is_empty() {
                diag.error(FieldPath::new("theme.font_family"), "family name must not be empty");
            }
            if stack.is_empty() || stack.iter().any(|font| font.trim().is_empty()) {
                diag.error(
                    FieldPath::new("theme.font_family"),
                    format!("font stack of `{family}` is empty"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ThemeSectionConfig::default();
        assert_eq!(theme.content, vec![DEFAULT_CONTENT_GLOB]);
        assert_eq!(theme.font_family["petrona"], vec!["Petrona", "serif"]);

        let mut diag = ConfigDiagnostics::new();
        theme.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_empty_values_rejected() {
        let mut theme = ThemeSectionConfig {
            content: Vec::new(),
            ..Default::default()
        };
        theme.font_family.insert("mono".into(), Vec::new());

        let mut diag = ConfigDiagnostics::new();
        theme.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }
}
