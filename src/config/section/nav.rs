//! `[nav]` configuration for active link highlighting.
//!
//! # Example
//!
//! ```toml
//! [nav]
//! active = "text-zinc-200"     # Class token for links to the current page
//! inactive = "text-zinc-500"   # Class token for every other link
//! trailing_slash = false       # Routes of `dir/index.html` end in `/`
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::nav::{DEFAULT_ACTIVE, DEFAULT_INACTIVE, NavMarkers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSectionConfig {
    pub active: String,
    pub inactive: String,
    pub trailing_slash: bool,
}

impl Default for NavSectionConfig {
    fn default() -> Self {
        Self {
            active: DEFAULT_ACTIVE.into(),
            inactive: DEFAULT_INACTIVE.into(),
            trailing_slash: false,
        }
    }
}

impl NavSectionConfig {
    #[inline]
    pub fn markers(&self) -> NavMarkers<'_> {
        NavMarkers {
            inactive: &self.inactive,
            active: &self.active,
        }
    }

    /// Markers must be single, distinct class tokens.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, value) in [
            (FieldPath::new("nav.active"), &self.active),
            (FieldPath::new("nav.inactive"), &self.inactive),
        ] {
            if value.is_empty() {
                diag.error(field, "must not be empty");
            } else if value.split_ascii_whitespace().count() != 1 || value.trim() != value {
                diag.error_with_hint(
                    field,
                    format!("`{value}` is not a single class token"),
                    "use one class name without spaces",
                );
            }
        }

        if !self.active.is_empty() && self.active == self.inactive {
            diag.error(
                FieldPath::new("nav.active"),
                "must differ from `nav.inactive`",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(active: &str, inactive: &str) -> usize {
        let nav = NavSectionConfig {
            active: active.into(),
            inactive: inactive.into(),
            trailing_slash: false,
        };
        let mut diag = ConfigDiagnostics::new();
        nav.validate(&mut diag);
        diag.len()
    }

    #[test]
    fn test_defaults_valid() {
        assert_eq!(check(DEFAULT_ACTIVE, DEFAULT_INACTIVE), 0);
    }

    #[test]
    fn test_invalid_markers() {
        assert_eq!(check("", DEFAULT_INACTIVE), 1);
        assert_eq!(check("font-bold text-white", DEFAULT_INACTIVE), 1);
        assert_eq!(check("same", "same"), 1);
        assert_eq!(check("", ""), 2);
    }

    #[test]
    fn test_markers_borrow_config() {
        let nav = NavSectionConfig::default();
        assert_eq!(nav.markers(), NavMarkers::default());
    }
}
