//! `[content]` section configuration.
//!
//! ```toml
//! [content]
//! dir = "src/content"   # Root of all collections (relative to site root)
//! collection = "blog"   # Collection validated by `petrona check`
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSectionConfig {
    pub dir: PathBuf,
    pub collection: String,
}

impl Default for ContentSectionConfig {
    fn default() -> Self {
        Self {
            dir: "src/content".into(),
            collection: "blog".into(),
        }
    }
}

impl ContentSectionConfig {
    /// Collection directory relative to the content root.
    pub fn collection_dir(&self) -> PathBuf {
        self.dir.join(&self.collection)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let name = self.collection.trim();
        if name.is_empty() {
            diag.error(FieldPath::new("content.collection"), "must not be empty");
            return;
        }

        let single_dir = matches!(
            Path::new(name).components().collect::<Vec<_>>().as_slice(),
            [Component::Normal(_)]
        );
        if !single_dir {
            diag.error_with_hint(
                FieldPath::new("content.collection"),
                format!("`{name}` is not a directory name"),
                "collections live directly under `content.dir`",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_dir() {
        let content = ContentSectionConfig::default();
        assert_eq!(content.collection_dir(), PathBuf::from("src/content/blog"));
    }

    #[test]
    fn test_collection_name_validated() {
        for (name, ok) in [("blog", true), ("", false), ("  ", false), ("../blog", false), ("a/b", false)] {
            let content = ContentSectionConfig {
                collection: name.into(),
                ..Default::default()
            };
            let mut diag = ConfigDiagnostics::new();
            content.validate(&mut diag);
            assert_eq!(diag.is_empty(), ok, "collection = {name:?}");
        }
    }
}
