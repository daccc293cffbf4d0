//! Content collections: loading, schema validation and reference checks.
//!
//! ```text
//! src/content/blog/
//! ├── first-post.md        -> id "first-post"
//! └── 2024/Hello World.md  -> id "2024/hello-world"
//! ```
//!
//! Records are validated independently (in parallel) against
//! [`schema::validate_post`]; `relatedPosts` ids are then resolved against
//! every id in the collection.

pub mod error;
pub mod frontmatter;
mod report;
pub mod schema;

pub use error::{ContentError, FieldError, SchemaErrors};
pub use report::CollectionReport;
pub use schema::{BlogPost, RawRecord, validate_post};

use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::utils::path::to_slash;

/// File extensions treated as collection entries.
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx", "markdown"];

/// Field name used for problems that concern the whole record.
const RECORD: &str = "*";

/// One content file before validation.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub id: String,
    pub path: PathBuf,
    /// Parsed frontmatter, or why it could not be read.
    pub fields: Result<RawRecord, String>,
}

/// A record that passed the schema and reference checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub path: PathBuf,
    pub post: BlogPost,
}

/// A validated collection.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub entries: Vec<Entry>,
}

impl Collection {
    /// Load and validate every entry below `dir`.
    ///
    /// I/O problems are `Err`; schema problems land in the report.
    pub fn load(dir: &Path) -> Result<(Self, CollectionReport), ContentError> {
        if !dir.is_dir() {
            return Err(ContentError::MissingDir(dir.to_path_buf()));
        }

        let records = collect_files(dir)
            .into_par_iter()
            .map(|path| read_record(dir, path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(validate_records(records))
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries whose `isDraft` is false.
    pub fn published(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.post.is_draft)
    }

    pub fn drafts(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.post.is_draft)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validate records and resolve their references.
///
/// Output entries and report are ordered by path, independent of the order
/// records were validated in.
pub fn validate_records(mut records: Vec<SourceRecord>) -> (Collection, CollectionReport) {
    records.sort_by(|a, b| a.path.cmp(&b.path));

    let validated: Vec<_> = records
        .into_par_iter()
        .map(|record| {
            let result = match &record.fields {
                Ok(raw) => validate_post(raw).map_err(SchemaErrors::into_errors),
                Err(reason) => Err(vec![FieldError::new(RECORD, reason.clone())]),
            };
            (record, result)
        })
        .collect();

    let mut report = CollectionReport::new(validated.len());
    let mut ids = FxHashSet::default();
    let mut candidates = Vec::with_capacity(validated.len());

    for (record, result) in validated {
        if !ids.insert(record.id.clone()) {
            report.add(
                &record.path,
                FieldError::new(RECORD, format!("duplicate entry id \"{}\"", record.id)),
            );
            continue;
        }
        match result {
            Ok(post) => candidates.push(Entry {
                id: record.id,
                path: record.path,
                post,
            }),
            Err(errors) => report.extend(&record.path, errors),
        }
    }

    let entries = candidates
        .into_iter()
        .filter(|entry| {
            let unresolved = unresolved_references(&entry.post, &ids);
            let ok = unresolved.is_empty();
            report.extend(&entry.path, unresolved);
            ok
        })
        .collect();

    (Collection { entries }, report)
}

/// `relatedPosts` items with no matching id.
fn unresolved_references(post: &BlogPost, ids: &FxHashSet<String>) -> Vec<FieldError> {
    post.related_posts
        .iter()
        .enumerate()
        .filter(|(_, id)| !ids.contains(id.as_str()))
        .map(|(i, id)| {
            FieldError::new(
                format!("{}[{i}]", schema::field::RELATED_POSTS),
                format!("unknown entry \"{id}\""),
            )
        })
        .collect()
}

/// Entry id for a path relative to the collection directory.
///
/// Extension dropped, `/` separators, lowercase, whitespace runs as `-`.
pub fn entry_id(relative: &Path) -> String {
    let stem = relative.with_extension("");
    to_slash(&stem)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// All content files below `dir`, sorted.
pub fn collect_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| is_content_file(p))
        .collect();
    files.sort();
    files
}

pub fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}

fn read_record(dir: &Path, path: PathBuf) -> Result<SourceRecord, ContentError> {
    let source =
        std::fs::read_to_string(&path).map_err(|err| ContentError::Io(path.clone(), err))?;

    let relative = path.strip_prefix(dir).unwrap_or(&path);
    let fields = match frontmatter::extract(&source) {
        Ok(Some((raw, _body))) => Ok(raw),
        Ok(None) => Ok(RawRecord::new()),
        Err(err) => Err(err.to_string()),
    };

    Ok(SourceRecord {
        id: entry_id(relative),
        path,
        fields,
    })
}
