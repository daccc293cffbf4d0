//! The `blog` collection schema.
//!
//! # Fields
//!
//! | Key            | Type          | Required | Notes                              |
//! |----------------|---------------|----------|------------------------------------|
//! | `title`        | string        | yes      | must not be blank                  |
//! | `description`  | string        | yes      |                                    |
//! | `isDraft`      | boolean       | no       | absent means `false`               |
//! | `tags`         | string list   | no       | order kept                         |
//! | `pubDate`      | date          | yes      | coerced, see [`crate::utils::date`] |
//! | `relatedPosts` | string list   | no       | ids in the same collection         |
//! | `updatedDate`  | date          | no       | coerced                            |
//! | `heroImage`    | string        | no       | path or URL                        |
//!
//! `null` on an optional key counts as absent. Unknown keys are ignored.
//! Whether `relatedPosts` ids resolve is a collection-level check, see
//! [`super::validate_records`].

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::error::SchemaErrors;
use crate::utils::date::{self, DateTimeUtc};

/// Untyped frontmatter fields, in source order.
pub type RawRecord = serde_json::Map<String, JsonValue>;

/// Frontmatter keys of the `blog` collection.
pub mod field {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const IS_DRAFT: &str = "isDraft";
    pub const TAGS: &str = "tags";
    pub const PUB_DATE: &str = "pubDate";
    pub const RELATED_POSTS: &str = "relatedPosts";
    pub const UPDATED_DATE: &str = "updatedDate";
    pub const HERO_IMAGE: &str = "heroImage";
}

/// A validated `blog` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub description: String,
    pub is_draft: bool,
    pub tags: Vec<String>,
    pub pub_date: DateTimeUtc,
    pub related_posts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTimeUtc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
}

/// Validate and coerce one raw record.
///
/// Every field is checked, so the error list is complete for the record.
pub fn validate_post(raw: &RawRecord) -> Result<BlogPost, SchemaErrors> {
    let mut reader = FieldReader::new(raw);

    let title = reader.required_string(field::TITLE);
    if let Some(title) = &title
        && title.trim().is_empty()
    {
        reader.errors.push(field::TITLE, "must not be empty");
    }
    let description = reader.required_string(field::DESCRIPTION);
    let is_draft = reader.optional_bool(field::IS_DRAFT).unwrap_or(false);
    let tags = reader.string_list(field::TAGS);
    let pub_date = reader.required_date(field::PUB_DATE);
    let related_posts = reader.string_list(field::RELATED_POSTS);
    let updated_date = reader.optional_date(field::UPDATED_DATE);
    let hero_image = reader.optional_string(field::HERO_IMAGE);

    match (title, description, pub_date) {
        (Some(title), Some(description), Some(pub_date)) if reader.errors.is_empty() => {
            Ok(BlogPost {
                title,
                description,
                is_draft,
                tags,
                pub_date,
                related_posts,
                updated_date,
                hero_image,
            })
        }
        _ => Err(reader.errors),
    }
}

// ============================================================================
// FieldReader
// ============================================================================

/// Typed accessors over a raw record that log problems instead of failing.
struct FieldReader<'a> {
    raw: &'a RawRecord,
    errors: SchemaErrors,
}

impl<'a> FieldReader<'a> {
    fn new(raw: &'a RawRecord) -> Self {
        Self {
            raw,
            errors: SchemaErrors::new(),
        }
    }

    /// Present and non-null value.
    fn get(&self, key: &str) -> Option<&'a JsonValue> {
        self.raw.get(key).filter(|v| !v.is_null())
    }

    fn required(&mut self, key: &str) -> Option<&'a JsonValue> {
        let value = self.get(key);
        if value.is_none() {
            self.errors.push(key, "missing required field");
        }
        value
    }

    fn required_string(&mut self, key: &str) -> Option<String> {
        let value = self.required(key)?;
        self.expect_string(key, value)
    }

    fn optional_string(&mut self, key: &str) -> Option<String> {
        let value = self.get(key)?;
        self.expect_string(key, value)
    }

    fn optional_bool(&mut self, key: &str) -> Option<bool> {
        match self.get(key)? {
            JsonValue::Bool(b) => Some(*b),
            other => {
                self.type_error(key, "boolean", other);
                None
            }
        }
    }

    /// Optional list of strings; absent gives an empty list.
    fn string_list(&mut self, key: &str) -> Vec<String> {
        let Some(value) = self.get(key) else {
            return Vec::new();
        };
        let JsonValue::Array(items) = value else {
            self.type_error(key, "array", value);
            return Vec::new();
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.expect_string(&format!("{key}[{i}]"), item))
            .collect()
    }

    fn required_date(&mut self, key: &str) -> Option<DateTimeUtc> {
        let value = self.required(key)?;
        self.expect_date(key, value)
    }

    fn optional_date(&mut self, key: &str) -> Option<DateTimeUtc> {
        let value = self.get(key)?;
        self.expect_date(key, value)
    }

    fn expect_string(&mut self, key: &str, value: &JsonValue) -> Option<String> {
        match value {
            JsonValue::String(s) => Some(s.clone()),
            other => {
                self.type_error(key, "string", other);
                None
            }
        }
    }

    fn expect_date(&mut self, key: &str, value: &JsonValue) -> Option<DateTimeUtc> {
        let coerced = date::coerce(value);
        if coerced.is_none() {
            self.errors
                .push(key, format!("invalid date: {}", compact(value)));
        }
        coerced
    }

    fn type_error(&mut self, key: &str, expected: &str, found: &JsonValue) {
        self.errors.push(
            key,
            format!("expected {expected}, found {}", type_name(found)),
        );
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Short single-line rendering of a value for error messages.
fn compact(value: &JsonValue) -> String {
    let text = value.to_string();
    if text.chars().count() > 40 {
        let head: String = text.chars().take(37).collect();
        format!("{head}...")
    } else {
        text
    }
}
