//! Raw record extraction from YAML (`---`) or TOML (`+++`) frontmatter.
//!
//! The output is an untyped [`RawRecord`]; typing and coercion happen in
//! [`super::schema::validate_post`]. The Markdown body is never interpreted.
//!
//! Both forms are parsed in full (`serde_yaml`, `toml`); a block that does
//! not parse is an error, never a partially read record. YAML keeps
//! unquoted dates such as `2024-01-01` as strings.

use serde_json::Value as JsonValue;

use super::error::FrontmatterError;
use super::schema::RawRecord;

/// Extract frontmatter and return `(record, body)`.
///
/// `Ok(None)` when the content has no frontmatter block.
pub fn extract(content: &str) -> Result<Option<(RawRecord, &str)>, FrontmatterError> {
    match detect(content) {
        Some((fm, body, true)) => Ok(Some((parse_toml(fm)?, body))),
        Some((fm, body, false)) => Ok(Some((parse_yaml(fm)?, body))),
        None => Ok(None),
    }
}

/// Detect and split frontmatter.
/// Returns `(frontmatter, body, is_toml)` if found.
fn detect(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if trimmed.starts_with(fence)
            && let Some(end) = trimmed[3..].find(&format!("\n{fence}"))
        {
            // Skip the rest of the opening fence line
            let fm = trimmed[3..3 + end]
                .split_once('\n')
                .map_or("", |(_, fm)| fm)
                .trim_end();
            let rest = &trimmed[3 + end + 4..];
            // Drop the remainder of the closing fence line
            let body = rest.split_once('\n').map_or("", |(_, body)| body);
            return Some((fm, body.trim_start_matches('\n'), is_toml));
        }
    }

    None
}

// ============================================================================
// TOML
// ============================================================================

fn parse_toml(content: &str) -> Result<RawRecord, FrontmatterError> {
    let table: toml::Table = toml::from_str(content)?;
    match toml_to_json(toml::Value::Table(table)) {
        JsonValue::Object(map) => Ok(map),
        _ => Err(FrontmatterError::NotATable),
    }
}

/// Convert TOML to JSON. Datetimes become their RFC 3339 text so they
/// go through the same date coercion as YAML strings.
fn toml_to_json(value: toml::Value) -> JsonValue {
    match value {
        toml::Value::String(s) => JsonValue::String(s),
        toml::Value::Integer(i) => JsonValue::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map_or(JsonValue::Null, JsonValue::Number),
        toml::Value::Boolean(b) => JsonValue::Bool(b),
        toml::Value::Datetime(dt) => JsonValue::String(dt.to_string()),
        toml::Value::Array(items) => JsonValue::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => JsonValue::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

// ============================================================================
// YAML
// ============================================================================

fn parse_yaml(content: &str) -> Result<RawRecord, FrontmatterError> {
    if content.trim().is_empty() {
        return Ok(RawRecord::new());
    }
    match serde_yaml::from_str::<JsonValue>(content)? {
        JsonValue::Object(map) => Ok(map),
        // Only comments
        JsonValue::Null => Ok(RawRecord::new()),
        _ => Err(FrontmatterError::NotATable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\npubDate: 2024-01-01\n---\n\n# Body";
        let (record, body) = extract(content).unwrap().unwrap();

        assert_eq!(record.get("title"), Some(&json!("Hello")));
        assert_eq!(record.get("pubDate"), Some(&json!("2024-01-01")));
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_yaml_quoted_and_commas() {
        let content = "---\ntitle: \"Hello, world\"\ndescription: 'It''s here'\n---\n";
        let (record, _) = extract(content).unwrap().unwrap();

        assert_eq!(record.get("title"), Some(&json!("Hello, world")));
        assert_eq!(record.get("description"), Some(&json!("It's here")));
    }

    #[test]
    fn test_yaml_lists() {
        let content = "---\ntags: [\"rust\", web, 'a, b']\nrelatedPosts:\n  - first-post\n  - second-post\nheroImage: /hero.jpg\n---\n";
        let (record, _) = extract(content).unwrap().unwrap();

        assert_eq!(record.get("tags"), Some(&json!(["rust", "web", "a, b"])));
        assert_eq!(
            record.get("relatedPosts"),
            Some(&json!(["first-post", "second-post"]))
        );
        assert_eq!(record.get("heroImage"), Some(&json!("/hero.jpg")));
    }

    #[test]
    fn test_yaml_scalars_and_comments() {
        let content = "---\n# leading comment\nisDraft: true # not yet\ncount: 42\nratio: 0.5\nempty:\nnothing: ~\n---\n";
        let (record, _) = extract(content).unwrap().unwrap();

        assert_eq!(record.get("isDraft"), Some(&json!(true)));
        assert_eq!(record.get("count"), Some(&json!(42)));
        assert_eq!(record.get("ratio"), Some(&json!(0.5)));
        assert_eq!(record.get("empty"), Some(&json!(null)));
        assert_eq!(record.get("nothing"), Some(&json!(null)));
    }

    #[test]
    fn test_yaml_value_with_colon() {
        let content = "---\npubDate: 2024-06-15T14:30:00Z\n---\n";
        let (record, _) = extract(content).unwrap().unwrap();
        assert_eq!(record.get("pubDate"), Some(&json!("2024-06-15T14:30:00Z")));
    }

    #[test]
    fn test_yaml_block_scalars() {
        let content = "---\ntitle: Post\nnotes: |\n  line one\n  line two\ndescription: >-\n  A long description\n  on two lines\n---\n";
        let (record, _) = extract(content).unwrap().unwrap();

        assert_eq!(
            record.get("description"),
            Some(&json!("A long description on two lines"))
        );
        assert_eq!(record.get("notes"), Some(&json!("line one\nline two\n")));
    }

    #[test]
    fn test_yaml_multiline_quoted() {
        let content = "---\ntitle: \"Hello\n  world\"\n---\n";
        let (record, _) = extract(content).unwrap().unwrap();
        assert_eq!(record.get("title"), Some(&json!("Hello world")));
    }

    #[test]
    fn test_yaml_unterminated_quote() {
        let content = "---\ntitle: \"Hello\ndescription: One\n---\n";
        assert!(matches!(extract(content), Err(FrontmatterError::Yaml(_))));
    }

    #[test]
    fn test_yaml_nested_values_kept() {
        let content = "---\ntags: [[rust, web]]\nhero:\n  src: /a.png\n---\n";
        let (record, _) = extract(content).unwrap().unwrap();

        assert_eq!(record.get("tags"), Some(&json!([["rust", "web"]])));
        assert_eq!(record.get("hero"), Some(&json!({ "src": "/a.png" })));
    }

    #[test]
    fn test_yaml_not_a_mapping() {
        assert!(matches!(
            extract("---\n- a\n- b\n---\n"),
            Err(FrontmatterError::NotATable)
        ));
        let (record, _) = extract("---\n---\nbody").unwrap().unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ntags = [\"a\", \"b\"]\npubDate = 2024-06-15\n+++\n\n# Body";
        let (record, body) = extract(content).unwrap().unwrap();

        assert_eq!(record.get("title"), Some(&json!("Hello")));
        assert_eq!(record.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(record.get("pubDate"), Some(&json!("2024-06-15")));
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_invalid_toml_frontmatter() {
        let content = "+++\ntitle = \n+++\n";
        assert!(matches!(extract(content), Err(FrontmatterError::Toml(_))));
    }

    #[test]
    fn test_no_frontmatter() {
        assert!(extract("# Just content").unwrap().is_none());
        assert!(extract("---\nnever closed").unwrap().is_none());
    }
}
