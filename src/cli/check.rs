//! `petrona check`: validate the blog collection.
//!
//! The whole collection is always loaded so `relatedPosts` resolve against
//! every id; `PATH` arguments only narrow what gets reported.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;
use serde::Serialize;

use super::CheckArgs;
use super::common::collect_files;
use crate::config::SiteConfig;
use crate::content::{self, BlogPost, Collection, Entry};
use crate::log;
use crate::utils::path::{normalize_path, to_slash};
use crate::utils::plural_count;

/// One entry in `--json` output.
#[derive(Debug, Serialize)]
struct EntryJson<'a> {
    id: &'a str,
    path: String,
    #[serde(flatten)]
    post: &'a BlogPost,
}

pub fn run_check(args: &CheckArgs, config: &SiteConfig) -> Result<()> {
    let dir = config.collection_dir();
    let (collection, mut report) = Collection::load(&dir)
        .with_context(|| format!("failed to load collection `{}`", config.content.collection))?;

    let selected = select(&args.paths, &dir)?;
    if let Some(selected) = &selected {
        report.retain(|path| selected.contains(&normalize_path(path)));
    }
    let is_selected =
        |entry: &Entry| selected.as_ref().is_none_or(|s| s.contains(&normalize_path(&entry.path)));

    if !args.json {
        log!(
            "check";
            "validated {} in {}",
            plural_count(report.checked(), "record"),
            config.root_relative(&dir).display()
        );
    }

    report.print(config.get_root());

    if args.drafts {
        for entry in collection.drafts().filter(|e| is_selected(*e)) {
            log!(
                "check";
                "draft: {} ({})",
                entry.id,
                config.root_relative(&entry.path).display()
            );
        }
    }

    if args.json {
        let entries: Vec<_> = listed(&collection, args.drafts)
            .into_iter()
            .filter(|e| is_selected(*e))
            .map(|entry| EntryJson {
                id: &entry.id,
                path: to_slash(&config.root_relative(&entry.path)),
                post: &entry.post,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }

    if !report.is_ok() {
        bail!("{report}");
    }
    if !args.json {
        log!("check"; "{}", report);
    }
    Ok(())
}

/// Published entries, plus drafts when asked, in path order.
fn listed(collection: &Collection, drafts: bool) -> Vec<&Entry> {
    let mut entries: Vec<_> = collection.published().collect();
    if drafts {
        entries.extend(collection.drafts());
        entries.sort_by(|a, b| a.path.cmp(&b.path));
    }
    entries
}

/// Normalized set of files named on the command line, `None` for all.
fn select(paths: &[PathBuf], dir: &Path) -> Result<Option<FxHashSet<PathBuf>>> {
    if paths.is_empty() {
        return Ok(None);
    }
    let files = collect_files(paths, dir, content::is_content_file, content::collect_files)?;
    Ok(Some(files.iter().map(|f| normalize_path(f)).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CommonArgs;
    use crate::logger::capture::capture;
    use std::fs;

    const VALID: &str = "---\ntitle: First\ndescription: One\npubDate: 2024-01-01\n---\n";
    const DRAFT: &str = "---\ntitle: Draft\ndescription: Two\npubDate: 2024-02-01\nisDraft: true\n---\n";
    const BROKEN: &str = "---\ntitle: Broken\nrelatedPosts: [missing]\n---\n";

    fn site(files: &[(&str, &str)]) -> (tempfile::TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        let blog = dir.path().join("src/content/blog");
        fs::create_dir_all(&blog).unwrap();
        for (name, content) in files {
            fs::write(blog.join(name), content).unwrap();
        }
        let config = SiteConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        (dir, config)
    }

    fn args(paths: &[PathBuf]) -> CheckArgs {
        CheckArgs {
            paths: paths.to_vec(),
            drafts: false,
            json: false,
            common: CommonArgs::default(),
        }
    }

    #[test]
    fn test_valid_collection_passes() {
        let (_dir, config) = site(&[("first.md", VALID), ("draft.md", DRAFT)]);
        let (result, _) = capture(|| run_check(&args(&[]), &config));
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_entry_fails() {
        let (_dir, config) = site(&[("first.md", VALID), ("broken.md", BROKEN)]);
        let (result, _) = capture(|| run_check(&args(&[]), &config));

        let err = result.unwrap_err().to_string();
        assert!(err.contains("in 1 file"), "{err}");
    }

    #[test]
    fn test_paths_narrow_the_report() {
        let (dir, config) = site(&[("first.md", VALID), ("broken.md", BROKEN)]);
        let blog = dir.path().join("src/content/blog");

        let (only_valid, _) = capture(|| run_check(&args(&[blog.join("first.md")]), &config));
        assert!(only_valid.is_ok());

        let (only_broken, _) = capture(|| run_check(&args(&[blog.join("broken.md")]), &config));
        assert!(only_broken.is_err());
    }

    #[test]
    fn test_drafts_listed() {
        let (_dir, config) = site(&[("first.md", VALID), ("draft.md", DRAFT)]);
        let mut check = args(&[]);
        check.drafts = true;

        let (result, logs) = capture(|| run_check(&check, &config));

        assert!(result.is_ok());
        assert!(logs.iter().any(|(_, msg)| msg.starts_with("draft: draft")));
        assert!(!logs.iter().any(|(_, msg)| msg.starts_with("draft: first")));
    }

    #[test]
    fn test_json_skips_drafts_unless_asked() {
        let (_dir, config) = site(&[("first.md", VALID), ("draft.md", DRAFT)]);
        let (collection, _) = Collection::load(&config.collection_dir()).unwrap();
        let ids = |drafts| {
            listed(&collection, drafts)
                .iter()
                .map(|e| e.id.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids(false), vec!["first"]);
        assert_eq!(ids(true), vec!["draft", "first"]);

        let mut check = args(&[]);
        check.json = true;
        let (result, logs) = capture(|| run_check(&check, &config));
        assert!(result.is_ok());
        assert!(logs.is_empty());
    }

    #[test]
    fn test_missing_collection_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let err = run_check(&args(&[]), &config).unwrap_err();
        assert!(format!("{err:#}").contains("blog"));
    }
}
