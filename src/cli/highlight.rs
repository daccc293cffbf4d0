//! `petrona highlight`: mark active nav links in rendered pages.
//!
//! Each HTML file is highlighted with its own route. Files are independent,
//! so a directory is processed in parallel.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use jwalk::WalkDir;
use rayon::prelude::*;

use super::HighlightArgs;
use crate::config::SiteConfig;
use crate::nav::{Highlight, HtmlDocument, NavError, NavMarkers, highlight_active_links, route_for_output};
use crate::utils::path::{normalize_path, resolve_path};
use crate::utils::{plural_count, plural_s};
use crate::{debug, log};

/// Result of highlighting one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOutcome {
    pub highlight: Highlight,
    /// The file was rewritten.
    pub written: bool,
}

pub fn run_highlight(args: &HighlightArgs, config: &SiteConfig) -> Result<()> {
    let output_dir = normalize_path(&config.output_dir());
    let target = match &args.target {
        Some(target) => resolve_path(target, config.get_root()),
        None => output_dir.clone(),
    };
    let target = normalize_path(&target);
    let markers = config.nav.markers();
    let trailing_slash = config.nav.trailing_slash;

    if target.is_file() {
        let route = match &args.path {
            Some(path) => path.clone(),
            None => route_for_output(&output_dir, &target, trailing_slash).ok_or_else(|| {
                anyhow!(
                    "cannot derive the page path of {} (outside {}), pass --path",
                    target.display(),
                    output_dir.display()
                )
            })?,
        };
        let outcome = highlight_file(&target, &route, &markers, args.dry)?;
        summarize(&[outcome], args.dry);
        return Ok(());
    }

    if !target.is_dir() {
        bail!("Path not found: {}", target.display());
    }
    if args.path.is_some() {
        bail!("--path only applies to a single file");
    }

    // Routes are relative to the output root even when a subdirectory is given
    let base = if target.starts_with(&output_dir) {
        output_dir.as_path()
    } else {
        target.as_path()
    };

    let files = collect_html_files(&target);
    if files.is_empty() {
        log!("nav"; "no html files in {}", target.display());
        return Ok(());
    }
    debug!("nav"; "highlighting {}", plural_count(files.len(), "file"));

    let results: Vec<_> = files
        .par_iter()
        .map(|file| {
            let route = route_for_output(base, file, trailing_slash)
                .ok_or_else(|| anyhow!("no route for {}", file.display()))?;
            highlight_file(file, &route, &markers, args.dry)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(results.len());
    let mut failed = 0;
    for result in results {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => {
                failed += 1;
                log!("error"; "{:#}", err);
            }
        }
    }

    summarize(&outcomes, args.dry);
    if failed > 0 {
        bail!("failed to process {}", plural_count(failed, "file"));
    }
    Ok(())
}

/// Highlight one file in place (or only report with `dry`).
pub fn highlight_file(
    path: &Path,
    route: &str,
    markers: &NavMarkers<'_>,
    dry: bool,
) -> Result<FileOutcome> {
    let source = fs::read_to_string(path).map_err(|err| NavError::Read(path.to_path_buf(), err))?;
    let mut doc = HtmlDocument::parse(&source)?;

    let highlight = highlight_active_links(&mut doc, route, markers);
    let written = highlight.is_found() && !dry;
    match highlight {
        Highlight::Active(count) => debug!("nav"; "{} → {} ({})", path.display(), route, plural_count(count, "link")),
        Highlight::NotFound => debug!("nav"; "{} → {} (no link)", path.display(), route),
    }

    if written {
        fs::write(path, doc.to_html()).map_err(|err| NavError::Write(path.to_path_buf(), err))?;
    }

    Ok(FileOutcome { highlight, written })
}

/// Every `.html` file below `dir`, sorted.
fn collect_html_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "html"))
        .collect();
    files.sort();
    files
}

fn summarize(outcomes: &[FileOutcome], dry: bool) {
    let links: usize = outcomes
        .iter()
        .map(|o| match o.highlight {
            Highlight::Active(count) => count,
            Highlight::NotFound => 0,
        })
        .sum();
    let missing = outcomes
        .iter()
        .filter(|o| !o.highlight.is_found())
        .count();

    let verb = if dry { "would highlight" } else { "highlighted" };
    log!(
        "nav";
        "{} {} in {}",
        verb,
        plural_count(links, "link"),
        plural_count(outcomes.len(), "page")
    );
    if missing > 0 {
        log!(
            "warning";
            "{} page{} without an active nav link",
            missing,
            plural_s(missing)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CommonArgs;
    use crate::logger::capture::capture;
    use crate::nav::{DEFAULT_ACTIVE, NavDocument};

    fn page(links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{href}" class="text-zinc-500">{href}</a>"#))
            .collect();
        format!("<!DOCTYPE html>\n<html><body><nav>{anchors}</nav></body></html>\n")
    }

    fn site() -> (tempfile::TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        let dist = dir.path().join("dist");
        fs::create_dir_all(dist.join("blog/my-post")).unwrap();
        let nav = ["/", "/blog", "/blog/my-post", "/about"];
        fs::write(dist.join("index.html"), page(&nav)).unwrap();
        fs::write(dist.join("about.html"), page(&nav)).unwrap();
        fs::write(dist.join("blog/my-post/index.html"), page(&nav)).unwrap();
        // No link to itself
        fs::write(dist.join("404.html"), page(&nav)).unwrap();
        fs::write(dist.join("style.css"), "body{}").unwrap();

        let config = SiteConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        (dir, config)
    }

    fn args(target: Option<PathBuf>, path: Option<&str>, dry: bool) -> HighlightArgs {
        HighlightArgs {
            target,
            path: path.map(str::to_string),
            dry,
            common: CommonArgs::default(),
        }
    }

    fn active_hrefs(html: &str) -> Vec<String> {
        let doc = HtmlDocument::parse(html).unwrap();
        ["/", "/blog", "/blog/my-post", "/about"]
            .into_iter()
            .filter(|href| {
                doc.anchors_with_href(href)
                    .iter()
                    .any(|a| doc.classes(a).iter().any(|c| c == DEFAULT_ACTIVE))
            })
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_highlight_output_dir() {
        let (dir, config) = site();
        let dist = dir.path().join("dist");

        let (result, logs) = capture(|| run_highlight(&args(None, None, false), &config));
        assert!(result.is_ok());

        let read = |p: &str| fs::read_to_string(dist.join(p)).unwrap();
        assert_eq!(active_hrefs(&read("index.html")), vec!["/"]);
        assert_eq!(active_hrefs(&read("about.html")), vec!["/about"]);
        assert_eq!(active_hrefs(&read("blog/my-post/index.html")), vec!["/blog/my-post"]);
        assert!(active_hrefs(&read("404.html")).is_empty());

        // Per-page errors are logged from rayon workers; the summary is not
        assert!(
            logs.iter()
                .any(|(module, msg)| module == "warning" && msg.starts_with("1 page without"))
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (dir, config) = site();
        let index = dir.path().join("dist/index.html");
        let before = fs::read_to_string(&index).unwrap();

        let (result, _) = capture(|| run_highlight(&args(None, None, true), &config));

        assert!(result.is_ok());
        assert_eq!(fs::read_to_string(&index).unwrap(), before);
    }

    #[test]
    fn test_single_file_with_explicit_path() {
        let (dir, config) = site();
        let loose = dir.path().join("preview.html");
        fs::write(&loose, page(&["/", "/about"])).unwrap();

        let (missing_route, _) = capture(|| run_highlight(&args(Some(loose.clone()), None, false), &config));
        assert!(missing_route.is_err());

        let (result, _) =
            capture(|| run_highlight(&args(Some(loose.clone()), Some("/about"), false), &config));
        assert!(result.is_ok());
        assert_eq!(active_hrefs(&fs::read_to_string(&loose).unwrap()), vec!["/about"]);
    }

    #[test]
    fn test_subdirectory_keeps_output_routes() {
        let (dir, config) = site();
        let blog = dir.path().join("dist/blog");

        let (result, _) = capture(|| run_highlight(&args(Some(blog.clone()), None, false), &config));
        assert!(result.is_ok());

        let html = fs::read_to_string(blog.join("my-post/index.html")).unwrap();
        assert_eq!(active_hrefs(&html), vec!["/blog/my-post"]);
    }

    #[test]
    fn test_rewrite_keeps_other_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("about.html");
        let source = "<!DOCTYPE html>\n<html><head>\n<style>nav>a{color:red}</style>\n<script type=\"module\">if (a<b) { go('<a href=\"/about\">'); }</script>\n</head><body><nav>\n\t<a href='/about'   class=\"text-zinc-500\">About</a><br/>\n</nav></body></html>\n";
        fs::write(&file, source).unwrap();

        let outcome = highlight_file(&file, "/about", &NavMarkers::default(), false).unwrap();

        assert_eq!(outcome.highlight, Highlight::Active(1));
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            source.replace("class=\"text-zinc-500\"", "class=\"text-zinc-200\"")
        );
    }

    #[test]
    fn test_file_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.html");
        fs::write(&file, page(&["/a", "/a", "/b"])).unwrap();

        let outcome = highlight_file(&file, "/a", &NavMarkers::default(), false).unwrap();
        assert_eq!(outcome.highlight, Highlight::Active(2));
        assert!(outcome.written);

        let (outcome, _) = capture(|| highlight_file(&file, "/c", &NavMarkers::default(), false));
        let outcome = outcome.unwrap();
        assert_eq!(outcome.highlight, Highlight::NotFound);
        assert!(!outcome.written);
    }
}
