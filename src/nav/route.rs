//! Output file to page route.

use std::path::Path;

use crate::utils::path::to_slash;

/// The URL path a built HTML file is served at.
///
/// | file (relative to output)   | route               |
/// |-----------------------------|---------------------|
/// | `index.html`                | `/`                 |
/// | `blog/my-post/index.html`   | `/blog/my-post`     |
/// | `about.html`                | `/about`            |
///
/// With `trailing_slash`, directory routes end in `/` (`/blog/my-post/`).
/// Returns `None` for files outside `output_dir` or not ending in `.html`.
pub fn route_for_output(output_dir: &Path, file: &Path, trailing_slash: bool) -> Option<String> {
    let relative = to_slash(file.strip_prefix(output_dir).ok()?);

    if relative == "index.html" {
        return Some("/".to_string());
    }
    if let Some(dir) = relative.strip_suffix("/index.html") {
        let slash = if trailing_slash { "/" } else { "" };
        return Some(format!("/{dir}{slash}"));
    }
    relative
        .strip_suffix(".html")
        .filter(|stem| !stem.is_empty())
        .map(|stem| format!("/{stem}"))
}
