//! Tailwind config generation from `[theme]`.
//!
//! ```js
//! /** @type {import('tailwindcss').Config} */
//! export default {
//!     content: ["./src/**/*.{astro,html,js,jsx,md,mdx,svelte,ts,tsx,vue}"],
//!     theme: {
//!         extend: {},
//!         fontFamily: {
//!             petrona: ["Petrona", "serif"],
//!         },
//!     },
//!     plugins: [],
//! };
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ThemeSectionConfig;

/// File name Tailwind picks up from the project root.
pub const TAILWIND_CONFIG: &str = "tailwind.config.mjs";

const INDENT: &str = "    ";

/// Render `[theme]` as a `tailwind.config.mjs` ES module.
pub fn render_tailwind_config(theme: &ThemeSectionConfig) -> String {
    let mut out = String::new();
    out.push_str("/** @type {import('tailwindcss').Config} */\n");
    out.push_str("export default {\n");
    out.push_str(&format!("{INDENT}content: {},\n", js_array(&theme.content)));

    out.push_str(&format!("{INDENT}theme: {{\n"));
    out.push_str(&format!("{INDENT}{INDENT}extend: {{}},\n"));
    out.push_str(&format!("{INDENT}{INDENT}fontFamily: {{\n"));
    for (family, stack) in &theme.font_family {
        out.push_str(&format!(
            "{INDENT}{INDENT}{INDENT}{}: {},\n",
            js_key(family),
            js_array(stack)
        ));
    }
    out.push_str(&format!("{INDENT}{INDENT}}},\n"));
    out.push_str(&format!("{INDENT}}},\n"));

    out.push_str(&format!("{INDENT}plugins: [],\n"));
    out.push_str("};\n");
    out
}

/// Render and write to `path`, replacing any existing file.
pub fn write_tailwind_config(theme: &ThemeSectionConfig, path: &Path) -> Result<()> {
    fs::write(path, render_tailwind_config(theme))
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Inline array of string literals: `["a", "b"]`.
fn js_array(items: &[String]) -> String {
    let items: Vec<_> = items.iter().map(|s| js_string(s)).collect();
    format!("[{}]", items.join(", "))
}

/// JSON string literals are valid JavaScript string literals.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

/// Object key, bare when it is a plain identifier.
fn js_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_ident = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if is_ident { key.to_string() } else { js_string(key) }
}
