//! Active navigation link highlighting.
//!
//! Anchors whose `href` equals the current path exactly (no trailing slash,
//! query or case normalization) lose the inactive marker and gain the active
//! one. The document is reached only through [`NavDocument`], so the same
//! routine runs on rendered HTML ([`HtmlDocument`]) and on test doubles.

pub mod html;
mod route;

pub use html::{HtmlDocument, NavError};
pub use route::route_for_output;

use crate::log;

/// Default marker for links to other pages.
pub const DEFAULT_INACTIVE: &str = "text-zinc-500";
/// Default marker for links to the current page.
pub const DEFAULT_ACTIVE: &str = "text-zinc-200";

/// The two mutually exclusive style markers (class tokens).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavMarkers<'a> {
    pub inactive: &'a str,
    pub active: &'a str,
}

impl Default for NavMarkers<'static> {
    fn default() -> Self {
        Self {
            inactive: DEFAULT_INACTIVE,
            active: DEFAULT_ACTIVE,
        }
    }
}

/// What the highlighter needs from a document.
pub trait NavDocument {
    /// Handle to one anchor element, valid until the document changes shape.
    type Anchor;

    /// Every anchor whose `href` equals `href` exactly, in document order.
    fn anchors_with_href(&self, href: &str) -> Vec<Self::Anchor>;

    fn remove_marker(&mut self, anchor: &Self::Anchor, marker: &str);

    fn add_marker(&mut self, anchor: &Self::Anchor, marker: &str);
}

/// Outcome of one highlighting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Number of anchors switched to active.
    Active(usize),
    /// No anchor matched; the document is unchanged.
    NotFound,
}

impl Highlight {
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Active(_))
    }
}

/// Mark every anchor pointing at `current_path` as active.
///
/// With no match, logs one error line and leaves the document untouched.
/// A missing highlight is cosmetic, so this never fails.
pub fn highlight_active_links<D>(
    doc: &mut D,
    current_path: &str,
    markers: &NavMarkers<'_>,
) -> Highlight
where
    D: NavDocument + ?Sized,
{
    let anchors = doc.anchors_with_href(current_path);
    if anchors.is_empty() {
        log!("error"; "could not find active nav link element for `{}`", current_path);
        return Highlight::NotFound;
    }

    for anchor in &anchors {
        doc.remove_marker(anchor, markers.inactive);
        doc.add_marker(anchor, markers.active);
    }

    Highlight::Active(anchors.len())
}
