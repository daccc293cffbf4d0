//! Rendered HTML as a [`NavDocument`].
//!
//! The page is never rebuilt. `tl` locates the anchors, each anchor start tag
//! is lexed from the source to find its `href` and `class` attributes, and
//! [`HtmlDocument::to_html`] splices edited class values back into the
//! original text. Every other byte is emitted as it was read.
//!
//! `tl` has no raw-text states, so comments and the bodies of `script`,
//! `style`, `template` and `textarea` are blanked out before it sees the page.
//! Offsets stay the same, and markup-like text in those regions never turns
//! into anchors.

use std::io;
use std::ops::Range;
use std::path::PathBuf;

use thiserror::Error;

use super::NavDocument;
use crate::utils::html::{quote_attr, unescape};

/// Elements whose content is not markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "template", "textarea"];

#[derive(Debug, Error)]
pub enum NavError {
    #[error("failed to parse HTML: {0}")]
    Parse(String),

    #[error("failed to read {}", .0.display())]
    Read(PathBuf, #[source] io::Error),

    #[error("failed to write {}", .0.display())]
    Write(PathBuf, #[source] io::Error),
}

/// Where an anchor's class value lives in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassSlot {
    /// `class="…"`, `class='…'` or `class=…`; the range excludes quotes.
    Value { range: Range<usize>, quote: Option<u8> },
    /// `class` without a value.
    Bare { name_end: usize },
    /// No class attribute; a new one goes after the last attribute.
    Missing { insert_at: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Anchor {
    /// Entity-decoded `href`, if present.
    href: Option<String>,
    slot: ClassSlot,
    /// Current class value, as written in the source.
    class: String,
    edited: bool,
}

impl Anchor {
    fn tokens(&self) -> Vec<&str> {
        self.class.split_ascii_whitespace().collect()
    }

    fn remove_class(&mut self, token: &str) {
        let tokens = self.tokens();
        if !tokens.contains(&token) {
            return;
        }
        let kept = tokens
            .into_iter()
            .filter(|t| *t != token)
            .collect::<Vec<_>>()
            .join(" ");
        self.class = kept;
        self.edited = true;
    }

    fn add_class(&mut self, token: &str) {
        if self.tokens().contains(&token) {
            return;
        }
        if self.class.trim().is_empty() {
            self.class = token.to_string();
        } else {
            if !self.class.ends_with(|c: char| c.is_ascii_whitespace()) {
                self.class.push(' ');
            }
            self.class.push_str(token);
        }
        self.edited = true;
    }

    /// Source range to replace and the text that replaces it.
    fn splice(&self) -> (Range<usize>, String) {
        let quoted = format!("\"{}\"", quote_attr(&self.class));
        match &self.slot {
            ClassSlot::Value { range, quote: Some(quote) } if !self.class.contains(char::from(*quote)) => {
                (range.clone(), self.class.clone())
            }
            ClassSlot::Value { range, quote: None } if is_unquoted_safe(&self.class) => {
                (range.clone(), self.class.clone())
            }
            ClassSlot::Value { range, quote } => {
                let width = usize::from(quote.is_some());
                (range.start - width..range.end + width, quoted)
            }
            ClassSlot::Bare { name_end } => (*name_end..*name_end, format!("={quoted}")),
            ClassSlot::Missing { insert_at } => (*insert_at..*insert_at, format!(" class={quoted}")),
        }
    }
}

/// Index of an anchor in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorRef(usize);

/// An HTML page whose anchor classes can be edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    source: String,
    anchors: Vec<Anchor>,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Result<Self, NavError> {
        let masked = mask_raw_text(html)?;
        let dom = tl::parse(&masked, tl::ParserOptions::default())
            .map_err(|err| NavError::Parse(format!("{err:?}")))?;
        let parser = dom.parser();

        let mut starts: Vec<usize> = dom
            .nodes()
            .iter()
            .filter_map(|node| node.as_tag())
            .filter(|tag| tag.name().as_bytes().eq_ignore_ascii_case(b"a"))
            .map(|tag| tag.boundaries(parser).0)
            .collect();
        starts.sort_unstable();
        starts.dedup();

        let anchors = starts
            .into_iter()
            .filter_map(|start| lex_anchor(html, start))
            .collect();

        Ok(Self {
            source: html.to_string(),
            anchors,
        })
    }

    /// The source with every edited class attribute spliced in.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.source.len() + 64);
        let mut cursor = 0;
        for (range, text) in self.anchors.iter().filter(|a| a.edited).map(Anchor::splice) {
            out.push_str(&self.source[cursor..range.start]);
            out.push_str(&text);
            cursor = range.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }

    /// Class tokens of an anchor, in attribute order.
    pub fn classes(&self, anchor: &AnchorRef) -> Vec<String> {
        self.anchors
            .get(anchor.0)
            .map(|a| a.tokens().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

impl NavDocument for HtmlDocument {
    type Anchor = AnchorRef;

    fn anchors_with_href(&self, href: &str) -> Vec<AnchorRef> {
        self.anchors
            .iter()
            .enumerate()
            .filter(|(_, anchor)| anchor.href.as_deref() == Some(href))
            .map(|(index, _)| AnchorRef(index))
            .collect()
    }

    fn remove_marker(&mut self, anchor: &AnchorRef, marker: &str) {
        if let Some(a) = self.anchors.get_mut(anchor.0) {
            a.remove_class(marker);
        }
    }

    fn add_marker(&mut self, anchor: &AnchorRef, marker: &str) {
        if let Some(a) = self.anchors.get_mut(anchor.0) {
            a.add_class(marker);
        }
    }
}

// ============================================================================
// Source lexing
// ============================================================================

struct Attr {
    name: Range<usize>,
    /// Value range without quotes, and the quote byte.
    value: Option<(Range<usize>, Option<u8>)>,
}

struct StartTag {
    name: Range<usize>,
    attrs: Vec<Attr>,
    /// End of the last attribute (or of the name).
    attrs_end: usize,
    /// Offset just past `>`.
    end: usize,
}

const fn is_tag_delim(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'/' || b == b'>'
}

/// Lex the start tag whose `<` is at `start`. `None` when it is not a start
/// tag or never closes.
fn lex_start_tag(src: &[u8], start: usize) -> Option<StartTag> {
    if !src.get(start + 1).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }

    let mut i = start + 1;
    while i < src.len() && !is_tag_delim(src[i]) {
        i += 1;
    }
    let name = start + 1..i;
    let mut attrs = Vec::new();
    let mut attrs_end = i;

    loop {
        while i < src.len() && (src[i].is_ascii_whitespace() || src[i] == b'/') {
            i += 1;
        }
        if *src.get(i)? == b'>' {
            return Some(StartTag {
                name,
                attrs,
                attrs_end,
                end: i + 1,
            });
        }

        let name_start = i;
        i += 1;
        while i < src.len() && !is_tag_delim(src[i]) && src[i] != b'=' {
            i += 1;
        }
        let attr_name = name_start..i;

        let mut j = i;
        while j < src.len() && src[j].is_ascii_whitespace() {
            j += 1;
        }
        let mut value = None;
        if src.get(j) == Some(&b'=') {
            j += 1;
            while j < src.len() && src[j].is_ascii_whitespace() {
                j += 1;
            }
            match *src.get(j)? {
                quote @ (b'"' | b'\'') => {
                    let open = j + 1;
                    let close = open + src[open..].iter().position(|&b| b == quote)?;
                    value = Some((open..close, Some(quote)));
                    i = close + 1;
                }
                _ => {
                    let open = j;
                    while j < src.len() && !src[j].is_ascii_whitespace() && src[j] != b'>' {
                        j += 1;
                    }
                    value = Some((open..j, None));
                    i = j;
                }
            }
        }

        attrs_end = i;
        attrs.push(Attr {
            name: attr_name,
            value,
        });
    }
}

/// Anchor attributes of the `<a …>` tag at `start`. The first occurrence of
/// a repeated attribute wins.
fn lex_anchor(src: &str, start: usize) -> Option<Anchor> {
    let bytes = src.as_bytes();
    let tag = lex_start_tag(bytes, start)?;
    if !bytes[tag.name.clone()].eq_ignore_ascii_case(b"a") {
        return None;
    }

    let find = |name: &str| {
        tag.attrs
            .iter()
            .find(|attr| bytes[attr.name.clone()].eq_ignore_ascii_case(name.as_bytes()))
    };

    let href = find("href").map(|attr| match &attr.value {
        Some((range, _)) => unescape(&src[range.clone()]).into_owned(),
        None => String::new(),
    });

    let (slot, class) = match find("class") {
        Some(Attr {
            value: Some((range, quote)),
            ..
        }) => (
            ClassSlot::Value {
                range: range.clone(),
                quote: *quote,
            },
            src[range.clone()].to_string(),
        ),
        Some(Attr { name, value: None }) => (ClassSlot::Bare { name_end: name.end }, String::new()),
        None => (
            ClassSlot::Missing {
                insert_at: tag.attrs_end,
            },
            String::new(),
        ),
    };

    Some(Anchor {
        href,
        slot,
        class,
        edited: false,
    })
}

/// Comments and raw-text element bodies.
fn raw_text_ranges(html: &str) -> Vec<Range<usize>> {
    let src = html.as_bytes();
    let mut ranges = Vec::new();
    let mut i = 0;

    while let Some(found) = src[i..].iter().position(|&b| b == b'<') {
        let lt = i + found;
        let rest = &src[lt..];

        if rest.starts_with(b"<!--") {
            let end = find_ignore_case(src, lt + 4, b"-->").map_or(src.len(), |at| at + 3);
            ranges.push(lt..end);
            i = end;
            continue;
        }

        let raw = RAW_TEXT_ELEMENTS.iter().find(|name| {
            let name = name.as_bytes();
            rest.get(1..=name.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(name))
                && rest.get(name.len() + 1).is_none_or(|&b| is_tag_delim(b))
        });
        let Some(name) = raw else {
            i = lt + 1;
            continue;
        };

        let Some(tag) = lex_start_tag(src, lt) else {
            break;
        };
        let closing = format!("</{name}");
        let close = find_ignore_case(src, tag.end, closing.as_bytes()).unwrap_or(src.len());
        ranges.push(tag.end..close);
        i = close;
    }

    ranges
}

fn find_ignore_case(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|at| from + at)
}

/// Same length as `html`, with raw-text ranges blanked and every ASCII
/// whitespace byte turned into a space (`tl` only skips ` ` and `\n`).
fn mask_raw_text(html: &str) -> Result<String, NavError> {
    let mut bytes = html.as_bytes().to_vec();
    for range in raw_text_ranges(html) {
        bytes[range].fill(b' ');
    }
    for b in &mut bytes {
        if matches!(*b, b'\t' | b'\r' | b'\x0c') {
            *b = b' ';
        }
    }
    String::from_utf8(bytes).map_err(|err| NavError::Parse(err.to_string()))
}

/// An unquoted attribute value may not be empty or contain these.
fn is_unquoted_safe(value: &str) -> bool {
    !value.is_empty()
        && !value
            .bytes()
            .any(|b| b.is_ascii_whitespace() || matches!(b, b'"' | b'\'' | b'=' | b'<' | b'>' | b'`'))
}
