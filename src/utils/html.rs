//! HTML utility functions.
//!
//! - `unescape()` - decode entities in attribute values before comparing them
//! - `quote_attr()` - make a raw attribute value safe inside double quotes

use std::borrow::Cow;

/// Decode HTML entities back to characters.
///
/// Handles common named entities and numeric character references.
/// Unknown entities are kept verbatim.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '&' {
            result.push(c);
            continue;
        }

        // Collect entity
        let mut entity = String::new();
        let mut terminated = false;
        while let Some(&next) = chars.peek() {
            if next == ';' {
                chars.next();
                terminated = true;
                break;
            }
            if next == '&' || entity.len() > 10 {
                break;
            }
            entity.push(next);
            chars.next();
        }

        let decoded = if terminated { decode_entity(&entity) } else { None };
        match decoded {
            Some(ch) => result.push(ch),
            None => {
                result.push('&');
                result.push_str(&entity);
                if terminated {
                    result.push(';');
                }
            }
        }
    }

    Cow::Owned(result)
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        s if s.starts_with("#x") || s.starts_with("#X") => {
            u32::from_str_radix(&s[2..], 16).ok().and_then(char::from_u32)
        }
        s if s.starts_with('#') => s[1..].parse().ok().and_then(char::from_u32),
        _ => None,
    }
}

/// Prepare a raw (source-escaped) attribute value for a double-quoted
/// attribute. Only `"` needs replacing; existing entities are kept.
#[inline]
pub fn quote_attr(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(s.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(s)
    }
}
