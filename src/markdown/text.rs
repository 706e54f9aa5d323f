//! Plain-text helpers for note bodies
//!
//! Used to derive a note's title from its HTML, to build list previews, and
//! to search notes and highlight matches without markup getting in the way.
//!
//! Lengths and positions are counted in characters, never bytes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::string_utils::{slice_chars, truncate_chars};

/// Title used when a note has no heading and no text.
pub const UNTITLED: &str = "Untitled note";

/// Maximum length, in characters, of a title taken from the first line.
pub const TITLE_MAX_CHARS: usize = 30;

/// Length, in characters, of a note list preview.
pub const PREVIEW_CHARS: usize = 100;

/// Characters of context shown on each side of a search match.
pub const CONTEXT_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

static FIRST_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<h[1-6]\b[^>]*>(.*?)</h[1-6]>").expect("valid heading pattern")
});

/// Decode the handful of entities an editor surface emits.
///
/// `&amp;` goes last so `&amp;lt;` decodes to `&lt;`, not `<`.
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Remove all tags and decode basic entities, keeping only text content.
pub fn strip_html(html: &str) -> String {
    decode_entities(&TAG.replace_all(html, ""))
}

/// Derive a title for a note from its HTML body.
///
/// Prefers the text of the first heading. Otherwise uses the first line of
/// the plain text, trimmed and cut to [`TITLE_MAX_CHARS`] characters, and
/// falls back to [`UNTITLED`] when that is empty.
pub fn extract_title(html: &str) -> String {
    if let Some(caps) = FIRST_HEADING.captures(html) {
        let heading = strip_html(&caps[1]);
        if !heading.trim().is_empty() {
            return heading;
        }
    }

    let text = strip_html(html);
    let first_line = text.split('\n').next().unwrap_or("").trim();
    let title = truncate_chars(first_line, TITLE_MAX_CHARS);
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}

/// Plain-text preview of a note body, cut to `max_chars` characters with a
/// trailing `...` when anything was cut.
pub fn preview(html: &str, max_chars: usize) -> String {
    let text = strip_html(html);
    if text.chars().count() > max_chars {
        format!("{}{}", truncate_chars(&text, max_chars), ELLIPSIS)
    } else {
        text
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

/// Lowercase one character, keeping it one character long.
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Character index of the first case-insensitive match of `query` in
/// `haystack` at or after `from`.
fn find_ignore_case(haystack: &[char], query: &[char], from: usize) -> Option<usize> {
    if query.is_empty() || query.len() > haystack.len() {
        return None;
    }
    (from..=haystack.len() - query.len()).find(|&start| {
        haystack[start..start + query.len()]
            .iter()
            .zip(query)
            .all(|(a, b)| fold(*a) == fold(*b))
    })
}

fn contains_ignore_case(text: &str, query: &[char]) -> bool {
    let chars: Vec<char> = text.chars().collect();
    find_ignore_case(&chars, query, 0).is_some()
}

/// Whether a note matches a search query, case-insensitively, in its title
/// or its plain-text body. An empty query matches every note.
pub fn note_matches(title: &str, html: &str, query: &str) -> bool {
    let query: Vec<char> = query.chars().collect();
    query.is_empty()
        || contains_ignore_case(&strip_html(title), &query)
        || contains_ignore_case(&strip_html(html), &query)
}

/// Snippet of `text` around the first match of `query`.
///
/// Keeps [`CONTEXT_CHARS`] characters on each side and marks cut ends with
/// `...`. Without a match, returns the first `2 * CONTEXT_CHARS` characters.
pub fn context_around_match(text: &str, query: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let query: Vec<char> = query.chars().collect();

    let Some(idx) = find_ignore_case(&chars, &query, 0) else {
        let head = truncate_chars(text, CONTEXT_CHARS * 2);
        return if chars.len() > CONTEXT_CHARS * 2 {
            format!("{}{}", head, ELLIPSIS)
        } else {
            head.to_string()
        };
    };

    let start = idx.saturating_sub(CONTEXT_CHARS);
    let end = (idx + query.len() + CONTEXT_CHARS).min(chars.len());

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.push_str(slice_chars(text, start, end));
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

/// Wrap every case-insensitive match of `query` in
/// `<span class="highlight">`, keeping the original casing.
pub fn highlight_matches(text: &str, query: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let query: Vec<char> = query.chars().collect();

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    while let Some(idx) = find_ignore_case(&chars, &query, last) {
        out.push_str(slice_chars(text, last, idx));
        out.push_str(r#"<span class="highlight">"#);
        out.push_str(slice_chars(text, idx, idx + query.len()));
        out.push_str("</span>");
        last = idx + query.len();
    }
    out.push_str(slice_chars(text, last, chars.len()));
    out
}
