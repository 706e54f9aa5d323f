//! Markdown conversion module
//!
//! Converts the small Markdown dialect used in notes (headings, bold, italic,
//! flat lists, links, inline and fenced code, blockquotes, horizontal rules,
//! paragraphs) to HTML with an ordered table of regex rewrite rules, and
//! provides the lossy reverse export plus plain-text helpers for titles,
//! previews and search.
//!
//! # Example
//! ```ignore
//! use inkpad::markdown::{convert, html_to_markdown, extract_title};
//!
//! let html = convert("# Hello\n\nThis is **bold** text.");
//! assert_eq!(extract_title(&html), "Hello");
//! let markdown = html_to_markdown(&html);
//! ```

mod converter;
mod export;
pub mod lists;
pub mod repair;
mod text;

pub use converter::{convert, MarkdownConverter, Rewrite, Rule};
pub use export::html_to_markdown;
pub use text::{
    context_around_match, decode_entities, extract_title, highlight_matches, note_matches,
    preview, strip_html, CONTEXT_CHARS, PREVIEW_CHARS, TITLE_MAX_CHARS, UNTITLED,
};
