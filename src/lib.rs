//! Inkpad - Markdown to HTML conversion for quick notes
//!
//! The core is [`markdown::convert`], a rule-based rewriter for the small
//! Markdown dialect notes are written in. Around it sit the reverse
//! HTML-to-Markdown export, title extraction, standalone HTML export and the
//! configuration used by the `inkpad` command line tool.

pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod markdown;
pub mod string_utils;

pub use error::{Error, Result};
pub use markdown::{convert, extract_title, html_to_markdown, strip_html, MarkdownConverter};
