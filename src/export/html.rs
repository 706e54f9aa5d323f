//! HTML Export Generation
//!
//! This module wraps converted note markup in a complete HTML document with
//! inlined theme CSS, for standalone viewing.

use crate::config::{Settings, Theme};
use crate::markdown::convert;

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a complete HTML document from markdown content.
///
/// # Arguments
///
/// * `markdown` - The markdown source text
/// * `title` - Optional document title
/// * `theme` - Theme used for the inlined colors
///
/// # Returns
///
/// A complete HTML document as a string.
pub fn generate_html_document(markdown: &str, title: Option<&str>, theme: Theme) -> String {
    let html_body = generate_html_fragment(markdown);
    let theme_css = generate_theme_css(&Palette::for_theme(theme));
    let doc_title = title.unwrap_or(Settings::DEFAULT_TITLE);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="Inkpad">
    <title>{title}</title>
    <style>
{base_css}

{theme_css}
    </style>
</head>
<body>
    <article class="note-body">
{body}
    </article>
</body>
</html>"#,
        title = html_escape(doc_title),
        base_css = BASE_CSS,
        theme_css = theme_css,
        body = html_body,
    )
}

/// Generate an HTML fragment (no doctype, head, etc.) from markdown.
pub fn generate_html_fragment(markdown: &str) -> String {
    convert(markdown)
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Base CSS for note rendering (layout, typography).
const BASE_CSS: &str = r#"
*, *::before, *::after {
    box-sizing: border-box;
}

body {
    margin: 0;
    padding: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
}

.note-body {
    max-width: 760px;
    margin: 0 auto;
    padding: 32px 24px;
}

.note-body h1,
.note-body h2,
.note-body h3,
.note-body h4,
.note-body h5,
.note-body h6 {
    margin-top: 24px;
    margin-bottom: 16px;
    font-weight: 600;
    line-height: 1.25;
}

.note-body h1 { font-size: 2em; }
.note-body h2 { font-size: 1.5em; }
.note-body h3 { font-size: 1.25em; }

.note-body p {
    margin-top: 0;
    margin-bottom: 16px;
}

.note-body ul,
.note-body ol {
    margin-top: 0;
    margin-bottom: 16px;
    padding-left: 2em;
}

.note-body blockquote {
    margin: 0 0 16px 0;
    padding: 0 1em;
    border-left: 4px solid;
}

.note-body code {
    font-family: 'JetBrains Mono', 'Fira Code', 'Consolas', monospace;
    font-size: 0.9em;
    padding: 0.2em 0.4em;
    border-radius: 4px;
}

.note-body pre {
    padding: 16px;
    overflow: auto;
    border-radius: 6px;
}

.note-body pre code {
    padding: 0;
    background: transparent;
}

.note-body hr {
    height: 2px;
    margin: 24px 0;
    border: none;
}

.note-body img {
    max-width: 100%;
    height: auto;
}
"#;

/// CSS colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    scheme: &'static str,
    background: &'static str,
    text: &'static str,
    heading: &'static str,
    link: &'static str,
    blockquote_text: &'static str,
    blockquote_border: &'static str,
    code_bg: &'static str,
    code_block_bg: &'static str,
    rule: &'static str,
}

impl Palette {
    const LIGHT: Palette = Palette {
        scheme: "light",
        background: "#ffffff",
        text: "#24292f",
        heading: "#1f2328",
        link: "#0969da",
        blockquote_text: "#57606a",
        blockquote_border: "#d0d7de",
        code_bg: "#f3f4f6",
        code_block_bg: "#f6f8fa",
        rule: "#d0d7de",
    };

    const DARK: Palette = Palette {
        scheme: "dark",
        background: "#1e1e1e",
        text: "#d4d4d4",
        heading: "#e6e6e6",
        link: "#4fa3ff",
        blockquote_text: "#a0a0a0",
        blockquote_border: "#444c56",
        code_bg: "#2d2d2d",
        code_block_bg: "#252526",
        rule: "#444c56",
    };

    fn for_theme(theme: Theme) -> Self {
        if theme.is_dark() {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }
}

/// Generate theme-specific CSS.
fn generate_theme_css(palette: &Palette) -> String {
    format!(
        r#"
:root {{
    color-scheme: {scheme};
}}

body {{
    background-color: {bg};
    color: {text};
}}

.note-body h1,
.note-body h2,
.note-body h3,
.note-body h4,
.note-body h5,
.note-body h6 {{
    color: {heading};
}}

.note-body a {{
    color: {link};
}}

.note-body blockquote {{
    color: {blockquote_text};
    border-left-color: {blockquote_border};
}}

.note-body code {{
    background-color: {code_bg};
}}

.note-body pre {{
    background-color: {code_block_bg};
}}

.note-body hr {{
    background-color: {rule};
}}
"#,
        scheme = palette.scheme,
        bg = palette.background,
        text = palette.text,
        heading = palette.heading,
        link = palette.link,
        blockquote_text = palette.blockquote_text,
        blockquote_border = palette.blockquote_border,
        code_bg = palette.code_bg,
        code_block_bg = palette.code_block_bg,
        rule = palette.rule,
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

/// HTML-escape a string.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
