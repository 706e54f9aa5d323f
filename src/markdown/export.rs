//! HTML to Markdown export
//!
//! A lossy reverse of the converter, used when a note body (HTML from the
//! editing surface) is copied or saved as Markdown. Known elements are mapped
//! back to their Markdown form, every other tag is dropped, and runs of blank
//! lines are collapsed.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::text::decode_entities;

/// Compile one of the fixed patterns below.
fn pattern(re: &str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| panic!("invalid export pattern '{}': {}", re, e))
}

static HEADING: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<h([1-6])\b[^>]*>(.*?)</h[1-6]>"));
static PARAGRAPH: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<p\b[^>]*>(.*?)</p>"));
static BLOCKQUOTE: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)<blockquote\b[^>]*>(.*?)</blockquote>"));
static STRONG: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<(?:strong|b)\b[^>]*>(.*?)</(?:strong|b)>"));
static EMPHASIS: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<(?:em|i)\b[^>]*>(.*?)</(?:em|i)>"));
static LINK: Lazy<Regex> =
    Lazy::new(|| pattern(r#"(?i)<a\b[^>]*href="(.*?)"[^>]*>(.*?)</a>"#));
static UNORDERED_LIST: Lazy<Regex> = Lazy::new(|| pattern(r"(?is)<ul\b[^>]*>(.*?)</ul>"));
static ORDERED_LIST: Lazy<Regex> = Lazy::new(|| pattern(r"(?is)<ol\b[^>]*>(.*?)</ol>"));
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| pattern(r"(?is)<li\b[^>]*>(.*?)</li>"));
static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?is)<pre\b[^>]*><code\b[^>]*>(.*?)</code></pre>"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<code\b[^>]*>(.*?)</code>"));
static IMAGE: Lazy<Regex> = Lazy::new(|| pattern(r#"(?i)<img\b[^>]*src="(.*?)"[^>]*>"#));
static RULE: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<hr\b[^>]*>"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"<[^>]+>"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| pattern(r"\n\s*\n\s*\n"));

/// Convert note HTML back to Markdown.
///
/// Never fails. Markup without a Markdown counterpart is reduced to its text.
pub fn html_to_markdown(html: &str) -> String {
    let md = HEADING.replace_all(html, |caps: &Captures<'_>| {
        let level: usize = caps[1].parse().unwrap_or(1);
        format!("{} {}\n\n", "#".repeat(level), &caps[2])
    });
    let md = PARAGRAPH.replace_all(&md, "${1}\n\n");
    let md = BLOCKQUOTE.replace_all(&md, "> ${1}\n\n");

    let md = STRONG.replace_all(&md, "**${1}**");
    let md = EMPHASIS.replace_all(&md, "*${1}*");
    let md = LINK.replace_all(&md, "[${2}](${1})");

    let md = UNORDERED_LIST.replace_all(&md, |caps: &Captures<'_>| {
        LIST_ITEM
            .captures_iter(&caps[1])
            .map(|item| format!("- {}\n", item[1].trim()))
            .collect::<String>()
    });
    let md = ORDERED_LIST.replace_all(&md, |caps: &Captures<'_>| {
        LIST_ITEM
            .captures_iter(&caps[1])
            .enumerate()
            .map(|(idx, item)| format!("{}. {}\n", idx + 1, item[1].trim()))
            .collect::<String>()
    });

    let md = CODE_BLOCK.replace_all(&md, "```\n${1}\n```\n\n");
    let md = INLINE_CODE.replace_all(&md, "`${1}`");
    let md = IMAGE.replace_all(&md, "![](${1})");
    let md = RULE.replace_all(&md, "---\n\n");

    let md = ANY_TAG.replace_all(&md, "");
    let md = BLANK_RUN.replace_all(&md, "\n\n");

    decode_entities(&md)
}
