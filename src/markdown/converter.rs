//! Rule-based Markdown to HTML conversion
//!
//! Conversion runs in three phases over plain strings:
//!
//! 1. list aggregation ([`super::lists`]) brackets runs of item lines with
//!    `<ul>`/`<ol>`
//! 2. the rule table rewrites the whole text once per rule, in order
//! 3. post-repair ([`super::repair`]) fixes nesting artifacts
//!
//! Each rule scans the entire current text, including markup produced by
//! earlier rules. Order therefore matters: bold must run before italic, and
//! paragraph wrapping must run last. Nothing is tokenized, so code block
//! content is not protected from the other rules.

use std::fmt;

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::lists::aggregate_lists;
use super::repair::repair;

// ─────────────────────────────────────────────────────────────────────────────
// Rules
// ─────────────────────────────────────────────────────────────────────────────

/// Produces the replacement for one match.
///
/// The second argument is the full text the rule is being applied to, for
/// rewrites that need to look around the match.
pub type Rewrite = fn(&Captures<'_>, &str) -> String;

/// A single whole-text rewrite pass.
pub struct Rule {
    name: &'static str,
    pattern: Regex,
    rewrite: Rewrite,
}

impl Rule {
    /// Build a rule from a pattern that is known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` does not compile. Rule patterns are constants.
    pub fn new(name: &'static str, pattern: &str, rewrite: Rewrite) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid pattern for rule '{}': {}", name, e));
        Self {
            name,
            pattern,
            rewrite,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Replace every match of this rule in `text`.
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| (self.rewrite)(caps, text))
            .into_owned()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Text of capture group `idx`, or `""` if it did not participate.
fn group<'t>(caps: &Captures<'t>, idx: usize) -> &'t str {
    caps.get(idx).map_or("", |m| m.as_str())
}

/// Text of whichever alternative of a two-branch pattern matched.
fn either<'t>(caps: &Captures<'t>, first: usize, second: usize) -> &'t str {
    caps.get(first)
        .or_else(|| caps.get(second))
        .map_or("", |m| m.as_str())
}

fn heading(caps: &Captures<'_>, _: &str) -> String {
    let level = group(caps, 1).len();
    format!("<h{level}>{}</h{level}>", group(caps, 2))
}

fn bold(caps: &Captures<'_>, _: &str) -> String {
    format!("<strong>{}</strong>", either(caps, 1, 2))
}

fn italic(caps: &Captures<'_>, _: &str) -> String {
    format!("<em>{}</em>", either(caps, 1, 2))
}

fn list_item(caps: &Captures<'_>, _: &str) -> String {
    format!("{}<li>{}</li>", group(caps, 1), group(caps, 2))
}

fn link(caps: &Captures<'_>, _: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank">{}</a>"#,
        group(caps, 2),
        group(caps, 1)
    )
}

/// Inline code is skipped when it touches another backtick, so the fence
/// rule that runs after it still sees intact triple backticks.
fn inline_code(caps: &Captures<'_>, text: &str) -> String {
    let whole = &caps[0];
    let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
    let bytes = text.as_bytes();
    let before = start.checked_sub(1).and_then(|i| bytes.get(i));
    let after = bytes.get(end);
    if before == Some(&b'`') || after == Some(&b'`') {
        return whole.to_string();
    }
    format!("<code>{}</code>", group(caps, 1))
}

fn fenced_code(caps: &Captures<'_>, _: &str) -> String {
    format!("<pre><code>{}</code></pre>", group(caps, 1))
}

fn blockquote(caps: &Captures<'_>, _: &str) -> String {
    format!("<blockquote>{}</blockquote>", group(caps, 1))
}

fn horizontal_rule(_: &Captures<'_>, _: &str) -> String {
    String::from("<hr>")
}

/// Lines that already open or close a tag are left alone, as are blank ones.
fn paragraph(caps: &Captures<'_>, _: &str) -> String {
    let line = &caps[0];
    if line.trim().is_empty() || starts_with_tag(line) {
        line.to_string()
    } else {
        format!("<p>{}</p>", line)
    }
}

/// `<x...` or `</x...` with a lowercase ASCII tag name.
fn starts_with_tag(line: &str) -> bool {
    match line.strip_prefix('<') {
        Some(rest) => rest
            .strip_prefix('/')
            .unwrap_or(rest)
            .starts_with(|c: char| c.is_ascii_lowercase()),
        None => false,
    }
}

/// The rule table, in application order.
fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new("heading", r"(?m)^(#{1,6})[ \t]+(.+)$", heading),
        Rule::new("bold", r"\*\*(.*?)\*\*|__(.*?)__", bold),
        Rule::new("italic", r"\*(.*?)\*|_(.*?)_", italic),
        Rule::new(
            "list-item",
            r"(?m)^([ \t]*)(?:[-*]|\d+\.)[ \t]+(.+)$",
            list_item,
        ),
        Rule::new("link", r"\[([^\]]+)\]\(([^)]+)\)", link),
        Rule::new("inline-code", r"`([^`\n]+)`", inline_code),
        Rule::new("fenced-code", r"(?s)```(.*?)```", fenced_code),
        Rule::new("blockquote", r"(?m)^>[ \t]+(.+)$", blockquote),
        Rule::new(
            "horizontal-rule",
            r"(?m)^(?:-{3,}|\*{3,}|_{3,})$",
            horizontal_rule,
        ),
        Rule::new("paragraph", r"(?m)^.+$", paragraph),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Converter
// ─────────────────────────────────────────────────────────────────────────────

/// Converts the note Markdown dialect to HTML.
///
/// The rule table is fixed at construction and never mutated, so one
/// converter can be shared freely between threads.
#[derive(Debug)]
pub struct MarkdownConverter {
    rules: Vec<Rule>,
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// The rules in the order they are applied.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Convert `text` to HTML.
    ///
    /// Total over all inputs: malformed Markdown comes out partially tagged
    /// or literal, never as an error. Empty input yields an empty string.
    /// Converting the output a second time is not guaranteed to be stable.
    pub fn convert(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        debug!("Converting {} bytes of markdown", text.len());

        let text = text.replace("\r\n", "\n");
        let mut html = aggregate_lists(&text);
        for rule in &self.rules {
            html = rule.apply(&html);
            trace!("After rule '{}': {} bytes", rule.name(), html.len());
        }
        repair(&html)
    }
}

static DEFAULT_CONVERTER: Lazy<MarkdownConverter> = Lazy::new(MarkdownConverter::new);

/// Convert `text` to HTML with the shared default converter.
pub fn convert(text: &str) -> String {
    DEFAULT_CONVERTER.convert(text)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_empty_input() {
        assert_eq!(convert(""), "");
    }

    #[test]
    fn test_whitespace_only_input_has_no_markup() {
        let html = convert("   \n\t\n");
        assert!(!html.contains('<'));
        assert!(html.trim().is_empty());
    }

    #[test]
    fn test_plain_text_becomes_paragraphs() {
        assert_eq!(convert("hello\nworld"), "<p>hello</p>\n<p>world</p>");
    }

    #[test]
    fn test_unicode_input() {
        assert_eq!(convert("你好 🎉 på"), "<p>你好 🎉 på</p>");
        assert_eq!(convert("# 标题"), "<h1>标题</h1>");
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    #[case(6)]
    fn test_heading_levels(#[case] level: usize) {
        let input = format!("{} Heading", "#".repeat(level));
        assert_eq!(
            convert(&input),
            format!("<h{level}>Heading</h{level}>", level = level)
        );
    }

    #[test]
    fn test_heading_requires_space_and_max_six() {
        assert_eq!(convert("#nospace"), "<p>#nospace</p>");
        assert_eq!(convert("####### seven"), "<p>####### seven</p>");
    }

    #[test]
    fn test_title_then_paragraph() {
        assert_eq!(
            convert("# Title\n\nSome text"),
            "<h1>Title</h1>\n\n<p>Some text</p>"
        );
    }

    #[test]
    fn test_bold_is_not_double_italic() {
        let html = convert("**bold**");
        assert_eq!(html, "<strong>bold</strong>");
        assert!(!html.contains("<em>"));
        assert_eq!(convert("__bold__"), "<strong>bold</strong>");
    }

    #[test]
    fn test_italic() {
        assert_eq!(convert("*italic*"), "<em>italic</em>");
        assert_eq!(convert("_italic_"), "<em>italic</em>");
    }

    #[test]
    fn test_emphasis_is_non_greedy() {
        assert_eq!(
            convert("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn test_text_then_emphasis_keeps_paragraph() {
        assert_eq!(
            convert("very *quiet* note"),
            "<p>very <em>quiet</em> note</p>"
        );
    }

    #[test]
    fn test_mismatched_delimiters_degrade() {
        // `**` never closes, so only the single-star span is tagged
        assert_eq!(convert("x **bold*"), "<p>x <em></em>bold*</p>");
        // Delimiters must match on both sides
        assert_eq!(convert("x *a_"), "<p>x *a_</p>");
    }

    #[test]
    fn test_unordered_list_is_one_container() {
        let html = convert("- a\n- b\n- c");
        assert_eq!(html, "<ul>\n<li>a</li>\n<li>b</li>\n<li>c</li></ul>");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn test_star_bullets() {
        assert_eq!(convert("* a\n* b"), "<ul>\n<li>a</li>\n<li>b</li></ul>");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            convert("1. first\n2. second"),
            "<ol>\n<li>first</li>\n<li>second</li></ol>"
        );
    }

    #[test]
    fn test_list_between_paragraphs() {
        assert_eq!(
            convert("Shopping:\n- milk\n- eggs\nDone"),
            "<p>Shopping:</p>\n<ul>\n<li>milk</li>\n<li>eggs</li></ul>\n<p>Done</p>"
        );
    }

    #[test]
    fn test_indented_items_stay_flat() {
        let html = convert("- a\n  - b\n- c");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html, "<ul>\n<li>a</li>\n  <li>b</li>\n<li>c</li></ul>");
    }

    #[test]
    fn test_list_item_with_inline_markup() {
        assert_eq!(
            convert("- **done** task"),
            "<ul>\n<li><strong>done</strong> task</li></ul>"
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            convert("[site](https://example.com)"),
            r#"<a href="https://example.com" target="_blank">site</a>"#
        );
    }

    #[test]
    fn test_link_inside_text() {
        assert_eq!(
            convert("see [docs](http://docs.rs) now"),
            r#"<p>see <a href="http://docs.rs" target="_blank">docs</a> now</p>"#
        );
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(convert("`code`"), "<code>code</code>");
        assert_eq!(
            convert("use `a` and `b`"),
            "<p>use <code>a</code> and <code>b</code></p>"
        );
    }

    #[test]
    fn test_fenced_code_single_line() {
        assert_eq!(convert("```let x```"), "<pre><code>let x</code></pre>");
    }

    #[test]
    fn test_fenced_code_multi_line() {
        let html = convert("```\nlet x = 1;\n```");
        assert!(html.starts_with("<pre><code>\n"));
        assert!(html.ends_with("\n</code></pre>"));
        // Body lines are not shielded from the paragraph rule
        assert!(html.contains("<p>let x = 1;</p>"));
    }

    #[test]
    fn test_blockquote_per_line() {
        assert_eq!(
            convert("> one\n> two"),
            "<blockquote>one</blockquote>\n<blockquote>two</blockquote>"
        );
        // Whitespace after `>` is required
        assert_eq!(convert(">tight"), "<p>>tight</p>");
    }

    #[rstest]
    #[case("---")]
    #[case("-----")]
    fn test_horizontal_rule(#[case] input: &str) {
        assert_eq!(convert(input), "<hr>");
    }

    #[test]
    fn test_mixed_rule_characters_are_not_a_rule() {
        assert_ne!(convert("-_-"), "<hr>");
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            convert("# Title\r\n\r\ntext"),
            "<h1>Title</h1>\n\n<p>text</p>"
        );
    }

    #[test]
    fn test_rule_order() {
        let converter = MarkdownConverter::new();
        let names: Vec<_> = converter.rules().iter().map(Rule::name).collect();
        assert_eq!(
            names,
            vec![
                "heading",
                "bold",
                "italic",
                "list-item",
                "link",
                "inline-code",
                "fenced-code",
                "blockquote",
                "horizontal-rule",
                "paragraph",
            ]
        );
    }

    #[test]
    fn test_block_tag_inside_text_stays_wrapped() {
        assert_eq!(convert("x <li>y</li>"), "<p>x <li>y</li></p>");
        assert_eq!(convert("see <hr>"), "<p>see <hr></p>");
    }

    /// One line of note-like Markdown.
    fn markdown_line_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            // Plain text
            "[a-z ]{1,20}",
            // Headings, including too many hashes
            "#{1,7} [a-z ]{1,10}",
            // Emphasis with stray delimiters
            "[a-z]{0,4}[*_]{1,3}[a-z ]{0,6}[*_]{0,3}",
            // List items
            "[ \\t]{0,4}([-*]|[0-9]{1,2}\\.) [a-z*_`]{1,10}",
            // Links, some broken
            "\\[[a-z ]{0,6}\\]?\\(?[a-z:/.]{0,8}\\)?",
            // Code spans and fences
            "`{1,3}[a-z ]{0,8}`{0,3}",
            // Quotes and rules
            ">[ ]?[a-z ]{0,8}",
            "(-{3,5}|\\*{3}|_{3})",
            "",
        ]
    }

    fn markdown_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(markdown_line_strategy(), 0..12).prop_map(|lines| lines.join("\n"))
    }

    proptest! {
        #[test]
        fn test_convert_is_total(input in any::<String>()) {
            let html = convert(&input);
            prop_assert_eq!(html.is_empty(), input.is_empty());
        }

        #[test]
        fn test_paragraph_tags_are_balanced(input in markdown_strategy()) {
            let html = convert(&input);
            prop_assert_eq!(html.matches("<p>").count(), html.matches("</p>").count());
        }

        #[test]
        fn test_list_tags_are_balanced(input in markdown_strategy()) {
            let html = convert(&input);
            prop_assert_eq!(html.matches("<ul>").count(), html.matches("</ul>").count());
            prop_assert_eq!(html.matches("<ol>").count(), html.matches("</ol>").count());
        }
    }

    #[test]
    fn test_converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarkdownConverter>();

        let converter = MarkdownConverter::default();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let text = format!("# Note {}", i);
                std::thread::spawn(move || convert(&text))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("<h1>Note {}</h1>", i));
        }
        assert_eq!(converter.convert("*x*"), "<em>x</em>");
    }
}
