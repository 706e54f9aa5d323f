//! Structural post-repair
//!
//! Line-by-line rewriting leaves two kinds of artifacts that are cleaned up
//! after the rule table has run:
//!
//! - whitespace between the last `</li>` and the list's closing tag
//! - paragraphs wrapped around block-level elements (typically indented
//!   list items, which the paragraph rule does not recognise as tags)

use once_cell::sync::Lazy;
use regex::Regex;

static LIST_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</li>\s*</(ul|ol)>").expect("valid list close pattern"));

/// A paragraph whose whole content, up to surrounding whitespace, is one
/// block-level element on a single line.
static PARAGRAPH_AROUND_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"<p>(\s*<(?:h[1-6]|ul|ol|li|blockquote|pre)\b[^>]*>.*</(?:h[1-6]|ul|ol|li|blockquote|pre)>\s*|\s*<hr\s*/?>\s*)</p>",
    )
    .expect("valid paragraph-around-block pattern")
});

/// Run every repair pass in order.
pub fn repair(html: &str) -> String {
    let html = collapse_list_closing(html);
    unwrap_block_paragraphs(&html)
}

/// Join a trailing `</li>` with the list's closing tag.
pub fn collapse_list_closing(html: &str) -> String {
    LIST_CLOSE.replace_all(html, "</li></${1}>").into_owned()
}

/// Strip paragraph tags that ended up around a block-level element.
///
/// The opening and closing tag are removed together, so a paragraph that
/// only contains a block element somewhere in its text stays balanced.
pub fn unwrap_block_paragraphs(html: &str) -> String {
    PARAGRAPH_AROUND_BLOCK
        .replace_all(html, "${1}")
        .into_owned()
}
