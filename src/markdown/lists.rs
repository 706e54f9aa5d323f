//! List block aggregation
//!
//! The line rules tag each item as `<li>` on its own, with no idea where a
//! list starts or ends. This pass runs first and brackets every maximal run
//! of same-kind item lines with the container tags.
//!
//! Lists are flat. The indentation of a run's first item is recorded on the
//! [`ListBlock`] but never used to build nested lists, and indentation
//! differences inside a run do not split it.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// `- item` / `* item`, optionally indented.
static UNORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)[-*][ \t]+.+$").expect("valid unordered item pattern"));

/// `1. item`, optionally indented.
static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)\d+\.[ \t]+.+$").expect("valid ordered item pattern"));

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// Which container a run of items gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `-` or `*` bullets, wrapped in `<ul>`
    Unordered,
    /// `N.` numbered items, wrapped in `<ol>`
    Ordered,
}

impl ListKind {
    pub fn open_tag(&self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    pub fn close_tag(&self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

/// A maximal run of consecutive item lines of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListBlock {
    pub kind: ListKind,
    /// Leading whitespace of the first item, in characters
    pub indent: usize,
    /// Index of the first item line
    pub start: usize,
    /// Index one past the last item line
    pub end: usize,
}

impl ListBlock {
    /// Number of item lines in the block.
    pub fn item_count(&self) -> usize {
        self.end - self.start
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Classify a single line as a list item, returning its kind and indentation.
pub fn classify_item(line: &str) -> Option<(ListKind, usize)> {
    let (kind, caps) = if let Some(caps) = UNORDERED_ITEM.captures(line) {
        (ListKind::Unordered, caps)
    } else {
        (ListKind::Ordered, ORDERED_ITEM.captures(line)?)
    };
    let indent = caps.get(1).map_or(0, |m| m.as_str().chars().count());
    Some((kind, indent))
}

/// Find all list blocks in a sequence of lines.
///
/// A block ends at the first line that is not an item or is an item of the
/// other kind.
pub fn find_list_blocks(lines: &[&str]) -> Vec<ListBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<ListBlock> = None;

    for (idx, line) in lines.iter().enumerate() {
        let item = classify_item(line);

        if let (Some((kind, _)), Some(block)) = (item, current.as_mut()) {
            if block.kind == kind {
                block.end = idx + 1;
                continue;
            }
        }

        if let Some(block) = current.take() {
            blocks.push(block);
        }
        current = item.map(|(kind, indent)| ListBlock {
            kind,
            indent,
            start: idx,
            end: idx + 1,
        });
    }

    if let Some(block) = current {
        blocks.push(block);
    }
    blocks
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregation
// ─────────────────────────────────────────────────────────────────────────────

/// Bracket every list block with its container tags, each on its own line.
///
/// Lines outside list blocks are passed through untouched.
pub fn aggregate_lists(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let blocks = find_list_blocks(&lines);
    if blocks.is_empty() {
        return text.to_string();
    }

    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + blocks.len() * 2);
    let mut cursor = 0;
    for block in &blocks {
        debug!(
            "List block {:?} at lines {}..{} ({} items, indent {})",
            block.kind,
            block.start,
            block.end,
            block.item_count(),
            block.indent
        );
        out.extend_from_slice(&lines[cursor..block.start]);
        out.push(block.kind.open_tag());
        out.extend_from_slice(&lines[block.start..block.end]);
        out.push(block.kind.close_tag());
        cursor = block.end;
    }
    out.extend_from_slice(&lines[cursor..]);

    out.join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_item() {
        assert_eq!(classify_item("- a"), Some((ListKind::Unordered, 0)));
        assert_eq!(classify_item("* a"), Some((ListKind::Unordered, 0)));
        assert_eq!(classify_item("  - a"), Some((ListKind::Unordered, 2)));
        assert_eq!(classify_item("12. a"), Some((ListKind::Ordered, 0)));
        assert_eq!(classify_item("\t3. a"), Some((ListKind::Ordered, 1)));
    }

    #[test]
    fn test_classify_non_items() {
        assert_eq!(classify_item("-a"), None);
        assert_eq!(classify_item("- "), None);
        assert_eq!(classify_item("---"), None);
        assert_eq!(classify_item("1.a"), None);
        assert_eq!(classify_item("plain text"), None);
        assert_eq!(classify_item(""), None);
    }

    #[test]
    fn test_find_single_block() {
        let lines = ["- a", "- b", "- c"];
        let blocks = find_list_blocks(&lines);
        assert_eq!(
            blocks,
            vec![ListBlock {
                kind: ListKind::Unordered,
                indent: 0,
                start: 0,
                end: 3
            }]
        );
        assert_eq!(blocks[0].item_count(), 3);
    }

    #[test]
    fn test_kind_change_splits_blocks() {
        let lines = ["- a", "1. b", "2. c"];
        let blocks = find_list_blocks(&lines);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, ListKind::Unordered);
        assert_eq!((blocks[1].start, blocks[1].end), (1, 3));
    }

    #[test]
    fn test_blank_line_splits_blocks() {
        let lines = ["- a", "", "- b"];
        assert_eq!(find_list_blocks(&lines).len(), 2);
    }

    #[test]
    fn test_indentation_does_not_nest() {
        let lines = ["  - a", "- b", "    - c"];
        let blocks = find_list_blocks(&lines);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].indent, 2);
        assert_eq!(blocks[0].item_count(), 3);
    }

    #[test]
    fn test_aggregate_wraps_runs() {
        let text = "intro\n- a\n- b\n1. one\nend";
        assert_eq!(
            aggregate_lists(text),
            "intro\n<ul>\n- a\n- b\n</ul>\n<ol>\n1. one\n</ol>\nend"
        );
    }

    #[test]
    fn test_aggregate_without_lists_is_identity() {
        let text = "# Title\n\nJust text\n";
        assert_eq!(aggregate_lists(text), text);
    }
}
