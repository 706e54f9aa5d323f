//! UTF-8 Safe String Utilities
//!
//! Titles and previews are cut by character count, not bytes. Characters like
//! `ø`, `中` or `🎉` are multi-byte in UTF-8, so a naive `&text[..n]` panics
//! when `n` lands inside one.
//!
//! # Example
//! ```ignore
//! use inkpad::string_utils::truncate_chars;
//!
//! assert_eq!(truncate_chars("Hei på deg", 5), "Hei p");
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Index Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a character index to a byte index.
///
/// Indices past the end of the string map to the string length.
pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(s.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Truncation
// ─────────────────────────────────────────────────────────────────────────────

/// Return at most the first `max_chars` characters of `s`.
#[inline]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    &s[..char_index_to_byte_index(s, max_chars)]
}

/// Slice `s` by character positions `start..end`, clamped to the string.
pub fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    let start = char_index_to_byte_index(s, start);
    let end = char_index_to_byte_index(s, end).max(start);
    &s[start..end]
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
