//! Grapheme-aware truncation
//!
//! Lengths count user-perceived characters (extended grapheme clusters), so
//! an emoji with modifiers or a letter with combining marks is one unit.

use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_MAX_LENGTH: usize = 200;
pub const DEFAULT_OMISSION: &str = "...";

/// Shorten `text` to at most `max_length` graphemes, ending in `omission`.
///
/// Trailing whitespace is dropped first, and text that is empty after that
/// stays empty whatever the budget. Text strictly shorter than
/// `max_length` is returned as is. Otherwise the first
/// `max_length - len(omission)` graphemes are kept (zero if the omission alone
/// is too long) and the omission is appended. No word-boundary handling.
pub fn truncate(text: &str, max_length: usize, omission: &str) -> String {
    let text = text.trim_end();
    if text.is_empty() {
        return String::new();
    }
    let length = text.graphemes(true).count();
    if length < max_length {
        return text.to_string();
    }

    let budget = max_length.saturating_sub(omission.graphemes(true).count());
    let cut = text
        .grapheme_indices(true)
        .nth(budget)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    let mut out = String::with_capacity(cut + omission.len());
    out.push_str(&text[..cut]);
    out.push_str(omission);
    out
}

/// [`truncate`] with the default length and omission marker.
pub fn truncate_default(text: &str) -> String {
    truncate(text, DEFAULT_MAX_LENGTH, DEFAULT_OMISSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_with_omission() {
        assert_eq!(truncate("hello world", 8, "..."), "hello...");
    }

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate("short", 200, "..."), "short");
        assert_eq!(truncate_default("short"), "short");
    }

    #[test]
    fn test_exact_length_is_truncated() {
        // only strictly shorter text escapes truncation
        assert_eq!(truncate("abcdefgh", 8, "..."), "abcde...");
    }

    #[test]
    fn test_retruncate_is_noop() {
        let once = truncate("hello world", 8, "...");
        assert_eq!(truncate(&once, 8, "..."), once);

        let short = truncate("tiny", 10, "...");
        assert_eq!(truncate(&short, 10, "..."), short);
    }

    #[test]
    fn test_trailing_whitespace_dropped() {
        assert_eq!(truncate("short   \n", 8, "..."), "short");
        assert_eq!(truncate("hello  world   ", 9, "…"), "hello  w…");
    }

    #[test]
    fn test_graphemes_count_as_one() {
        // family emoji is a single grapheme built from several code points
        let text = "👨‍👩‍👧‍👦👨‍👩‍👧‍👦👨‍👩‍👧‍👦 done";
        assert_eq!(truncate(text, 4, "…"), "👨‍👩‍👧‍👦👨‍👩‍👧‍👦👨‍👩‍👧‍👦…");

        let combining = "e\u{301}e\u{301}e\u{301}e\u{301}";
        assert_eq!(truncate(combining, 3, "."), "e\u{301}e\u{301}.");
    }

    #[test]
    fn test_omission_longer_than_budget_clamps() {
        assert_eq!(truncate("hello world", 2, "..."), "...");
        assert_eq!(truncate("hello world", 0, "[cut]"), "[cut]");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(truncate("", 5, "..."), "");
        assert_eq!(truncate("", 0, "..."), "");
        assert_eq!(truncate(" \n\t", 0, "[cut]"), "");
    }
}
