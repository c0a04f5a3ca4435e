//! Safe-mention splitting
//!
//! In safe mode only mentions that open a post count. The leading run is:
//!
//! ```text
//! whitespace* tag* (mention whitespace+)+
//! ```
//!
//! where `tag` is an inline markup tag (`<...>`) and `mention` is `@`
//! followed by non-whitespace. The run ends at the last whitespace that closes
//! a complete mention; the first character that does not fit the pattern
//! starts the rest of the text.

use super::scanner::word_end;

/// A text split into its leading mention run and the remainder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SafeSplit<'a> {
    pub prefix: &'a str,
    pub rest: &'a str,
}

impl<'a> SafeSplit<'a> {
    fn unsplit(text: &'a str) -> Self {
        Self { prefix: "", rest: text }
    }
}

/// Split `text` into (leading mention run, rest).
///
/// When the text does not open with the pattern above, the prefix is empty
/// and the rest is the whole text. The walk only touches the leading run, so
/// callers that want to skip mention-free text check
/// [`TokenScanner::has_mention`](super::scanner::TokenScanner::has_mention) first.
pub fn split_safe(text: &str) -> SafeSplit<'_> {
    let mut pos = skip_whitespace(text, 0);
    while let Some(end) = tag_end(text, pos) {
        pos = end;
    }

    let mut committed = None;
    while let Some(end) = mention_then_whitespace(text, pos) {
        pos = end;
        committed = Some(end);
    }

    match committed {
        Some(end) => {
            log::debug!("safe mention prefix ends at byte {}", end);
            SafeSplit {
                prefix: &text[..end],
                rest: &text[end..],
            }
        }
        None => SafeSplit::unsplit(text),
    }
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    let rest = &text[from..];
    from + (rest.len() - rest.trim_start().len())
}

/// End of a `<...>` tag starting at `pos`.
fn tag_end(text: &str, pos: usize) -> Option<usize> {
    let rest = text[pos..].strip_prefix('<')?;
    let close = rest.find('>')?;
    // `<>` is not a tag
    (close > 0).then_some(pos + 1 + close + 1)
}

/// End of `@token` plus the whitespace after it, if both are present.
fn mention_then_whitespace(text: &str, pos: usize) -> Option<usize> {
    text[pos..].strip_prefix('@')?;
    let token_end = word_end(text, pos + 1)?;
    let after = skip_whitespace(text, token_end);
    (after > token_end).then_some(after)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> (&str, &str) {
        let s = split_safe(text);
        (s.prefix, s.rest)
    }

    #[test]
    fn test_leading_run_stops_at_first_word() {
        assert_eq!(
            split("@alice @bob hello @carol"),
            ("@alice @bob ", "hello @carol")
        );
    }

    #[test]
    fn test_no_leading_mention() {
        assert_eq!(split("hi @alice"), ("", "hi @alice"));
    }

    #[test]
    fn test_no_mentions_at_all() {
        assert_eq!(split("plain text"), ("", "plain text"));
    }

    #[test]
    fn test_leading_whitespace_included() {
        assert_eq!(split("  \n@alice hi"), ("  \n@alice ", "hi"));
    }

    #[test]
    fn test_tag_wrappers_before_mentions() {
        assert_eq!(
            split("<p><span>@alice @bob </span>hey</p>"),
            ("<p><span>@alice @bob ", "</span>hey</p>")
        );
    }

    #[test]
    fn test_mention_without_trailing_whitespace_is_not_a_run() {
        assert_eq!(split("@alice"), ("", "@alice"));
        assert_eq!(split("@alice @bob"), ("@alice ", "@bob"));
    }

    #[test]
    fn test_halves_concatenate_to_input() {
        for text in ["@a @b c", "x @a", "<b>@a \t@b\nrest", ""] {
            let (prefix, rest) = split(text);
            assert_eq!(format!("{}{}", prefix, rest), text);
        }
    }
}
