//! TokenScanner - left-to-right span classification
//!
//! At every position the scanner tries, in order:
//! 1. Hashtag: `#` followed by one or more non-whitespace characters
//! 2. Mention: `@` followed by one or more non-whitespace characters
//! 3. URL: see [`UrlMatcher`]
//!
//! A match consumes its whole span, so a `#` or `@` inside a URL stays part
//! of the URL. A `@` inside a word (`name@host.test`) does start a mention.
//! Everything else is gathered into Plain spans.

use super::span::{Span, SpanKind};
use super::url::UrlMatcher;

pub struct TokenScanner {
    urls: &'static UrlMatcher,
}

impl TokenScanner {
    pub fn new() -> Self {
        Self {
            urls: UrlMatcher::shared(),
        }
    }

    /// Classify `text` into spans that cover it exactly once.
    pub fn scan(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut plain_start = 0;
        let mut pos = 0;

        while let Some(c) = text[pos..].chars().next() {
            let matched = match c {
                '#' => word_end(text, pos + 1).map(|end| (SpanKind::Hashtag, end)),
                '@' => word_end(text, pos + 1).map(|end| (SpanKind::Mention, end)),
                _ => self.urls.match_at(text, pos).map(|m| (SpanKind::Url, m.end)),
            };

            match matched {
                Some((kind, end)) => {
                    if plain_start < pos {
                        spans.push(Span::new(SpanKind::Plain, plain_start, pos));
                    }
                    log::trace!("{} span at {}..{}", kind.as_str(), pos, end);
                    spans.push(Span::new(kind, pos, end));
                    pos = end;
                    plain_start = end;
                }
                None => pos += c.len_utf8(),
            }
        }

        if plain_start < text.len() {
            spans.push(Span::new(SpanKind::Plain, plain_start, text.len()));
        }
        spans
    }

    /// True if `text` contains anything the scanner would classify as a mention.
    pub fn has_mention(text: &str) -> bool {
        text.match_indices('@')
            .any(|(pos, _)| word_end(text, pos + 1).is_some())
    }
}

impl Default for TokenScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// End of the non-whitespace run starting at `from`, if the run is non-empty.
pub(crate) fn word_end(text: &str, from: usize) -> Option<usize> {
    let rest = &text[from..];
    let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
    (len > 0).then_some(from + len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(SpanKind, &str)> {
        TokenScanner::new()
            .scan(text)
            .into_iter()
            .map(|s| (s.kind, s.text(text)))
            .collect()
    }

    #[test]
    fn test_empty_text() {
        assert!(TokenScanner::new().scan("").is_empty());
    }

    #[test]
    fn test_plain_only() {
        assert_eq!(kinds("just words"), vec![(SpanKind::Plain, "just words")]);
    }

    #[test]
    fn test_mixed_spans() {
        assert_eq!(
            kinds("hi @alice see #Rust at https://x.test ok"),
            vec![
                (SpanKind::Plain, "hi "),
                (SpanKind::Mention, "@alice"),
                (SpanKind::Plain, " see "),
                (SpanKind::Hashtag, "#Rust"),
                (SpanKind::Plain, " at "),
                (SpanKind::Url, "https://x.test"),
                (SpanKind::Plain, " ok"),
            ]
        );
    }

    #[test]
    fn test_at_inside_word_starts_mention() {
        assert_eq!(
            kinds("mail me@home.example"),
            vec![
                (SpanKind::Plain, "mail me"),
                (SpanKind::Mention, "@home.example"),
            ]
        );
    }

    #[test]
    fn test_remote_mention_is_one_span() {
        assert_eq!(
            kinds("@bob@remote.example"),
            vec![(SpanKind::Mention, "@bob@remote.example")]
        );
    }

    #[test]
    fn test_url_swallows_hash_and_at() {
        assert_eq!(
            kinds("https://x.test/@bob#top"),
            vec![(SpanKind::Url, "https://x.test/@bob#top")]
        );
    }

    #[test]
    fn test_lone_sigils_are_plain() {
        assert_eq!(kinds("a # b @ c"), vec![(SpanKind::Plain, "a # b @ c")]);
        assert_eq!(kinds("end@"), vec![(SpanKind::Plain, "end@")]);
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            kinds("héllo #café 👋"),
            vec![
                (SpanKind::Plain, "héllo "),
                (SpanKind::Hashtag, "#café"),
                (SpanKind::Plain, " 👋"),
            ]
        );
    }

    #[test]
    fn test_has_mention() {
        assert!(TokenScanner::has_mention("hello @x"));
        assert!(!TokenScanner::has_mention("hello @ x"));
        assert!(!TokenScanner::has_mention("no mentions"));
    }
}
