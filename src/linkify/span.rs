//! Span model produced by the token scanner.

use serde::{Deserialize, Serialize};

/// Classification of a scanned span
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Url,
    Mention,
    Hashtag,
    Plain,
}

impl SpanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanKind::Url => "url",
            SpanKind::Mention => "mention",
            SpanKind::Hashtag => "hashtag",
            SpanKind::Plain => "plain",
        }
    }
}

/// A classified byte range over the scanned text.
///
/// Spans are emitted in scan order, never overlap, and together cover the
/// input exactly once.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(kind: SpanKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// The slice of `text` this span covers.
    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
