//! Content-type aware escaping
//!
//! - `text/html` and `text/x.markdown`: handed to the caller's [`HtmlFilter`]
//! - `text/plain`: link candidates are kept verbatim, everything else is
//!   HTML-escaped
//!
//! Escaped plain text stays free of `#` so it can be linkified afterwards
//! without inventing hashtags from numeric entities.
//!
//! Plain-text escaping is meant to run once per render. Running it over its
//! own output escapes the entities it produced.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FormatError, Result};
use crate::linkify::UrlMatcher;

/// Declared content type of user-authored text
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentType {
    Plain,
    Html,
    ExtendedMarkup,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Plain => "text/plain",
            ContentType::Html => "text/html",
            ContentType::ExtendedMarkup => "text/x.markdown",
        }
    }
}

impl FromStr for ContentType {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text/plain" => Ok(ContentType::Plain),
            "text/html" => Ok(ContentType::Html),
            "text/x.markdown" | "text/markdown" => Ok(ContentType::ExtendedMarkup),
            _ => {
                log::warn!("rejecting unsupported content type {:?}", s);
                Err(FormatError::UnsupportedContentType(s.to_string()))
            }
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strips disallowed tags and attributes from HTML.
///
/// The sanitizer itself lives outside this crate.
pub trait HtmlFilter {
    fn filter(&self, html: &str) -> String;
}

impl<F> HtmlFilter for F
where
    F: Fn(&str) -> String,
{
    fn filter(&self, html: &str) -> String {
        self(html)
    }
}

/// Escape `text` for the given content type.
pub fn escape(text: &str, content_type: ContentType, filter: &dyn HtmlFilter) -> String {
    match content_type {
        ContentType::Html | ContentType::ExtendedMarkup => filter.filter(text),
        ContentType::Plain => escape_plain(text),
    }
}

/// Like [`escape`], parsing the content type tag first.
pub fn escape_as(text: &str, content_type: &str, filter: &dyn HtmlFilter) -> Result<String> {
    let content_type = content_type.parse::<ContentType>()?;
    Ok(escape(text, content_type, filter))
}

/// HTML-escape plain text, leaving URLs as written.
pub fn escape_plain(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for link in UrlMatcher::shared().find_all(text) {
        push_escaped(&mut out, &text[cursor..link.start]);
        out.push_str(link.as_str(text));
        cursor = link.end;
    }
    push_escaped(&mut out, &text[cursor..]);
    out
}

/// `&<>"` via html-escape; `'` as the named `&apos;` rather than `&#x27;`.
fn push_escaped(out: &mut String, chunk: &str) {
    let encoded = html_escape::encode_double_quoted_attribute(chunk);
    for (i, part) in encoded.split('\'').enumerate() {
        if i > 0 {
            out.push_str("&apos;");
        }
        out.push_str(part);
    }
}
