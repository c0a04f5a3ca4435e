//! Linker - scan, dispatch, accumulate
//!
//! # Usage
//! ```
//! use std::sync::Arc;
//! use kittlink::{Directory, LinkifyConfig, Linker, Profile};
//!
//! let directory: Directory = vec![Profile::new("1", "https://home.example/users/alice", "alice")]
//!     .into_iter()
//!     .collect();
//! let linker = Linker::new(LinkifyConfig::default(), Arc::new(directory));
//!
//! let linked = linker.linkify("hey @alice see #Rust");
//! assert_eq!(linked.mentions.len(), 1);
//! assert_eq!(linked.tags[0].normalized, "rust");
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::accumulator::{Accumulator, MentionRef, TagRef};
use super::config::LinkifyConfig;
use super::handler::{Handlers, MentionEscaper, SpanContext};
use super::resolver::HandleResolver;
use super::safe_mention::split_safe;
use super::scanner::TokenScanner;

/// Result of a linkify pass
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Linked {
    pub text: String,
    /// Distinct resolved mentions, in discovery order
    pub mentions: Vec<MentionRef>,
    /// Distinct hashtags by normalized form, in discovery order
    pub tags: Vec<TagRef>,
}

/// Linkification engine bound to a configuration and a handle resolver.
///
/// Holds no per-call state; one `Linker` can serve concurrent callers.
pub struct Linker {
    config: LinkifyConfig,
    resolver: Arc<dyn HandleResolver>,
    handlers: Handlers,
    scanner: TokenScanner,
}

impl Linker {
    pub fn new(config: LinkifyConfig, resolver: Arc<dyn HandleResolver>) -> Self {
        Self {
            handlers: Handlers::linking(resolver.clone()),
            config,
            resolver,
            scanner: TokenScanner::new(),
        }
    }

    /// Replace the per-class handlers
    pub fn with_handlers(mut self, handlers: Handlers) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn config(&self) -> &LinkifyConfig {
        &self.config
    }

    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    /// Rewrite mentions, hashtags and URLs into markup and collect what was found.
    pub fn linkify(&self, text: &str) -> Linked {
        let mut acc = Accumulator::new();
        let mut out = String::with_capacity(text.len());

        if self.config.safe_mention && TokenScanner::has_mention(text) {
            let split = split_safe(text);
            // mentions after the leading run stay plain text
            let rest_config = LinkifyConfig {
                mention: false,
                ..self.config.clone()
            };
            self.render(split.prefix, &self.config, &self.handlers, &mut acc, &mut out);
            self.render(split.rest, &rest_config, &self.handlers, &mut acc, &mut out);
        } else {
            self.render(text, &self.config, &self.handlers, &mut acc, &mut out);
        }

        let (mentions, tags) = acc.into_parts();
        Linked {
            text: out,
            mentions,
            tags,
        }
    }

    /// Backslash-escape markdown characters inside resolved mentions.
    ///
    /// Only mentions are touched; hashtags and URLs pass through, and nothing
    /// is recorded.
    pub fn mentions_escape(&self, text: &str) -> String {
        let config = LinkifyConfig {
            mention: true,
            hashtag: false,
            url: false,
            safe_mention: false,
            ..self.config.clone()
        };
        let handlers = Handlers::verbatim().with_mention(Arc::new(MentionEscaper::new(self.resolver.clone())));

        let mut acc = Accumulator::new();
        let mut out = String::with_capacity(text.len());
        self.render(text, &config, &handlers, &mut acc, &mut out);
        out
    }

    fn render(
        &self,
        segment: &str,
        config: &LinkifyConfig,
        handlers: &Handlers,
        acc: &mut Accumulator,
        out: &mut String,
    ) {
        for span in self.scanner.scan(segment) {
            let ctx = SpanContext {
                span,
                matched: span.text(segment),
                buffer: segment,
            };
            let replacement = handlers.for_kind(span.kind, config).apply(&ctx, config, acc);
            out.push_str(&replacement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkify::resolver::{NoDirectory, Profile};

    #[test]
    fn test_empty_input() {
        let linker = Linker::new(LinkifyConfig::default(), Arc::new(NoDirectory));
        let linked = linker.linkify("");
        assert_eq!(linked.text, "");
        assert!(linked.mentions.is_empty());
        assert!(linked.tags.is_empty());
    }

    #[test]
    fn test_unresolved_mention_unchanged() {
        let linker = Linker::new(LinkifyConfig::default(), Arc::new(NoDirectory));
        let linked = linker.linkify("hello @ghost");
        assert_eq!(linked.text, "hello @ghost");
        assert!(linked.mentions.is_empty());
    }

    #[test]
    fn test_safe_mode_without_mentions_renders_like_default() {
        let text = "no pings, just #rust and example.com";
        let safe = Linker::new(LinkifyConfig::safe(), Arc::new(NoDirectory)).linkify(text);
        let normal = Linker::new(LinkifyConfig::default(), Arc::new(NoDirectory)).linkify(text);
        assert_eq!(safe, normal);
        assert_eq!(safe.tags.len(), 1);
    }

    #[test]
    fn test_closure_resolver_plugs_in() {
        let resolver = |handle: &str| {
            (handle == "alice").then(|| Profile::new("1", "https://home.example/users/alice", "alice"))
        };
        let linker = Linker::new(LinkifyConfig::default(), Arc::new(resolver));
        let linked = linker.linkify("@alice @bob");
        assert_eq!(linked.mentions.len(), 1);
        assert!(linked.text.ends_with(" @bob"));
    }
}
