//! Per-class span handlers
//!
//! Each scanned span is handed to the handler registered for its class. A
//! handler returns the replacement text and may record into the accumulator.
//! [`Verbatim`] is the pass-through used for plain text and disabled classes:
//! it returns the matched text unchanged and never touches the accumulator.

use std::sync::Arc;

use super::accumulator::Accumulator;
use super::config::{LinkifyConfig, MentionFormat};
use super::resolver::{HandleResolver, Profile};
use super::span::{Span, SpanKind};
use super::url::UrlMatcher;

/// What a handler sees for one span
#[derive(Clone, Copy, Debug)]
pub struct SpanContext<'a> {
    pub span: Span,
    /// Text covered by the span
    pub matched: &'a str,
    /// The whole segment being scanned
    pub buffer: &'a str,
}

/// Rewrites one span. Implementations must be pure apart from `acc`.
pub trait SpanHandler: Send + Sync {
    fn apply(&self, ctx: &SpanContext<'_>, config: &LinkifyConfig, acc: &mut Accumulator) -> String;
}

/// Returns the span text unchanged
#[derive(Clone, Copy, Debug, Default)]
pub struct Verbatim;

impl SpanHandler for Verbatim {
    fn apply(&self, ctx: &SpanContext<'_>, _config: &LinkifyConfig, _acc: &mut Accumulator) -> String {
        ctx.matched.to_string()
    }
}

// ==================== MENTIONS ====================

/// Resolves `@handle` and renders an h-card link
pub struct MentionLinker {
    resolver: Arc<dyn HandleResolver>,
}

impl MentionLinker {
    pub fn new(resolver: Arc<dyn HandleResolver>) -> Self {
        Self { resolver }
    }
}

impl SpanHandler for MentionLinker {
    fn apply(&self, ctx: &SpanContext<'_>, config: &LinkifyConfig, acc: &mut Accumulator) -> String {
        let Some(profile) = resolve_mention(self.resolver.as_ref(), ctx.matched) else {
            return ctx.matched.to_string();
        };

        let html = render_mention(&profile, config.mention_format);
        acc.add_mention(ctx.matched, profile);
        html
    }
}

/// Backslash-escapes markdown control characters in resolved mentions so a
/// markdown renderer keeps them literal. Records nothing.
pub struct MentionEscaper {
    resolver: Arc<dyn HandleResolver>,
}

impl MentionEscaper {
    pub fn new(resolver: Arc<dyn HandleResolver>) -> Self {
        Self { resolver }
    }
}

impl SpanHandler for MentionEscaper {
    fn apply(&self, ctx: &SpanContext<'_>, _config: &LinkifyConfig, _acc: &mut Accumulator) -> String {
        match resolve_mention(self.resolver.as_ref(), ctx.matched) {
            Some(_) => escape_markdown(ctx.matched),
            None => ctx.matched.to_string(),
        }
    }
}

fn resolve_mention(resolver: &dyn HandleResolver, mention: &str) -> Option<Profile> {
    let handle = mention.strip_prefix('@')?;
    let profile = resolver.lookup(handle);
    if profile.is_none() {
        log::debug!("mention {} did not resolve, leaving as text", mention);
    }
    profile
}

fn render_mention(profile: &Profile, format: MentionFormat) -> String {
    let nickname = match format {
        MentionFormat::Full => profile.full_nickname(),
        MentionFormat::Local => profile.local_nickname(),
    };
    format!(
        r#"<span class="h-card"><a class="u-url mention" data-user="{}" href="{}" rel="ugc">@<span>{}</span></a></span>"#,
        html_escape::encode_double_quoted_attribute(&profile.id),
        html_escape::encode_double_quoted_attribute(&profile.url),
        html_escape::encode_text(nickname),
    )
}

/// Characters a markdown renderer would treat as formatting.
fn is_markdown_control(c: char) -> bool {
    matches!(
        c,
        '`' | '*' | '_' | '{' | '}' | '[' | ']' | '(' | ')' | '#' | '+' | '-' | '.' | '!'
    )
}

pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        if is_markdown_control(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ==================== HASHTAGS ====================

/// Renders a tag-feed link and records the normalized tag
#[derive(Clone, Copy, Debug, Default)]
pub struct HashtagLinker;

impl SpanHandler for HashtagLinker {
    fn apply(&self, ctx: &SpanContext<'_>, config: &LinkifyConfig, acc: &mut Accumulator) -> String {
        let Some(name) = ctx.matched.strip_prefix('#') else {
            return ctx.matched.to_string();
        };
        let tag = name.to_lowercase();

        let html = format!(
            r#"<a class="hashtag" data-tag="{}" href="{}" rel="tag ugc">{}</a>"#,
            html_escape::encode_double_quoted_attribute(&tag),
            html_escape::encode_double_quoted_attribute(&config.tag_url(&tag)),
            html_escape::encode_text(ctx.matched),
        );
        acc.add_tag(ctx.matched, &tag);
        html
    }
}

// ==================== URLS ====================

/// Renders an anchor for a recognized URL
#[derive(Clone, Copy, Debug, Default)]
pub struct UrlLinker;

impl SpanHandler for UrlLinker {
    fn apply(&self, ctx: &SpanContext<'_>, config: &LinkifyConfig, _acc: &mut Accumulator) -> String {
        let href = UrlMatcher::shared()
            .match_at(ctx.matched, 0)
            .map(|m| m.href(ctx.matched))
            .unwrap_or_else(|| ctx.matched.to_string());

        let mut attrs = format!(r#"href="{}""#, html_escape::encode_double_quoted_attribute(&href));
        if let Some(rel) = &config.rel {
            attrs.push_str(&format!(r#" rel="{}""#, html_escape::encode_double_quoted_attribute(rel)));
        }
        if config.new_window {
            attrs.push_str(r#" target="_blank""#);
        }

        format!(
            "<a {}>{}</a>",
            attrs,
            html_escape::encode_text(&display_url(ctx.matched, config))
        )
    }
}

/// Visible anchor text after prefix stripping and shortening
fn display_url(url: &str, config: &LinkifyConfig) -> String {
    let mut shown = url;
    if config.strip_prefix {
        if let Some((_, rest)) = url.split_once("://") {
            shown = rest;
        }
    }
    match config.truncate {
        Some(limit) if shown.chars().count() > limit => {
            let cut: String = shown.chars().take(limit).collect();
            format!("{}...", cut)
        }
        _ => shown.to_string(),
    }
}

// ==================== REGISTRY ====================

/// One handler per span class
#[derive(Clone)]
pub struct Handlers {
    pub mention: Arc<dyn SpanHandler>,
    pub hashtag: Arc<dyn SpanHandler>,
    pub url: Arc<dyn SpanHandler>,
    pub plain: Arc<dyn SpanHandler>,
}

impl Handlers {
    /// Default linking handlers backed by `resolver`
    pub fn linking(resolver: Arc<dyn HandleResolver>) -> Self {
        Self {
            mention: Arc::new(MentionLinker::new(resolver)),
            hashtag: Arc::new(HashtagLinker),
            url: Arc::new(UrlLinker),
            plain: Arc::new(Verbatim),
        }
    }

    /// Every class passes through unchanged
    pub fn verbatim() -> Self {
        Self {
            mention: Arc::new(Verbatim),
            hashtag: Arc::new(Verbatim),
            url: Arc::new(Verbatim),
            plain: Arc::new(Verbatim),
        }
    }

    pub fn with_mention(mut self, handler: Arc<dyn SpanHandler>) -> Self {
        self.mention = handler;
        self
    }

    pub fn with_hashtag(mut self, handler: Arc<dyn SpanHandler>) -> Self {
        self.hashtag = handler;
        self
    }

    pub fn with_url(mut self, handler: Arc<dyn SpanHandler>) -> Self {
        self.url = handler;
        self
    }

    /// Handler for `kind`, or the plain handler when the class is disabled
    pub fn for_kind(&self, kind: SpanKind, config: &LinkifyConfig) -> &dyn SpanHandler {
        match kind {
            SpanKind::Mention if config.mention => self.mention.as_ref(),
            SpanKind::Hashtag if config.hashtag => self.hashtag.as_ref(),
            SpanKind::Url if config.url => self.url.as_ref(),
            _ => self.plain.as_ref(),
        }
    }
}
