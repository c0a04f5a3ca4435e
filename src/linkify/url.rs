//! UrlMatcher - recognition of link-like spans
//!
//! Three shapes are recognized, all anchored at a token start:
//! - Scheme URLs with a known hierarchical scheme: `https://host/path`, `ftp://...`
//! - Opaque URIs with a known scheme: `mailto:a@b.test`, `xmpp:...`, `magnet:?...`
//! - Bare domains: `example.com/path`, validated against a TLD table
//!
//! Recognition only marks candidate spans. Nothing here validates that a
//! link resolves.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Schemes accepted in `scheme://...` form. Anything else (`javascript://`,
/// `data://`, ...) is plain text.
const HIERARCHICAL_SCHEMES: &str = "https?|ftps?|sftp|wss?|gemini|gopher|irc[s6]?|git|svn|ssh|rtsp|rtmp|\
    mms|nntp|ipfs|ipns|dat|dweb|hyper|ssb|finger|telnet|webcal|feed|spotify|steam|apt";

/// Schemes accepted in `scheme:opaque` form (no `//`).
const OPAQUE_SCHEMES: &str = "mailto|xmpp|magnet|tel|sms|geo|gemini|gopher|matrix|news|bitcoin|ipfs|ipns|dat|dweb";

const GENERIC_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "mil", "int", "info", "biz", "name", "pro", "mobi",
    "aero", "asia", "cat", "coop", "jobs", "museum", "tel", "travel", "app", "dev", "page",
    "blog", "cafe", "club", "cloud", "email", "games", "garden", "host", "lgbt", "link",
    "live", "moe", "network", "news", "one", "online", "onion", "party", "site", "social",
    "space", "systems", "tech", "today", "top", "town", "website", "wiki", "world", "xyz",
    "zone",
];

const COUNTRY_TLDS: &str = "ac ad ae af ag ai al am ao aq ar as at au aw ax az ba bb bd be bf bg bh bi bj \
    bm bn bo br bs bt bw by bz ca cc cd cf cg ch ci ck cl cm cn co cr cu cv cw cx cy cz de dj dk dm do dz \
    ec ee eg er es et eu fi fj fk fm fo fr ga gd ge gf gg gh gi gl gm gn gp gq gr gs gt gu gw gy hk hm hn \
    hr ht hu id ie il im in io iq ir is it je jm jo jp ke kg kh ki km kn kp kr kw ky kz la lb lc li lk lr \
    ls lt lu lv ly ma mc md me mg mh mk ml mm mn mo mp mq mr ms mt mu mv mw mx my mz na nc ne nf ng ni nl \
    no np nr nu nz om pa pe pf pg ph pk pl pm pn pr ps pt pw py qa re ro rs ru rw sa sb sc sd se sg sh si \
    sk sl sm sn so sr ss st su sv sx sy sz tc td tf tg th tj tk tl tm tn to tr tt tv tw tz ua ug uk us uy \
    uz va vc ve vg vi vn vu wf ws ye yt za zm zw";

static SHARED: OnceLock<UrlMatcher> = OnceLock::new();

/// Which URL shape matched
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlForm {
    /// `scheme://...`
    Scheme,
    /// `scheme:opaque` with a known scheme
    Opaque,
    /// `domain.tld[/path]` without a scheme
    Bare,
}

/// A recognized URL starting at a given offset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UrlMatch {
    pub start: usize,
    pub end: usize,
    pub form: UrlForm,
}

impl UrlMatch {
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    /// The href a rendered anchor should point to.
    ///
    /// Bare domains get an `http://` prefix; everything else is used as-is.
    pub fn href(&self, text: &str) -> String {
        match self.form {
            UrlForm::Bare => format!("http://{}", self.as_str(text)),
            UrlForm::Scheme | UrlForm::Opaque => self.as_str(text).to_string(),
        }
    }
}

/// Compiled URL recognizer
pub struct UrlMatcher {
    scheme_re: Regex,
    opaque_re: Regex,
    bare_re: Regex,
    tlds: HashSet<&'static str>,
}

impl UrlMatcher {
    pub fn new() -> Self {
        // known-scheme://anything-up-to-whitespace-or-markup
        let scheme_re = Regex::new(&format!(r#"^(?i)(?:{})://[^\s<>"]+"#, HIERARCHICAL_SCHEMES))
            .expect("scheme url pattern compiles");

        let opaque_re = Regex::new(&format!(r#"^(?i)(?:{}):[^\s<>"]+"#, OPAQUE_SCHEMES))
            .expect("opaque uri pattern compiles");

        // Group 1: tld. Port and path are optional.
        let bare_re = Regex::new(
            r#"^(?i)(?:[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?\.)+([a-z]{2,63})(?::[0-9]{1,5})?(?:[/?#][^\s<>"]*)?"#,
        )
        .expect("bare domain pattern compiles");

        let mut tlds: HashSet<&'static str> = GENERIC_TLDS.iter().copied().collect();
        tlds.extend(COUNTRY_TLDS.split_whitespace());

        Self {
            scheme_re,
            opaque_re,
            bare_re,
            tlds,
        }
    }

    /// Process-wide matcher, compiled on first use.
    pub fn shared() -> &'static UrlMatcher {
        SHARED.get_or_init(UrlMatcher::new)
    }

    /// Try to match a URL beginning exactly at byte offset `pos`.
    ///
    /// `pos` must lie on a char boundary. A URL never starts in the middle of a
    /// word, so the preceding character is checked first.
    pub fn match_at(&self, text: &str, pos: usize) -> Option<UrlMatch> {
        let rest = &text[pos..];
        if !rest.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            return None;
        }
        if !starts_token(text, pos) {
            return None;
        }

        let (len, form) = if let Some(m) = self.scheme_re.find(rest) {
            (m.end(), UrlForm::Scheme)
        } else if let Some(m) = self.opaque_re.find(rest) {
            (m.end(), UrlForm::Opaque)
        } else {
            let cap = self.bare_re.captures(rest)?;
            let whole = cap.get(0)?;
            let tld = cap.get(1)?.as_str().to_ascii_lowercase();
            if !self.tlds.contains(tld.as_str()) {
                return None;
            }
            // `example.com2` or `user.name@host` are not bare domains
            if rest[whole.end()..]
                .starts_with(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '@'))
            {
                return None;
            }
            (whole.end(), UrlForm::Bare)
        };

        let trimmed = trim_trailing(&rest[..len]);
        if trimmed.is_empty() {
            return None;
        }
        // scheme URLs reduced to bare `http://` by trimming are not links
        if form == UrlForm::Scheme && trimmed.ends_with("://") {
            return None;
        }

        Some(UrlMatch {
            start: pos,
            end: pos + trimmed.len(),
            form,
        })
    }

    /// All URLs in `text`, left to right, non-overlapping.
    pub fn find_all(&self, text: &str) -> Vec<UrlMatch> {
        let mut found = Vec::new();
        let mut resume = 0;
        for (pos, _) in text.char_indices() {
            if pos < resume {
                continue;
            }
            if let Some(m) = self.match_at(text, pos) {
                resume = m.end;
                found.push(m);
            }
        }
        found
    }
}

impl Default for UrlMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// True when a URL may begin at `pos`: start of text, or after a character
/// that cannot be part of a word, host name, or path.
fn starts_token(text: &str, pos: usize) -> bool {
    match text[..pos].chars().next_back() {
        None => true,
        Some(prev) => {
            !(prev.is_alphanumeric()
                || matches!(prev, '.' | '-' | '_' | '@' | '/' | ':' | '#' | '%' | '+' | '&' | '=' | '~'))
        }
    }
}

/// Drop sentence punctuation after a URL, and a closing paren that has no
/// opening partner inside the URL.
fn trim_trailing(url: &str) -> &str {
    // only `)` and punctuation are ever dropped, so the open count is fixed
    let opens = url.matches('(').count();
    let mut closes = url.matches(')').count();
    let mut end = url.len();
    loop {
        let candidate = &url[..end];
        let Some(last) = candidate.chars().next_back() else {
            return candidate;
        };
        let drop = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '\'' | '*' => true,
            ')' if opens < closes => {
                closes -= 1;
                true
            }
            _ => false,
        };
        if !drop {
            return candidate;
        }
        end -= last.len_utf8();
    }
}
