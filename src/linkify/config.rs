//! Configuration types and defaults for linkification

use serde::{Deserialize, Serialize};

/// Which nickname form a rendered mention displays
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MentionFormat {
    /// `bob@remote.example`
    Full,
    /// `bob`
    #[default]
    Local,
}

/// Linkify configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LinkifyConfig {
    /// Link `@handle` mentions. Default: true
    #[serde(default = "default_true")]
    pub mention: bool,
    /// Link `#tag` hashtags. Default: true
    #[serde(default = "default_true")]
    pub hashtag: bool,
    /// Autolink URLs and bare domains. Default: true
    #[serde(default = "default_true")]
    pub url: bool,
    /// Only link mentions in the unbroken run at the start of the text. Default: false
    #[serde(default)]
    pub safe_mention: bool,
    /// Nickname form shown in mention links. Default: local
    #[serde(default)]
    pub mention_format: MentionFormat,
    /// Origin for hashtag feed links, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// `rel` attribute on URL anchors. Default: "ugc"
    #[serde(default = "default_rel")]
    pub rel: Option<String>,
    /// Add `target="_blank"` to URL anchors. Default: false
    #[serde(default)]
    pub new_window: bool,
    /// Hide `scheme://` in the visible text of URL anchors. Default: false
    #[serde(default)]
    pub strip_prefix: bool,
    /// Shorten the visible text of URL anchors to this many characters
    #[serde(default)]
    pub truncate: Option<usize>,
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost".to_string()
}

fn default_rel() -> Option<String> {
    Some("ugc".to_string())
}

impl Default for LinkifyConfig {
    fn default() -> Self {
        Self {
            mention: true,
            hashtag: true,
            url: true,
            safe_mention: false,
            mention_format: MentionFormat::Local,
            base_url: default_base_url(),
            rel: default_rel(),
            new_window: false,
            strip_prefix: false,
            truncate: None,
        }
    }
}

impl LinkifyConfig {
    /// Link only the leading run of mentions
    pub fn safe() -> Self {
        Self {
            safe_mention: true,
            ..Self::default()
        }
    }

    /// URLs only; mentions and hashtags stay plain text
    pub fn plain_urls() -> Self {
        Self {
            mention: false,
            hashtag: false,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Feed URL for a normalized tag
    pub fn tag_url(&self, tag: &str) -> String {
        format!("{}/tag/{}", self.base_url.trim_end_matches('/'), tag)
    }
}
