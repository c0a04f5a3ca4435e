//! Call-scoped collector of recognized mentions and hashtags.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::resolver::Profile;

/// A mention that resolved to a profile
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MentionRef {
    /// Mention as written, including the `@`
    pub raw: String,
    pub profile: Profile,
}

/// A hashtag occurrence
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TagRef {
    /// Tag as first written, including the `#` and original casing
    pub raw: String,
    /// Lower-cased tag without the `#`
    pub normalized: String,
}

/// Distinct mentions and tags in discovery order.
///
/// Mentions are unique by (raw text, profile id). Tags are unique by their
/// normalized form; the first occurrence keeps its casing.
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    mentions: Vec<MentionRef>,
    tags: Vec<TagRef>,
    seen_mentions: HashSet<(String, String)>,
    seen_tags: HashSet<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved mention. Returns false if it was already present.
    pub fn add_mention(&mut self, raw: &str, profile: Profile) -> bool {
        let key = (raw.to_string(), profile.id.clone());
        if !self.seen_mentions.insert(key) {
            return false;
        }
        self.mentions.push(MentionRef {
            raw: raw.to_string(),
            profile,
        });
        true
    }

    /// Record a hashtag. Returns false if its normalized form was already present.
    pub fn add_tag(&mut self, raw: &str, normalized: &str) -> bool {
        if !self.seen_tags.insert(normalized.to_string()) {
            return false;
        }
        self.tags.push(TagRef {
            raw: raw.to_string(),
            normalized: normalized.to_string(),
        });
        true
    }

    pub fn mentions(&self) -> &[MentionRef] {
        &self.mentions
    }

    pub fn tags(&self) -> &[TagRef] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty() && self.tags.is_empty()
    }

    pub fn into_parts(self) -> (Vec<MentionRef>, Vec<TagRef>) {
        (self.mentions, self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Profile {
        Profile::new("1", "https://home.example/users/alice", "alice")
    }

    #[test]
    fn test_duplicate_mention_ignored() {
        let mut acc = Accumulator::new();
        assert!(acc.add_mention("@alice", alice()));
        assert!(!acc.add_mention("@alice", alice()));
        assert_eq!(acc.mentions().len(), 1);
    }

    #[test]
    fn test_tag_first_casing_wins() {
        let mut acc = Accumulator::new();
        assert!(acc.add_tag("#Foo", "foo"));
        assert!(!acc.add_tag("#foo", "foo"));

        assert_eq!(
            acc.tags(),
            &[TagRef {
                raw: "#Foo".to_string(),
                normalized: "foo".to_string()
            }]
        );
    }

    #[test]
    fn test_discovery_order_preserved() {
        let mut acc = Accumulator::new();
        acc.add_tag("#b", "b");
        acc.add_tag("#a", "a");
        let (_, tags) = acc.into_parts();
        let order: Vec<_> = tags.iter().map(|t| t.normalized.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }
}
