//! Handle resolution seam
//!
//! The user directory lives outside this crate. Callers plug it in through
//! [`HandleResolver`]; a miss (or a lookup that could not answer in time) is
//! simply `None` and the mention passes through untouched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolved profile of a mentionable account
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Profile {
    /// Stable identifier, rendered into `data-user`
    pub id: String,
    /// Canonical profile URL
    pub url: String,
    /// Full nickname: `alice` for local accounts, `bob@remote.example` for remote ones
    pub nickname: String,
}

impl Profile {
    pub fn new(id: impl Into<String>, url: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            nickname: nickname.into(),
        }
    }

    pub fn full_nickname(&self) -> &str {
        &self.nickname
    }

    /// Nickname without the `@domain` part.
    pub fn local_nickname(&self) -> &str {
        self.nickname
            .split_once('@')
            .map(|(local, _)| local)
            .unwrap_or(&self.nickname)
    }
}

/// Maps a handle (mention text without the leading `@`) to a profile.
///
/// Implementations may cache or call out to storage, but must answer
/// synchronously and treat "no answer" as `None`.
pub trait HandleResolver: Send + Sync {
    fn lookup(&self, handle: &str) -> Option<Profile>;
}

impl<F> HandleResolver for F
where
    F: Fn(&str) -> Option<Profile> + Send + Sync,
{
    fn lookup(&self, handle: &str) -> Option<Profile> {
        self(handle)
    }
}

/// Resolver that never finds anyone
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDirectory;

impl HandleResolver for NoDirectory {
    fn lookup(&self, _handle: &str) -> Option<Profile> {
        None
    }
}

/// In-memory directory keyed by nickname.
///
/// Lookups are case-insensitive on the ASCII range, matching how handles are
/// typed in practice.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    by_nickname: HashMap<String, Profile>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, profile: Profile) {
        self.by_nickname
            .insert(profile.nickname.to_ascii_lowercase(), profile);
    }

    pub fn len(&self) -> usize {
        self.by_nickname.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_nickname.is_empty()
    }
}

impl FromIterator<Profile> for Directory {
    fn from_iter<I: IntoIterator<Item = Profile>>(iter: I) -> Self {
        let mut directory = Directory::new();
        for profile in iter {
            directory.insert(profile);
        }
        directory
    }
}

impl HandleResolver for Directory {
    fn lookup(&self, handle: &str) -> Option<Profile> {
        self.by_nickname.get(&handle.to_ascii_lowercase()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_nickname_strips_domain() {
        let remote = Profile::new("2", "https://remote.example/users/bob", "bob@remote.example");
        assert_eq!(remote.local_nickname(), "bob");
        assert_eq!(remote.full_nickname(), "bob@remote.example");

        let local = Profile::new("1", "https://home.example/users/alice", "alice");
        assert_eq!(local.local_nickname(), "alice");
    }

    #[test]
    fn test_directory_lookup_case_insensitive() {
        let directory: Directory = vec![Profile::new("1", "https://home.example/users/alice", "alice")]
            .into_iter()
            .collect();

        assert_eq!(directory.lookup("Alice").map(|p| p.id), Some("1".to_string()));
        assert!(directory.lookup("carol").is_none());
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |handle: &str| {
            (handle == "alice").then(|| Profile::new("1", "https://home.example/users/alice", "alice"))
        };
        assert!(resolver.lookup("alice").is_some());
        assert!(resolver.lookup("bob").is_none());
    }
}
