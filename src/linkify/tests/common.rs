//! Shared fixtures for linkify scenario tests

use std::sync::Arc;

use crate::linkify::{Directory, HandleResolver, LinkifyConfig, Linker, Profile};

pub fn directory() -> Arc<dyn HandleResolver> {
    Arc::new(
        ["alice", "bob", "carol", "dave@remote.example"]
            .iter()
            .enumerate()
            .map(|(i, nick)| {
                Profile::new(
                    (i + 1).to_string(),
                    format!("https://home.example/users/{}", nick),
                    *nick,
                )
            })
            .collect::<Directory>(),
    )
}

pub fn linker(config: LinkifyConfig) -> Linker {
    Linker::new(config.with_base_url("https://home.example"), directory())
}

pub fn nicknames(linked: &crate::linkify::Linked) -> Vec<&str> {
    linked
        .mentions
        .iter()
        .map(|m| m.profile.nickname.as_str())
        .collect()
}
