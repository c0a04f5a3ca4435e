pub mod accumulator;
pub mod config;
pub mod handler;
pub mod linker;
pub mod resolver;
pub mod safe_mention;
pub mod scanner;
pub mod span;
pub mod url;

pub use accumulator::*;
pub use config::*;
pub use handler::*;
pub use linker::*;
pub use resolver::*;
pub use safe_mention::*;
pub use scanner::*;
pub use span::*;
pub use url::{UrlForm, UrlMatch, UrlMatcher};

use std::sync::Arc;

/// One-shot linkify with the default handlers.
pub fn linkify(text: &str, config: &LinkifyConfig, resolver: Arc<dyn HandleResolver>) -> Linked {
    Linker::new(config.clone(), resolver).linkify(text)
}

/// One-shot mention escaping for text headed to a markdown renderer.
pub fn mentions_escape(text: &str, config: &LinkifyConfig, resolver: Arc<dyn HandleResolver>) -> String {
    Linker::new(config.clone(), resolver).mentions_escape(text)
}

#[cfg(test)]
mod tests;
