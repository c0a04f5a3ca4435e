//! KittLink: Mention/Hashtag/URL linkification, escaping and truncation
//!
//! A Rust/WASM implementation of the KittClouds post formatting pipeline.
//!
//! # Architecture
//!
//! ## Linkify Components
//! - `scanner.rs` - TokenScanner: left-to-right span classification (hashtag, mention, URL, plain)
//! - `url.rs` - UrlMatcher: scheme URLs, opaque URIs, TLD-checked bare domains
//! - `handler.rs` - SpanHandler implementations and the per-class `Handlers` registry
//! - `accumulator.rs` - Distinct mentions and normalized hashtags in discovery order
//! - `safe_mention.rs` - Leading-mention splitter for safe mode
//! - `linker.rs` - Linker: the `linkify` / `mentions_escape` entry points
//! - `resolver.rs` - HandleResolver seam, `Profile`, in-memory `Directory`
//! - `config.rs` - Configuration types and defaults
//!
//! ## Text Utilities
//! - `escape` - Content-type dispatch (`text/plain`, `text/html`, `text/x.markdown`)
//! - `truncate.rs` - Grapheme-aware truncation with an omission marker
//!
//! # Usage (Rust)
//! ```
//! use std::sync::Arc;
//! use kittlink::{escape_plain, truncate, LinkifyConfig, Linker, NoDirectory};
//!
//! let linker = Linker::new(LinkifyConfig::default(), Arc::new(NoDirectory));
//! let linked = linker.linkify("#Rust at example.com");
//! assert_eq!(linked.tags[0].normalized, "rust");
//!
//! assert_eq!(escape_plain("<b>"), "&lt;b&gt;");
//! assert_eq!(truncate("hello world", 8, "..."), "hello...");
//! ```

pub mod error;
pub mod escape;
pub mod linkify;
pub mod truncate;
pub mod wasm;

pub use error::FormatError;
pub use escape::*;
pub use linkify::*;
pub use truncate::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook and console logging for the browser
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    wasm::init_console_logger(log::LevelFilter::Warn);
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("kittlink v{}", env!("CARGO_PKG_VERSION"))
}
