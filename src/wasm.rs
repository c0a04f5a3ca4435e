//! JS bindings
//!
//! ```javascript,ignore
//! import init, { TextFormatter, truncate } from 'kittlink';
//!
//! await init();
//! const fmt = new TextFormatter(
//!   { base_url: 'https://home.example', safe_mention: true },
//!   [{ id: '1', url: 'https://home.example/users/alice', nickname: 'alice' }]
//! );
//! const { text, mentions, tags } = fmt.linkify('@alice hello #Rust');
//! const safe = fmt.escape(text, 'text/html', (html) => sanitize(html));
//! truncate(safe, 200, '...');
//! setLogLevel('trace');
//! ```
//!
//! Core `log` records are forwarded to the browser console once the module
//! starts; the default level is `warn`.

use std::str::FromStr;
use std::sync::Arc;
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

use crate::error::FormatError;
use crate::escape::{escape_as, HtmlFilter};
use crate::linkify::{Directory, LinkifyConfig, Linker, Profile};
use crate::truncate::{truncate, DEFAULT_OMISSION};

#[wasm_bindgen]
pub struct TextFormatter {
    linker: Linker,
}

#[wasm_bindgen]
impl TextFormatter {
    /// # Arguments
    /// * `config` - Optional linkify config object
    /// * `profiles` - Optional array of `{ id, url, nickname }` used to resolve mentions
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, profiles: JsValue) -> Result<TextFormatter, JsValue> {
        let config: LinkifyConfig = if config.is_null() || config.is_undefined() {
            LinkifyConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| invalid(e.to_string()))?
        };

        let profiles: Vec<Profile> = if profiles.is_null() || profiles.is_undefined() {
            Vec::new()
        } else {
            serde_wasm_bindgen::from_value(profiles).map_err(|e| invalid(e.to_string()))?
        };
        let directory: Directory = profiles.into_iter().collect();

        web_sys::console::log_1(
            &format!("[TextFormatter] ready ({} profiles)", directory.len()).into(),
        );

        Ok(TextFormatter {
            linker: Linker::new(config, Arc::new(directory)),
        })
    }

    /// Returns `{ text, mentions, tags }`
    #[wasm_bindgen]
    pub fn linkify(&self, text: &str) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.linker.linkify(text))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = mentionsEscape)]
    pub fn mentions_escape(&self, text: &str) -> String {
        self.linker.mentions_escape(text)
    }

    /// Escape for a content type; `filter` is the HTML sanitizer callback.
    #[wasm_bindgen]
    pub fn escape(&self, text: &str, content_type: &str, filter: &js_sys::Function) -> Result<String, JsValue> {
        escape_as(text, content_type, &JsHtmlFilter(filter))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[wasm_bindgen(js_name = truncate)]
pub fn js_truncate(text: &str, max_length: usize, omission: Option<String>) -> String {
    truncate(text, max_length, omission.as_deref().unwrap_or(DEFAULT_OMISSION))
}

/// Change how much of the core's logging reaches the console
/// (`off`, `error`, `warn`, `info`, `debug`, `trace`).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = parse_level(level).map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::set_max_level(filter);
    Ok(())
}

fn parse_level(level: &str) -> crate::error::Result<LevelFilter> {
    LevelFilter::from_str(level.trim())
        .map_err(|_| FormatError::InvalidConfig(format!("unknown log level {:?}", level)))
}

/// `log` backend writing to `web_sys::console`
struct ConsoleLogger;

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Later calls leave the first logger in place.
pub fn init_console_logger(level: LevelFilter) {
    if log::set_logger(&CONSOLE_LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn invalid(msg: String) -> JsValue {
    JsValue::from_str(&FormatError::InvalidConfig(msg).to_string())
}

/// Sanitizer supplied from JS
struct JsHtmlFilter<'a>(&'a js_sys::Function);

impl HtmlFilter for JsHtmlFilter<'_> {
    fn filter(&self, html: &str) -> String {
        match self.0.call1(&JsValue::NULL, &JsValue::from_str(html)) {
            Ok(value) => match value.as_string() {
                Some(filtered) => filtered,
                None => {
                    web_sys::console::error_1(&"[TextFormatter] filter returned a non-string".into());
                    html_escape::encode_text(html).into_owned()
                }
            },
            Err(e) => {
                web_sys::console::error_1(&format!("[TextFormatter] filter failed: {:?}", e).into());
                html_escape::encode_text(html).into_owned()
            }
        }
    }
}
