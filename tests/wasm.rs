//! Browser smoke tests for the JS surface. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use kittlink::wasm::{init_console_logger, js_truncate, set_log_level, TextFormatter};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn formatter_without_config_or_profiles() {
    let fmt = TextFormatter::new(JsValue::NULL, JsValue::UNDEFINED).unwrap();
    assert_eq!(fmt.mentions_escape("@nobody_here"), "@nobody_here");
}

#[wasm_bindgen_test]
fn escape_rejects_unknown_content_type() {
    let fmt = TextFormatter::new(JsValue::NULL, JsValue::NULL).unwrap();
    let identity = js_sys::Function::new_with_args("html", "return html;");
    assert!(fmt.escape("<b>", "text/bbcode", &identity).is_err());
    assert_eq!(fmt.escape("<b>", "text/html", &identity).unwrap(), "<b>");
    assert_eq!(fmt.escape("<b>", "text/plain", &identity).unwrap(), "&lt;b&gt;");
}

#[wasm_bindgen_test]
fn truncate_defaults_omission() {
    assert_eq!(js_truncate("hello world", 8, None), "hello...");
}

#[wasm_bindgen_test]
fn core_logging_reaches_console() {
    init_console_logger(log::LevelFilter::Warn);
    assert!(set_log_level("trace").is_ok());
    assert_eq!(log::max_level(), log::LevelFilter::Trace);
    assert!(set_log_level("loud").is_err());

    // content type rejection logs a warning through the console logger
    assert!("text/bbcode".parse::<kittlink::ContentType>().is_err());
    assert!(set_log_level("warn").is_ok());
}
