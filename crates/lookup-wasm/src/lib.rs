//! WASM bindings for lookup-core.
//!
//! Exposes `lookup` and `lookupSegments` as `#[wasm_bindgen]` functions that
//! take a JSON document as a string and return the resolved value as a compact
//! JSON string.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p lookup-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/lookup-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/lookup_wasm.wasm
//! ```

use lookup_core::{Resolved, Value};
use wasm_bindgen::prelude::*;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_document(json: &str) -> Result<Value, JsValue> {
    let document: serde_json::Value = serde_json::from_str(json).map_err(to_js_error)?;
    Ok(Value::from(document))
}

fn render(resolved: &Resolved<'_>) -> Result<String, JsValue> {
    serde_json::to_string(resolved).map_err(to_js_error)
}

/// Resolve a dotted path (e.g. `"items.name"` or `"items[0].name"`) against a
/// JSON document.
///
/// Returns the result as a JSON string, or throws a JS error if the document is
/// not valid JSON or the path does not resolve.
#[wasm_bindgen]
pub fn lookup(json: &str, path: &str) -> Result<String, JsValue> {
    let root = parse_document(json)?;
    let resolved = lookup_core::lookup_str(&root, path).map_err(to_js_error)?;
    render(&resolved)
}

/// Resolve a path given as an array of raw segments, so keys may contain `.`.
#[wasm_bindgen(js_name = lookupSegments)]
pub fn lookup_segments(json: &str, segments: Vec<String>) -> Result<String, JsValue> {
    let root = parse_document(json)?;
    let resolved = lookup_core::lookup(&root, &segments).map_err(to_js_error)?;
    render(&resolved)
}
