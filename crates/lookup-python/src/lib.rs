//! # lookup-python
//!
//! Python bindings for lookup-core, built with PyO3.
//!
//! Exposes the following functions to Python as the `lookup_path` module:
//!
//! - `lookup(json, path)` -- resolve a dotted path, returning a JSON string
//! - `lookup_segments(json, segments)` -- resolve a list of raw segments
//! - `parse_segment(segment)` -- split `key[N]` into `(key, index)`

use lookup_core::{LookupError, Resolved, Segment, Value};
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

/// `KeyNotFound` maps to `KeyError`; malformed paths and bad index usage to
/// `ValueError`.
fn to_py_err(err: LookupError) -> PyErr {
    match err {
        LookupError::KeyNotFound { .. } => PyKeyError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn parse_document(json: &str) -> PyResult<Value> {
    let document: serde_json::Value =
        serde_json::from_str(json).map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(Value::from(document))
}

fn render(resolved: &Resolved<'_>) -> PyResult<String> {
    serde_json::to_string(resolved).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Resolve a dotted path against a JSON document.
///
/// Args:
///     json: A valid JSON string.
///     path: A path such as `"items.name"` or `"items[0].name"`.
///
/// Returns:
///     The resolved value as a JSON string. Paths that fan out over a list
///     return a JSON array.
///
/// Raises:
///     KeyError: If the path does not resolve.
///     ValueError: If the JSON is invalid or the path is malformed.
#[pyfunction]
fn lookup(json: &str, path: &str) -> PyResult<String> {
    let root = parse_document(json)?;
    let resolved = lookup_core::lookup_str(&root, path).map_err(to_py_err)?;
    render(&resolved)
}

/// Resolve a path given as a list of raw segments, so keys may contain `.`.
///
/// Args:
///     json: A valid JSON string.
///     segments: Path segments, each `key` or `key[N]`.
///
/// Returns:
///     The resolved value as a JSON string.
///
/// Raises:
///     KeyError: If the path does not resolve.
///     ValueError: If the JSON is invalid or a segment is malformed.
#[pyfunction]
fn lookup_segments(json: &str, segments: Vec<String>) -> PyResult<String> {
    let root = parse_document(json)?;
    let resolved = lookup_core::lookup(&root, &segments).map_err(to_py_err)?;
    render(&resolved)
}

/// Split one segment into its key and optional index.
///
/// Raises:
///     ValueError: If the segment's index is malformed.
#[pyfunction]
fn parse_segment(segment: &str) -> PyResult<(String, Option<usize>)> {
    let parsed = Segment::parse(segment).map_err(to_py_err)?;
    Ok((parsed.key.to_string(), parsed.index))
}

/// The `lookup_path` Python module, implemented in Rust via PyO3.
#[pymodule]
fn lookup_path(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(lookup, m)?)?;
    m.add_function(wrap_pyfunction!(lookup_segments, m)?)?;
    m.add_function(wrap_pyfunction!(parse_segment, m)?)?;
    Ok(())
}
