//! Single-step access: resolve one raw segment against the current value.

use crate::error::{LookupError, Result};
use crate::segment::{IndexSyntax, Segment};
use crate::value::{deref, Value};

/// Resolve one raw segment (`key` or `key[N]`) against `current`.
///
/// `current` is `None` when the previous step ended on an absent value.
/// Optional wrappers are transparent: they are stripped before the key is
/// matched, before the index is applied, and from the returned value. The
/// result is `Ok(None)` only when the addressed value is itself absent.
///
/// # Errors
///
/// - [`LookupError::MalformedIndex`] if the segment does not parse.
/// - [`LookupError::KeyNotFound`] if the key matches no record field or mapping
///   entry, if `current` is absent or not addressable by key, or if the index is
///   out of bounds.
/// - [`LookupError::InvalidIndexUsage`] if an index is applied to something
///   other than a sequence.
pub fn step<'a>(
    current: Option<&'a Value>,
    raw: &str,
    syntax: IndexSyntax,
) -> Result<Option<&'a Value>> {
    let segment = Segment::parse_with(raw, syntax)?;

    let located = match current.and_then(deref) {
        Some(Value::Record(record)) => record.field(segment.key),
        Some(mapping @ Value::Mapping(_)) => mapping.get_key(segment.key),
        _ => None,
    }
    .ok_or_else(|| LookupError::not_found(raw))?;

    let selected = match segment.index {
        None => located,
        Some(index) => select(located, index, raw)?,
    };

    Ok(deref(selected))
}

fn select<'a>(located: &'a Value, index: usize, raw: &str) -> Result<&'a Value> {
    match deref(located) {
        Some(Value::Sequence(items)) => items.get(index).ok_or_else(|| LookupError::not_found(raw)),
        Some(_) => Err(LookupError::InvalidIndexUsage {
            key: raw.to_owned(),
        }),
        None => Err(LookupError::not_found(raw)),
    }
}
