//! Path traversal with implicit fan-out over sequences.
//!
//! A lookup walks the path one segment at a time. When a segment fails to
//! resolve and the value held before that segment is a sequence, the rest of
//! the path (including the failing segment) is looked up in **every** element,
//! and the per-element results are merged:
//!
//! 1. Absent results are dropped. If nothing is left, the lookup finds nothing.
//! 2. If the first remaining result is a sequence or mapping, every result is
//!    spread into the output (flattening one level).
//! 3. Otherwise each result becomes one output element.
//!
//! The first element that fails aborts the whole fan-out with its error.
//! Fan-out is always the terminal step of a traversal.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use tracing::trace;

use crate::access::step;
use crate::error::{LookupError, Result};
use crate::path::{Path, SEPARATOR};
use crate::segment::IndexSyntax;
use crate::value::{deref, Value};

/// Configuration for a [`Resolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    /// Separator used by [`Resolver::lookup_str`] to split a path.
    pub separator: char,
    /// Treatment of text after an index selector's closing bracket.
    pub index_syntax: IndexSyntax,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            separator: SEPARATOR,
            index_syntax: IndexSyntax::Strict,
        }
    }
}

/// The outcome of a successful lookup.
///
/// Results borrow from the value that was searched. A fan-out allocates the
/// [`Resolved::Merged`] container, which is owned by the result.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    /// The path addressed one value directly.
    Single(&'a Value),
    /// The path fanned out over a sequence; results in element order.
    Merged(Vec<Resolved<'a>>),
}

impl<'a> Resolved<'a> {
    /// The directly addressed value, or `None` for a merged result.
    pub fn as_single(&self) -> Option<&'a Value> {
        match self {
            Resolved::Single(value) => Some(*value),
            Resolved::Merged(_) => None,
        }
    }

    /// The merged elements, or `None` for a single result.
    pub fn as_merged(&self) -> Option<&[Resolved<'a>]> {
        match self {
            Resolved::Single(_) => None,
            Resolved::Merged(items) => Some(items),
        }
    }

    /// Number of top-level results. A single result counts as one.
    pub fn len(&self) -> usize {
        match self {
            Resolved::Single(_) => 1,
            Resolved::Merged(items) => items.len(),
        }
    }

    /// `true` only for a merge with no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the top-level results; a single result yields itself.
    pub fn iter(&self) -> std::slice::Iter<'_, Resolved<'a>> {
        match self {
            Resolved::Single(_) => std::slice::from_ref(self).iter(),
            Resolved::Merged(items) => items.iter(),
        }
    }

    /// Copy the result into an owned [`Value`]; merged results become a
    /// [`Value::Sequence`].
    pub fn to_value(&self) -> Value {
        match self {
            Resolved::Single(value) => (*value).clone(),
            Resolved::Merged(items) => {
                Value::Sequence(items.iter().map(Resolved::to_value).collect())
            }
        }
    }

    fn is_mergeable(&self) -> bool {
        match self {
            Resolved::Single(value) => deref(value).is_some_and(|v| v.kind().is_mergeable()),
            Resolved::Merged(_) => true,
        }
    }

    /// Push the contents of a sequence or mapping result into `out`, one level
    /// deep. Other results are pushed as a single element.
    fn spread_into(self, out: &mut Vec<Resolved<'a>>) {
        match self {
            Resolved::Merged(items) => out.extend(items),
            Resolved::Single(value) => match deref(value) {
                Some(Value::Sequence(items)) => {
                    out.extend(items.iter().filter_map(deref).map(Resolved::Single));
                }
                Some(Value::Mapping(entries)) => {
                    out.extend(entries.iter().filter_map(|(_, v)| deref(v)).map(Resolved::Single));
                }
                _ => out.push(Resolved::Single(value)),
            },
        }
    }
}

impl PartialEq<Value> for Resolved<'_> {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Resolved::Single(value), other) => *value == other,
            (Resolved::Merged(items), Value::Sequence(others)) => {
                items.len() == others.len() && items.iter().zip(others).all(|(a, b)| a == b)
            }
            (Resolved::Merged(_), _) => false,
        }
    }
}

impl Serialize for Resolved<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Resolved::Single(value) => value.serialize(serializer),
            Resolved::Merged(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Resolves paths against values using a fixed set of [`LookupOptions`].
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: LookupOptions,
}

impl Resolver {
    pub fn new(options: LookupOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LookupOptions {
        &self.options
    }

    /// Resolve a path given as discrete segments.
    ///
    /// # Errors
    ///
    /// See [`LookupError`]. A path that ends on an absent value, or a fan-out
    /// in which every element ends on an absent value, fails with
    /// [`LookupError::KeyNotFound`].
    pub fn lookup<'a, S: AsRef<str>>(&self, root: &'a Value, path: &[S]) -> Result<Resolved<'a>> {
        self.resolve(root, path)?
            .ok_or_else(|| LookupError::not_found(path.last().map_or("", |s| s.as_ref())))
    }

    /// Split `path` on the configured separator and resolve it.
    pub fn lookup_str<'a>(&self, root: &'a Value, path: &str) -> Result<Resolved<'a>> {
        let path = Path::parse_with(path, self.options.separator);
        self.lookup(root, path.segments())
    }

    /// Walk `path` from `root`. `Ok(None)` means the walk ended on an absent value.
    fn resolve<'a, S: AsRef<str>>(
        &self,
        root: &'a Value,
        path: &[S],
    ) -> Result<Option<Resolved<'a>>> {
        let mut current = Some(root);

        for (position, segment) in path.iter().enumerate() {
            let parent = current;
            match step(parent, segment.as_ref(), self.options.index_syntax) {
                Ok(next) => current = next,
                // A malformed segment is a path error; no element could resolve it.
                Err(err @ LookupError::MalformedIndex { .. }) => return Err(err),
                Err(err) => {
                    return match parent.and_then(deref) {
                        Some(Value::Sequence(items)) => self.fan_out(items, &path[position..]),
                        _ => Err(err),
                    };
                }
            }
        }

        Ok(current.and_then(deref).map(Resolved::Single))
    }

    fn fan_out<'a, S: AsRef<str>>(
        &self,
        items: &'a [Value],
        suffix: &[S],
    ) -> Result<Option<Resolved<'a>>> {
        trace!(
            elements = items.len(),
            segment = suffix.first().map_or("", |s| s.as_ref()),
            "fanning out over sequence"
        );

        let results = items
            .iter()
            .map(|item| self.resolve(item, suffix))
            .collect::<Result<Vec<_>>>()?;

        Ok(merge(results))
    }
}

/// Merge per-element results into one ordered result.
///
/// `None` entries (absent results) are dropped first; if none remain the
/// merge is `None`. The first remaining result decides the shape: a sequence,
/// mapping or earlier merge is spread into the output, anything else is
/// appended as one element. Later results follow the same rule, so mixed
/// results never fail: a scalar met while spreading is appended, and a
/// collection met while appending is nested.
///
/// ```
/// use lookup_core::{merge, Resolved, Value};
///
/// let a = Value::from(vec!["foo", "bar"]);
/// let b = Value::from(vec!["qux", "baz"]);
/// let merged = merge(vec![Some(Resolved::Single(&a)), None, Some(Resolved::Single(&b))]).unwrap();
/// assert_eq!(merged, Value::from(vec!["foo", "bar", "qux", "baz"]));
/// ```
pub fn merge<'a>(results: Vec<Option<Resolved<'a>>>) -> Option<Resolved<'a>> {
    let mut present = results.into_iter().flatten().peekable();
    let flatten = present.peek()?.is_mergeable();

    let mut merged = Vec::new();
    for result in present {
        if flatten {
            result.spread_into(&mut merged);
        } else {
            merged.push(result);
        }
    }

    trace!(elements = merged.len(), flatten, "merged fan-out results");
    Some(Resolved::Merged(merged))
}

/// Resolve `path` against `root` with default options.
///
/// ```
/// use lookup_core::{lookup, Value};
///
/// let root = Value::mapping([("foo", Value::from(42))]);
/// assert_eq!(lookup(&root, &["foo"]).unwrap(), Value::from(42));
/// ```
pub fn lookup<'a, S: AsRef<str>>(root: &'a Value, path: &[S]) -> Result<Resolved<'a>> {
    Resolver::default().lookup(root, path)
}

/// Split `path` on `.` and resolve it against `root` with default options.
pub fn lookup_str<'a>(root: &'a Value, path: &str) -> Result<Resolved<'a>> {
    Resolver::default().lookup_str(root, path)
}
