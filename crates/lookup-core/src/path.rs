//! Splitting a dotted path string into raw segments.

use std::fmt;

/// Default segment separator.
pub const SEPARATOR: char = '.';

/// A path split into raw segment strings.
///
/// Splitting never fails: empty segments (as in `"a..b"` or `""`) are kept and
/// simply fail to resolve later. Segments are parsed into key and index only
/// when they are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<'a> {
    segments: Vec<&'a str>,
}

impl<'a> Path<'a> {
    /// Split `input` on `.`.
    ///
    /// ```
    /// use lookup_core::Path;
    ///
    /// let path = Path::parse("items[0].name");
    /// assert_eq!(path.segments(), ["items[0]", "name"]);
    /// ```
    pub fn parse(input: &'a str) -> Self {
        Self::parse_with(input, SEPARATOR)
    }

    /// Split `input` on a custom separator.
    pub fn parse_with(input: &'a str, separator: char) -> Self {
        Self {
            segments: input.split(separator).collect(),
        }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<'a> From<Vec<&'a str>> for Path<'a> {
    fn from(segments: Vec<&'a str>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
