//! Parsing of one path segment: `key` or `key[N]`.

use std::fmt;

use crate::error::{LookupError, Result};

const INDEX_OPEN: char = '[';
const INDEX_CLOSE: char = ']';

/// How strictly the text after an index selector's `]` is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexSyntax {
    /// `key[N]` must end at the closing bracket; `key[N]tail` is malformed.
    #[default]
    Strict,
    /// Anything after the closing bracket is ignored, so `key[1]tail` reads as `key[1]`.
    Lenient,
}

/// A bare key plus an optional index selector.
///
/// `index` is `None` when no selector was written, which is never confused
/// with `Some(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub key: &'a str,
    pub index: Option<usize>,
}

impl<'a> Segment<'a> {
    /// Parse a segment with [`IndexSyntax::Strict`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lookup_core::Segment;
    ///
    /// let seg = Segment::parse("ports[2]").unwrap();
    /// assert_eq!(seg.key, "ports");
    /// assert_eq!(seg.index, Some(2));
    ///
    /// assert!(Segment::parse("ports[]").is_err());
    /// ```
    pub fn parse(raw: &'a str) -> Result<Self> {
        Self::parse_with(raw, IndexSyntax::Strict)
    }

    /// Parse a segment.
    ///
    /// The key is everything before the first `[`, which may be empty. The text
    /// between the first `[` and the first `]` must be a non-empty run of ASCII
    /// digits.
    ///
    /// # Errors
    ///
    /// [`LookupError::MalformedIndex`] for unbalanced brackets, a `]` before the
    /// `[`, non-digit or overflowing index text, and (in strict mode) trailing
    /// text after the `]`.
    pub fn parse_with(raw: &'a str, syntax: IndexSyntax) -> Result<Self> {
        let (open, close) = match (raw.find(INDEX_OPEN), raw.find(INDEX_CLOSE)) {
            (None, None) => {
                return Ok(Self {
                    key: raw,
                    index: None,
                })
            }
            (Some(open), Some(close)) if open < close => (open, close),
            _ => return Err(LookupError::malformed(raw)),
        };

        let digits = &raw[open + 1..close];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LookupError::malformed(raw));
        }
        let index = digits
            .parse::<usize>()
            .map_err(|_| LookupError::malformed(raw))?;

        if syntax == IndexSyntax::Strict && close + 1 != raw.len() {
            return Err(LookupError::malformed(raw));
        }

        Ok(Self {
            key: &raw[..open],
            index: Some(index),
        })
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}{}{}{}", self.key, INDEX_OPEN, index, INDEX_CLOSE),
            None => f.write_str(self.key),
        }
    }
}
