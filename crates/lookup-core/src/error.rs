//! Error types for path lookups and value conversion.

use thiserror::Error;

/// Errors returned by [`crate::lookup`] and friends.
///
/// Each variant carries the path text that caused it. Errors raised inside a
/// fan-out are returned verbatim from the first failing element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// A segment has unbalanced brackets or non-numeric index content.
    #[error("malformed index in segment '{segment}'")]
    MalformedIndex { segment: String },

    /// An index selector was used on a value that is not a sequence.
    #[error("invalid index usage: '{key}' does not address a sequence")]
    InvalidIndexUsage { key: String },

    /// The key did not resolve against the current value.
    #[error("unable to find the key '{key}'")]
    KeyNotFound { key: String },
}

impl LookupError {
    pub(crate) fn malformed(segment: &str) -> Self {
        Self::MalformedIndex {
            segment: segment.to_owned(),
        }
    }

    pub(crate) fn not_found(key: &str) -> Self {
        Self::KeyNotFound {
            key: key.to_owned(),
        }
    }
}

/// Convenience alias used throughout lookup-core.
pub type Result<T> = std::result::Result<T, LookupError>;

/// Errors raised while converting host data into a [`crate::Value`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// A map key serialized to something other than a string, integer, char or bool.
    #[error("map keys must be strings, integers, chars or bools")]
    KeyMustBeScalar,

    /// A custom error raised by a `Serialize` implementation.
    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for ConvertError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        ConvertError::Custom(msg.to_string())
    }
}
