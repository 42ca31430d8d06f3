//! Dynamically-typed values that paths are resolved against.
//!
//! [`Value`] is a closed set of variants. Every value classifies into exactly one
//! [`Kind`], and the absent state is an empty [`Value::Optional`], which is kept
//! distinct from present-but-empty values such as [`Value::Null`] or `""`.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A dynamically-typed value: scalar, sequence, keyed mapping, structured record
/// or optional wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The unit value. Present, unlike an empty [`Value::Optional`].
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integers that do not fit in an `i64`.
    UInt(u64),
    Float(f64),
    String(String),
    /// Ordered, indexable list.
    Sequence(Vec<Value>),
    /// String-keyed associative container, in insertion order.
    Mapping(Vec<(String, Value)>),
    /// Structured record with named fields.
    Record(Record),
    /// Zero-or-one inner value. `Optional(None)` is the absent state.
    Optional(Option<Box<Value>>),
}

/// A structured record: a type name plus named fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub fields: Vec<(String, Value)>,
}

impl Record {
    /// Look up a field by exact name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

/// The capability class of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Scalar,
    Sequence,
    Mapping,
    Record,
    Optional,
}

impl Kind {
    /// Kinds a fan-out can start from.
    pub fn is_aggregable(self) -> bool {
        matches!(self, Kind::Record | Kind::Mapping | Kind::Sequence)
    }

    /// Kinds whose contents are spread, rather than nested, when merged.
    pub fn is_mergeable(self) -> bool {
        matches!(self, Kind::Sequence | Kind::Mapping)
    }
}

impl Value {
    /// Build a record from a type name and `(field, value)` pairs.
    pub fn record<N, K, I>(name: N, fields: I) -> Self
    where
        N: Into<String>,
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Record(Record {
            name: name.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }

    /// Build a keyed mapping from `(key, value)` pairs, keeping their order.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Wrap a value in one level of indirection.
    pub fn some(value: impl Into<Value>) -> Self {
        Value::Optional(Some(Box::new(value.into())))
    }

    /// The absent value.
    pub fn none() -> Self {
        Value::Optional(None)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Sequence(_) => Kind::Sequence,
            Value::Mapping(_) => Kind::Mapping,
            Value::Record(_) => Kind::Record,
            Value::Optional(_) => Kind::Optional,
            _ => Kind::Scalar,
        }
    }

    /// `true` only for an empty [`Value::Optional`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Optional(None))
    }

    /// Look up `key` in a mapping's entries. Returns `None` for other kinds.
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }
}

/// Strip every level of [`Value::Optional`] wrapping.
///
/// Returns `None` when the chain ends in the absent state. Values are owned
/// trees, so the chain is always finite.
pub fn deref(value: &Value) -> Option<&Value> {
    let mut current = value;
    while let Value::Optional(inner) = current {
        current = inner.as_deref()?;
    }
    Some(current)
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Value::Int(n.into())
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::UInt(n),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        Value::Optional(opt.map(|v| Box::new(v.into())))
    }
}

/// JSON `null` becomes the absent state, matching how a missing object
/// reference behaves.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Optional(None),
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Mapping(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::UInt(n) => serializer.serialize_u64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(entries) | Value::Record(Record { fields: entries, .. }) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Optional(None) => serializer.serialize_none(),
            Value::Optional(Some(inner)) => serializer.serialize_some(inner.as_ref()),
        }
    }
}
