//! # lookup-core
//!
//! Resolve dotted paths such as `"servers.ports[0]"` against dynamically-typed
//! in-memory values: structured records, keyed mappings, ordered sequences and
//! optional wrappers.
//!
//! When a segment addresses a sequence of records without selecting an element,
//! the rest of the path is applied to **every** element and the per-element
//! results are merged into one ordered result (fan-out).
//!
//! ## Quick start
//!
//! ```rust
//! use lookup_core::{lookup_str, Value};
//! use serde_json::json;
//!
//! let doc = Value::from(json!({
//!     "servers": [
//!         {"name": "alpha", "ports": [80, 443]},
//!         {"name": "beta", "ports": [8080]}
//!     ]
//! }));
//!
//! // Direct access
//! let first = lookup_str(&doc, "servers[0].name").unwrap();
//! assert_eq!(first, Value::from("alpha"));
//!
//! // Fan-out over the sequence, flattening the per-element port lists
//! let ports = lookup_str(&doc, "servers.ports").unwrap();
//! assert_eq!(ports, Value::from(vec![80, 443, 8080]));
//! ```
//!
//! Host types reach the value model through serde: any `T: Serialize` can be
//! converted with [`to_value`].
//!
//! ## Modules
//!
//! - [`value`]: the tagged-variant [`Value`] model and its [`Kind`] classification
//! - [`ser`]: `serde::Serializer` turning host data into a [`Value`]
//! - [`segment`]: `key` / `key[N]` segment parser
//! - [`path`]: dotted path splitting
//! - [`access`]: single-step accessor
//! - [`resolve`]: the traversal driver, fan-out and merge
//! - [`error`]: error types

pub mod access;
pub mod error;
pub mod path;
pub mod resolve;
pub mod segment;
pub mod ser;
pub mod value;

pub use error::{ConvertError, LookupError};
pub use path::Path;
pub use resolve::{lookup, lookup_str, merge, LookupOptions, Resolved, Resolver};
pub use segment::{IndexSyntax, Segment};
pub use ser::to_value;
pub use value::{deref, Kind, Record, Value};
