//! # jsonvalue-core
//!
//! An in-memory JSON value for loosely structured data (dynamic configuration,
//! API payloads) that still converts safely into typed Rust values when the
//! shape is known.
//!
//! Numbers remember whether they were produced as an integer or a fraction,
//! and that distinction survives parsing, encoding, equality and hashing.
//! Objects keep insertion order for encoding but compare as maps.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonvalue_core::{to_value, Value};
//! use std::collections::BTreeMap;
//!
//! // Text → Value → text
//! let v: Value = r#"{"derp":{"blerp":["a","b"]},"n":1.0}"#.parse().unwrap();
//! assert_eq!(v.encode_as_string().unwrap(), r#"{"derp":{"blerp":["a","b"]},"n":1.0}"#);
//!
//! // Dotted key paths
//! assert_eq!(v.get("derp.blerp").unwrap().coerce::<Vec<String>>().unwrap(), ["a", "b"]);
//!
//! // Native graph → Value
//! let mut dict = BTreeMap::new();
//! dict.insert("age", 30);
//! assert_eq!(to_value(&dict).unwrap().get("age"), Some(&Value::from(30)));
//! ```
//!
//! ## Modules
//!
//! - [`number`] — `NumericKind` (integer vs. fraction)
//! - [`value`] — the `Value` tree and its accessors
//! - [`hash`] — structural equality and the deterministic content hash
//! - [`access`] — key-path lookup and array index get/set/remove
//! - [`encoder`] — compact JSON text output with exact escaping
//! - [`decoder`] — JSON text and `serde_json::Value` → `Value`
//! - [`ser`] — any `Serialize` native value → `Value`
//! - [`de`] — `Value` → any `Deserialize` type, with field-path errors
//! - [`convert`] — `FromJson`/`ToJson` coercions for native scalars and collections
//! - [`error`] — error types

pub mod access;
pub mod convert;
pub mod de;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod hash;
pub mod number;
pub mod ser;
pub mod value;

pub use convert::{FromJson, Jsonable, ToJson};
pub use de::from_value;
pub use decoder::{from_slice, from_str};
pub use encoder::{encode_str, EncodeOptions};
pub use error::{FieldPath, JsonError, PathSegment, Result};
pub use number::NumericKind;
pub use ser::to_value;
pub use value::{Map, Value};
