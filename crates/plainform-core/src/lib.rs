//! # plainform-core
//!
//! From-scratch **CSV** and **JSON** codecs over a shared dynamically-typed
//! value model.
//!
//! Both engines are pure transformations over owned buffers: text in, a
//! [`Value`] tree (or a [`Csv`] document) out, and back again. There is no
//! I/O layer and no state retained across calls. Scalars are typed by
//! inference — the parsers prefer 32-bit integers and floats and widen to
//! 64-bit only when the 32-bit parse fails — and objects keep their entries
//! in insertion order.
//!
//! ## Quick start
//!
//! ```rust
//! use plainform_core::{json, Csv, Value};
//!
//! // JSON text → ordered object → JSON text
//! let doc = json::parse(r#"{"a":1,"b":[1,2,3],"c":{"d":true}}"#).unwrap();
//! assert_eq!(doc.get_i32("a"), Some(1));
//! assert!(doc.get_map("c").unwrap().get_bool("d").unwrap());
//! assert_eq!(doc.to_string(), r#"{"a": 1, "b": [1, 2, 3], "c": {"d": true}}"#);
//!
//! // CSV text → typed cells (header lookup on the first row)
//! let csv = Csv::parse("name,score\n\"hi, there\",3\n");
//! assert_eq!(csv.get(1, 0), Some(&Value::String("hi, there".into())));
//! assert_eq!(csv.get_i32(1, "score"), Some(3));
//! ```
//!
//! ## Modules
//!
//! - [`value`] — [`Value`] tagged union, ordered [`Map`], [`ToMap`] bridge trait
//! - [`csv`] — [`Csv`] document, tokenizer, scalar classifier, serializer
//! - [`json`] — normalization, recursive-descent parser, compact serializer
//! - [`error`] — [`ParseError`] for the (JSON-only) failure paths

pub mod csv;
pub mod error;
pub mod json;
pub mod value;

pub use csv::{ColumnKey, Csv};
pub use error::{ParseError, Result};
pub use value::{Entry, Map, ToMap, Value};
