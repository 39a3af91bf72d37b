//! Aposa JSON - a small JSON document model with lazy numbers.
//!
//! A [`Document`] is a top-level JSON object. Values are a closed set of
//! kinds ([`Value`]); numbers read from text stay as their original lexeme
//! until a typed accessor asks for a concrete type, so parsing then
//! re-serializing reproduces numeric text exactly.
//!
//! # Architecture
//!
//! - [`value`] - the value model, numbers and object maps
//! - [`document`] - the root object with upsert and create-on-index
//! - [`lexer`] / [`parser`] - recursive-descent parsing of object-rooted text
//! - [`serializer`] - compact output
//! - [`limits`] - input size and nesting depth bounds
//! - [`error`] - parse, conversion and type-mismatch errors
//!
//! # Example
//!
//! ```
//! use aposa_json::{parse, to_string};
//!
//! let mut doc = parse(r#"{"n": 1.50, "tags": ["a"]}"#)?;
//! assert_eq!(doc["n"].get_double()?, 1.5);
//! doc["tags"].add_element("b".into());
//! doc["seen"].set_boolean(true);
//! assert_eq!(to_string(&doc), r#"{"n":1.50,"tags":["a","b"],"seen":true}"#);
//! # Ok::<(), aposa_json::Error>(())
//! ```

// Library code propagates errors instead of panicking.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod serializer;
pub mod value;

#[cfg(feature = "serde")]
mod serde_impl;

// Re-export commonly used types
pub use document::Document;
pub use error::{
    ConversionErrorKind, Error, NumberConversionError, ParseError, ParseResult, Result,
    TypeMismatch,
};
pub use limits::Limits;
pub use parser::{parse, parse_with_limits, Parser};
pub use serializer::{to_string, value_to_string, Serializer};
pub use value::{Map, MapOrder, Number, NumberKind, Value, ValueKind};
