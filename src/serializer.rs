//! Compact JSON serialization.
//!
//! Output has no whitespace between tokens. Object members are written in
//! the iteration order of their [`MapOrder`](crate::MapOrder); array elements
//! in insertion order.
//!
//! Strings are written between quotes exactly as stored, without escaping.
//! A string containing `"` or `\` therefore produces text that will not parse
//! back to the same value.
//!
//! Numbers are written in the native format of their representation: raw
//! text verbatim, integers in decimal, floats by their shortest round-trip
//! form (so `f32` and `f64` holding the "same" value may print differently).
//! Non-finite floats have no JSON spelling and are written as `null`.

use std::fmt;

use crate::document::Document;
use crate::value::{Map, Number, Value};

/// Reusable serializer that keeps its output buffer between calls.
#[derive(Debug, Default)]
pub struct Serializer {
    output: String,
}

impl Serializer {
    /// Create a serializer with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize a document, returning a view of the internal buffer.
    pub fn serialize(&mut self, doc: &Document) -> &str {
        self.output.clear();
        serialize_object(doc.get_member(), &mut self.output);
        &self.output
    }

    /// Serialize any value, returning a view of the internal buffer.
    pub fn serialize_value(&mut self, value: &Value) -> &str {
        self.output.clear();
        serialize_value(value, &mut self.output);
        &self.output
    }
}

/// Serialize a document to compact JSON text.
pub fn to_string(doc: &Document) -> String {
    let mut output = String::new();
    serialize_object(doc.get_member(), &mut output);
    output
}

/// Serialize a value to compact JSON text.
pub fn value_to_string(value: &Value) -> String {
    let mut output = String::new();
    serialize_value(value, &mut output);
    output
}

/// Text form of a number in its stored representation.
pub fn number_to_string(number: &Number) -> String {
    match number {
        Number::Raw(text) => text.clone(),
        Number::Int(v) => v.to_string(),
        Number::Uint(v) => v.to_string(),
        Number::Int64(v) => v.to_string(),
        Number::Uint64(v) => v.to_string(),
        Number::Int16(v) => v.to_string(),
        Number::Double(v) if v.is_finite() => v.to_string(),
        Number::Float(v) if v.is_finite() => v.to_string(),
        Number::Double(_) | Number::Float(_) => "null".to_string(),
    }
}

fn serialize_value(value: &Value, output: &mut String) {
    match value {
        Value::Null => output.push_str("null"),
        Value::Boolean(true) => output.push_str("true"),
        Value::Boolean(false) => output.push_str("false"),
        Value::Number(Number::Raw(text)) => output.push_str(text),
        Value::Number(n) => output.push_str(&number_to_string(n)),
        Value::String(s) => serialize_string(s, output),
        Value::Array(items) => serialize_array(items, output),
        Value::Object(map) => serialize_object(map, output),
    }
}

fn serialize_string(s: &str, output: &mut String) {
    output.push('"');
    output.push_str(s);
    output.push('"');
}

fn serialize_array(items: &[Value], output: &mut String) {
    output.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        serialize_value(item, output);
    }
    output.push(']');
}

fn serialize_object(map: &Map, output: &mut String) {
    output.push('{');
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        serialize_string(key, output);
        output.push(':');
        serialize_value(value, output);
    }
    output.push('}');
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&number_to_string(self))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&value_to_string(self))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::MapOrder;

    #[test]
    fn test_serialize_primitives() {
        assert_eq!(value_to_string(&Value::Null), "null");
        assert_eq!(value_to_string(&Value::from(true)), "true");
        assert_eq!(value_to_string(&Value::from(false)), "false");
        assert_eq!(value_to_string(&Value::from("hi")), "\"hi\"");
        assert_eq!(value_to_string(&Value::from(-3)), "-3");
    }

    #[test]
    fn test_serialize_numbers_native_format() {
        assert_eq!(number_to_string(&Number::Int(i32::MIN)), "-2147483648");
        assert_eq!(number_to_string(&Number::Uint(u32::MAX)), "4294967295");
        assert_eq!(number_to_string(&Number::Int64(i64::MAX)), "9223372036854775807");
        assert_eq!(number_to_string(&Number::Uint64(u64::MAX)), "18446744073709551615");
        assert_eq!(number_to_string(&Number::Int16(-7)), "-7");
        assert_eq!(number_to_string(&Number::Double(2.5)), "2.5");
        assert_eq!(number_to_string(&Number::Float(0.1)), "0.1");
        // The same value widened to f64 shows its binary approximation.
        assert_eq!(
            number_to_string(&Number::Double(f64::from(0.1f32))),
            "0.10000000149011612"
        );
    }

    #[test]
    fn test_serialize_raw_number_verbatim() {
        let v = Value::raw_number("1.50E+3");
        assert_eq!(value_to_string(&v), "1.50E+3");
    }

    #[test]
    fn test_non_finite_floats_become_null() {
        assert_eq!(number_to_string(&Number::Double(f64::NAN)), "null");
        assert_eq!(number_to_string(&Number::Float(f32::INFINITY)), "null");
    }

    #[test]
    fn test_strings_not_escaped() {
        assert_eq!(value_to_string(&Value::from("a\"b")), "\"a\"b\"");
    }

    #[test]
    fn test_serialize_array() {
        let v = Value::from(vec![Value::from(1), Value::Null, Value::from(Vec::<Value>::new())]);
        assert_eq!(value_to_string(&v), "[1,null,[]]");
    }

    #[test]
    fn test_serialize_document_insertion_order() {
        let mut doc = Document::new();
        doc.add_member("b", Value::from(2));
        doc.add_member("a", Value::from(1));
        assert_eq!(to_string(&doc), r#"{"b":2,"a":1}"#);
    }

    #[test]
    fn test_serialize_document_sorted_order() {
        let mut doc = Document::with_order(MapOrder::Sorted);
        doc.add_member("b", Value::from(2));
        doc.add_member("a", Value::from(1));
        assert_eq!(to_string(&doc), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_serialize_empty_document() {
        assert_eq!(to_string(&Document::new()), "{}");
    }

    #[test]
    fn test_serialize_nested() {
        let mut doc = Document::new();
        doc["obj"].add_member("x", Value::from(1));
        doc["arr"].add_element(Value::from("s"));
        doc["arr"].add_element(Value::object(MapOrder::Insertion));
        assert_eq!(to_string(&doc), r#"{"obj":{"x":1},"arr":["s",{}]}"#);
    }

    #[test]
    fn test_serializer_reuses_buffer() {
        let mut serializer = Serializer::new();
        let mut doc = Document::new();
        doc.add_member("a", Value::Null);
        assert_eq!(serializer.serialize(&doc), r#"{"a":null}"#);
        assert_eq!(serializer.serialize_value(&Value::from(true)), "true");
        assert_eq!(serializer.serialize(&Document::new()), "{}");
    }

    #[test]
    fn test_display() {
        let mut doc = Document::new();
        doc.add_member("k", Value::from(vec![Value::from(1.5)]));
        assert_eq!(doc.to_string(), r#"{"k":[1.5]}"#);
        assert_eq!(doc["k"].to_string(), "[1.5]");
        assert_eq!(Number::Int(3).to_string(), "3");
    }
}
