//! `serde::Serialize` for the document model.
//!
//! Lets a [`Document`] be handed to any serde data format. Raw numbers are
//! emitted as the first of `i64`, `u64` or `f64` their text parses as; text
//! that is none of those goes out as a string.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::document::Document;
use crate::value::{Map, Number, Value};

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::Raw(text) => {
                if let Ok(v) = text.parse::<i64>() {
                    serializer.serialize_i64(v)
                } else if let Ok(v) = text.parse::<u64>() {
                    serializer.serialize_u64(v)
                } else if let Ok(v) = self.to_f64() {
                    serializer.serialize_f64(v)
                } else {
                    serializer.serialize_str(text)
                }
            }
            Number::Int(v) => serializer.serialize_i32(*v),
            Number::Uint(v) => serializer.serialize_u32(*v),
            Number::Int64(v) => serializer.serialize_i64(*v),
            Number::Uint64(v) => serializer.serialize_u64(*v),
            Number::Double(v) => serializer.serialize_f64(*v),
            Number::Float(v) => serializer.serialize_f32(*v),
            Number::Int16(v) => serializer.serialize_i16(*v),
        }
    }
}

impl Serialize for Map {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get_member().serialize(serializer)
    }
}
