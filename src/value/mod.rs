//! The JSON value tree.
//!
//! [`Value`] is a closed sum over the six JSON kinds. Setters repurpose a
//! value in place, discarding whatever payload it held before; getters read
//! the payload of the current kind and fail with [`TypeMismatch`] otherwise.
//!
//! Containers own their children directly, so a tree built from values can
//! never contain a cycle.

mod map;
mod number;

pub use map::{Iter, Map, MapOrder};
pub use number::{Number, NumberKind};

use crate::error::{Result, TypeMismatch};

/// The active variant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any number, raw or concrete
    Number,
    /// String
    String,
    /// Ordered sequence of values
    Array,
    /// Keyed members
    Object,
}

impl ValueKind {
    /// Returns the kind name as a string for error messages.
    pub fn type_name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

/// A JSON value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean
    Boolean(bool),
    /// JSON number, raw text or a concrete host type
    Number(Number),
    /// JSON string
    String(String),
    /// JSON array
    Array(Vec<Value>),
    /// JSON object
    Object(Map),
}

impl Value {
    /// Creates an empty value of the given kind.
    ///
    /// Numbers start as the 32-bit integer zero, containers start empty and
    /// objects use the default [`MapOrder`].
    pub fn with_kind(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Null => Value::Null,
            ValueKind::Boolean => Value::Boolean(false),
            ValueKind::Number => Value::Number(Number::Int(0)),
            ValueKind::String => Value::String(String::new()),
            ValueKind::Array => Value::Array(Vec::new()),
            ValueKind::Object => Value::Object(Map::new()),
        }
    }

    /// Creates an empty object with the given member order.
    pub fn object(order: MapOrder) -> Self {
        Value::Object(Map::with_order(order))
    }

    /// Creates a number holding unconverted literal text.
    pub fn raw_number(text: impl Into<String>) -> Self {
        Value::Number(Number::Raw(text.into()))
    }

    /// Returns the active kind.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Returns the kind name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Returns true if this is a number value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    fn mismatch(&self, expected: &'static str) -> TypeMismatch {
        TypeMismatch {
            expected,
            found: self.type_name(),
        }
    }

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    /// Turns this value into a boolean.
    pub fn set_boolean(&mut self, value: bool) {
        *self = Value::Boolean(value);
    }

    /// Turns this value into a string.
    pub fn set_string(&mut self, value: impl Into<String>) {
        *self = Value::String(value.into());
    }

    /// Turns this value into a number holding unconverted literal text.
    pub fn set_number_string(&mut self, text: impl Into<String>) {
        *self = Value::raw_number(text);
    }

    /// Turns this value into the given number.
    pub fn set_number(&mut self, number: Number) {
        *self = Value::Number(number);
    }

    /// Turns this value into a 32-bit signed integer.
    pub fn set_int(&mut self, value: i32) {
        self.set_number(Number::Int(value));
    }

    /// Turns this value into a 32-bit unsigned integer.
    pub fn set_uint(&mut self, value: u32) {
        self.set_number(Number::Uint(value));
    }

    /// Turns this value into a 64-bit signed integer.
    pub fn set_int64(&mut self, value: i64) {
        self.set_number(Number::Int64(value));
    }

    /// Turns this value into a 64-bit unsigned integer.
    pub fn set_uint64(&mut self, value: u64) {
        self.set_number(Number::Uint64(value));
    }

    /// Turns this value into a double-precision float.
    pub fn set_double(&mut self, value: f64) {
        self.set_number(Number::Double(value));
    }

    /// Turns this value into a single-precision float.
    pub fn set_float(&mut self, value: f32) {
        self.set_number(Number::Float(value));
    }

    /// Turns this value into a 16-bit signed integer.
    pub fn set_int16(&mut self, value: i16) {
        self.set_number(Number::Int16(value));
    }

    /// Appends to this array. A value of any other kind is first replaced by
    /// an empty array.
    pub fn add_element(&mut self, value: Value) {
        match self {
            Value::Array(items) => items.push(value),
            _ => *self = Value::Array(vec![value]),
        }
    }

    /// Inserts or replaces a member of this object. A value of any other kind
    /// is first replaced by an empty object with the default [`MapOrder`].
    pub fn add_member(&mut self, key: impl Into<String>, value: Value) {
        self.add_member_ordered(MapOrder::default(), key, value);
    }

    /// Like [`add_member`](Value::add_member), but a value of any other kind
    /// becomes an empty object backed by `order`. An existing object keeps
    /// its own order.
    pub fn add_member_ordered(&mut self, order: MapOrder, key: impl Into<String>, value: Value) {
        match self {
            Value::Object(map) => {
                map.insert(key, value);
            }
            _ => {
                let mut map = Map::with_order(order);
                map.insert(key, value);
                *self = Value::Object(map);
            }
        }
    }

    /// Member `key` of this object as an object, created empty in this
    /// object's order when absent or of another kind.
    pub fn entry_object(&mut self, key: &str) -> Result<&mut Value> {
        Ok(self.get_object_mut()?.entry_object(key))
    }

    // ------------------------------------------------------------------
    // Getters
    // ------------------------------------------------------------------

    /// Reads a boolean.
    pub fn get_boolean(&self) -> Result<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch("boolean").into()),
        }
    }

    /// Reads a string.
    pub fn get_string(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch("string").into()),
        }
    }

    /// Reads the array elements.
    pub fn get_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(items) => Ok(items),
            _ => Err(self.mismatch("array").into()),
        }
    }

    /// Mutable access to the array elements.
    pub fn get_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch("array").into()),
        }
    }

    /// Reads the object members.
    pub fn get_object(&self) -> Result<&Map> {
        match self {
            Value::Object(map) => Ok(map),
            _ => Err(self.mismatch("object").into()),
        }
    }

    /// Mutable access to the object members.
    pub fn get_object_mut(&mut self) -> Result<&mut Map> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.mismatch("object").into()),
        }
    }

    /// Reads the number payload.
    pub fn get_number(&self) -> Result<&Number> {
        match self {
            Value::Number(n) => Ok(n),
            _ => Err(self.mismatch("number").into()),
        }
    }

    /// Returns how the number is represented.
    pub fn number_kind(&self) -> Result<NumberKind> {
        Ok(self.get_number()?.kind())
    }

    /// Reads the unconverted literal text of a parsed number.
    ///
    /// Fails if the number has been given a concrete type.
    pub fn get_number_string(&self) -> Result<&str> {
        let number = self.get_number()?;
        number.as_raw().ok_or_else(|| {
            TypeMismatch {
                expected: NumberKind::Raw.type_name(),
                found: number.kind().type_name(),
            }
            .into()
        })
    }

    /// Reads the number as `i32`.
    pub fn get_int(&self) -> Result<i32> {
        Ok(self.get_number()?.to_i32()?)
    }

    /// Reads the number as `u32`.
    pub fn get_uint(&self) -> Result<u32> {
        Ok(self.get_number()?.to_u32()?)
    }

    /// Reads the number as `i64`.
    pub fn get_int64(&self) -> Result<i64> {
        Ok(self.get_number()?.to_i64()?)
    }

    /// Reads the number as `u64`.
    pub fn get_uint64(&self) -> Result<u64> {
        Ok(self.get_number()?.to_u64()?)
    }

    /// Reads the number as `f64`.
    pub fn get_double(&self) -> Result<f64> {
        Ok(self.get_number()?.to_f64()?)
    }

    /// Reads the number as `f32`.
    pub fn get_float(&self) -> Result<f32> {
        Ok(self.get_number()?.to_f32()?)
    }

    /// Reads the number as `i16`.
    pub fn get_int16(&self) -> Result<i16> {
        Ok(self.get_number()?.to_i16()?)
    }

    /// Get a member from an object by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Get an element from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

macro_rules! from_primitive {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

from_primitive!(i16, i32, u32, i64, u64, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConversionErrorKind, Error};

    #[test]
    fn test_value_kinds() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from(true).kind(), ValueKind::Boolean);
        assert_eq!(Value::from(1).kind(), ValueKind::Number);
        assert_eq!(Value::from("s").kind(), ValueKind::String);
        assert_eq!(Value::from(Vec::<Value>::new()).kind(), ValueKind::Array);
        assert_eq!(Value::from(Map::new()).kind(), ValueKind::Object);
    }

    #[test]
    fn test_with_kind() {
        for kind in [
            ValueKind::Null,
            ValueKind::Boolean,
            ValueKind::Number,
            ValueKind::String,
            ValueKind::Array,
            ValueKind::Object,
        ] {
            assert_eq!(Value::with_kind(kind).kind(), kind);
        }
        assert_eq!(Value::with_kind(ValueKind::Number).get_int().unwrap(), 0);
    }

    #[test]
    fn test_setter_repurposes_value() {
        let mut v = Value::from("text");
        v.set_int(5);
        assert_eq!(v.kind(), ValueKind::Number);
        assert!(v.get_string().is_err());

        v.add_element(Value::Null);
        assert_eq!(v.get_array().unwrap().len(), 1);

        v.set_boolean(false);
        assert!(v.get_array().is_err());
        assert!(!v.get_boolean().unwrap());
    }

    #[test]
    fn test_add_element_appends() {
        let mut v = Value::Null;
        v.add_element(Value::from(1));
        v.add_element(Value::from(2));
        v.add_element(Value::from("three"));
        let items = v.get_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].get_string().unwrap(), "three");
    }

    #[test]
    fn test_add_member_upserts() {
        let mut v = Value::Null;
        v.add_member("a", Value::from(1));
        v.add_member("a", Value::from(2));
        let map = v.get_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a").unwrap().get_int().unwrap(), 2);
    }

    #[test]
    fn test_add_member_keeps_object_order() {
        let mut v = Value::object(MapOrder::Sorted);
        v.add_member("b", Value::Null);
        v.add_member("a", Value::Null);
        let map = v.get_object().unwrap();
        assert_eq!(map.order(), MapOrder::Sorted);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_add_member_ordered() {
        let mut v = Value::Null;
        v.add_member_ordered(MapOrder::Sorted, "b", Value::Null);
        v.add_member_ordered(MapOrder::Hashed, "a", Value::Null);
        let map = v.get_object().unwrap();
        // Only the conversion picks the order
        assert_eq!(map.order(), MapOrder::Sorted);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_entry_object_nests_in_parent_order() {
        let mut v = Value::object(MapOrder::Sorted);
        v.entry_object("outer")
            .unwrap()
            .entry_object("inner")
            .unwrap()
            .add_member("z", Value::from(1));
        let outer = v.get("outer").unwrap();
        assert_eq!(outer.get_object().unwrap().order(), MapOrder::Sorted);
        let inner = outer.get("inner").unwrap().get_object().unwrap();
        assert_eq!(inner.order(), MapOrder::Sorted);
        assert_eq!(inner.len(), 1);

        assert!(matches!(
            Value::from(3).entry_object("k"),
            Err(Error::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let v = Value::from(true);
        match v.get_string() {
            Err(Error::TypeMismatch(m)) => {
                assert_eq!(m.expected, "string");
                assert_eq!(m.found, "boolean");
            }
            other => panic!("expected type mismatch, got {:?}", other),
        }
        assert!(matches!(v.get_int(), Err(Error::TypeMismatch(_))));
        assert!(matches!(v.number_kind(), Err(Error::TypeMismatch(_))));
        assert!(matches!(Value::Null.get_object(), Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn test_raw_number_lazy_conversion() {
        let v = Value::raw_number("42");
        assert_eq!(v.number_kind().unwrap(), NumberKind::Raw);
        assert_eq!(v.get_int().unwrap(), 42);
        assert_eq!(v.get_double().unwrap(), 42.0);
        assert_eq!(v.get_number_string().unwrap(), "42");
        // Reading does not commit the value to a type.
        assert_eq!(v.number_kind().unwrap(), NumberKind::Raw);
    }

    #[test]
    fn test_raw_number_conversion_error() {
        let mut v = Value::Null;
        v.set_number_string("forty-two");
        match v.get_int() {
            Err(Error::NumberConversion(e)) => assert_eq!(e.kind, ConversionErrorKind::NotANumber),
            other => panic!("expected conversion error, got {:?}", other),
        }
    }

    #[test]
    fn test_concrete_number_read_polymorphically() {
        let mut v = Value::Null;
        v.set_int(7);
        assert_eq!(v.number_kind().unwrap(), NumberKind::Int);
        assert_eq!(v.get_int().unwrap(), 7);
        assert_eq!(v.get_uint().unwrap(), 7);
        assert_eq!(v.get_int64().unwrap(), 7);
        assert_eq!(v.get_uint64().unwrap(), 7);
        assert_eq!(v.get_int16().unwrap(), 7);
        assert_eq!(v.get_double().unwrap(), 7.0);
        assert_eq!(v.get_float().unwrap(), 7.0);
        assert!(v.get_number_string().is_err());
    }

    #[test]
    fn test_each_setter_records_kind() {
        let mut v = Value::Null;
        v.set_uint(1);
        assert_eq!(v.number_kind().unwrap(), NumberKind::Uint);
        v.set_int64(1);
        assert_eq!(v.number_kind().unwrap(), NumberKind::Int64);
        v.set_uint64(1);
        assert_eq!(v.number_kind().unwrap(), NumberKind::Uint64);
        v.set_double(1.0);
        assert_eq!(v.number_kind().unwrap(), NumberKind::Double);
        v.set_float(1.0);
        assert_eq!(v.number_kind().unwrap(), NumberKind::Float);
        v.set_int16(1);
        assert_eq!(v.number_kind().unwrap(), NumberKind::Int16);
    }

    #[test]
    fn test_nested_access() {
        let mut inner = Value::Null;
        inner.add_member("d", Value::from("x"));
        let mut outer = Value::Null;
        outer.add_member("c", inner);
        outer.add_member("list", Value::from(vec![Value::from(1), Value::from(2)]));

        let d = outer.get("c").and_then(|c| c.get("d")).unwrap();
        assert_eq!(d.get_string().unwrap(), "x");
        assert_eq!(
            outer.get("list").and_then(|l| l.get_index(1)).unwrap(),
            &Value::from(2)
        );
        assert!(outer.get_index(0).is_none());
    }

    #[test]
    fn test_mutable_container_access() {
        let mut v = Value::from(vec![Value::Null]);
        v.get_array_mut().unwrap()[0].set_string("filled");
        assert_eq!(v.get_index(0).unwrap().get_string().unwrap(), "filled");

        let mut obj = Value::object(MapOrder::Insertion);
        obj.get_object_mut().unwrap().insert("k", Value::from(1u64));
        assert_eq!(obj.get("k").unwrap().get_uint64().unwrap(), 1);
        assert!(Value::Null.get_array_mut().is_err());
    }
}
