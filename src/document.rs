//! The root object of a parsed or hand-built JSON text.

use std::ops::{Index, IndexMut};

use crate::value::{Iter, Map, MapOrder, Value};

static NULL: Value = Value::Null;

/// A JSON document: the mandatory top-level object.
///
/// `doc["key"]` in a mutable context looks the key up and inserts a null
/// value if it is missing. Read-only indexing never inserts and yields null
/// for a missing key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    members: Map,
}

impl Document {
    /// Creates an empty document with the default [`MapOrder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document whose root members follow `order`.
    pub fn with_order(order: MapOrder) -> Self {
        Self {
            members: Map::with_order(order),
        }
    }

    /// Member order of the root object.
    pub fn order(&self) -> MapOrder {
        self.members.order()
    }

    /// Inserts or replaces a root member.
    pub fn add_member(&mut self, key: impl Into<String>, value: Value) {
        self.members.insert(key, value);
    }

    /// Read-only view of every root member.
    pub fn get_member(&self) -> &Map {
        &self.members
    }

    /// Get a root member by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.members.get(key)
    }

    /// Get a mutable reference to a root member by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.members.get_mut(key)
    }

    /// Look up a root member, inserting a null value if it is absent.
    pub fn entry(&mut self, key: &str) -> &mut Value {
        self.members.entry_or_null(key)
    }

    /// Look up a root member as an object. An absent or non-object member is
    /// first replaced by an empty object in the document's order, so nested
    /// objects built this way serialize like parsed ones.
    pub fn entry_object(&mut self, key: &str) -> &mut Value {
        self.members.entry_object(key)
    }

    /// Number of root members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the document has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over root members.
    pub fn iter(&self) -> Iter<'_> {
        self.members.iter()
    }

    /// Converts the document into an object value, e.g. to nest it elsewhere.
    pub fn into_value(self) -> Value {
        Value::Object(self.members)
    }
}

impl From<Map> for Document {
    fn from(members: Map) -> Self {
        Self { members }
    }
}

impl Index<&str> for Document {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.members.get(key).unwrap_or(&NULL)
    }
}

impl IndexMut<&str> for Document {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.entry(key)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
