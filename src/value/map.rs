//! Object payload with a runtime-selected backing container.

use std::collections::{btree_map, hash_map, BTreeMap};

use ahash::AHashMap;
use indexmap::IndexMap;

use super::Value;

/// Which container backs object members, and so the order they iterate
/// (and serialize) in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapOrder {
    /// Members keep the order they were first inserted in.
    #[default]
    Insertion,
    /// Members iterate in ascending key order.
    Sorted,
    /// Hash table; iteration order is unspecified and varies between runs.
    Hashed,
}

#[derive(Debug, Clone)]
enum Entries {
    Insertion(IndexMap<String, Value>),
    Sorted(BTreeMap<String, Value>),
    Hashed(AHashMap<String, Value>),
}

/// Mapping from unique string keys to values.
///
/// Equality compares contents only, so two maps with different
/// [`MapOrder`]s but the same members are equal.
#[derive(Debug, Clone)]
pub struct Map {
    entries: Entries,
}

impl Map {
    /// Creates an empty map with the default [`MapOrder`].
    pub fn new() -> Self {
        Self::with_order(MapOrder::default())
    }

    /// Creates an empty map backed by the container `order` selects.
    pub fn with_order(order: MapOrder) -> Self {
        let entries = match order {
            MapOrder::Insertion => Entries::Insertion(IndexMap::new()),
            MapOrder::Sorted => Entries::Sorted(BTreeMap::new()),
            MapOrder::Hashed => Entries::Hashed(AHashMap::new()),
        };
        Self { entries }
    }

    /// Returns the backing order.
    pub fn order(&self) -> MapOrder {
        match &self.entries {
            Entries::Insertion(_) => MapOrder::Insertion,
            Entries::Sorted(_) => MapOrder::Sorted,
            Entries::Hashed(_) => MapOrder::Hashed,
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        match &self.entries {
            Entries::Insertion(m) => m.len(),
            Entries::Sorted(m) => m.len(),
            Entries::Hashed(m) => m.len(),
        }
    }

    /// Returns true if the map has no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts or replaces the value at `key`, returning the previous value.
    ///
    /// Replacing keeps an insertion-ordered member in its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match &mut self.entries {
            Entries::Insertion(m) => m.insert(key, value),
            Entries::Sorted(m) => m.insert(key, value),
            Entries::Hashed(m) => m.insert(key, value),
        }
    }

    /// Get the value at `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.entries {
            Entries::Insertion(m) => m.get(key),
            Entries::Sorted(m) => m.get(key),
            Entries::Hashed(m) => m.get(key),
        }
    }

    /// Get a mutable reference to the value at `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match &mut self.entries {
            Entries::Insertion(m) => m.get_mut(key),
            Entries::Sorted(m) => m.get_mut(key),
            Entries::Hashed(m) => m.get_mut(key),
        }
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Look up `key`, inserting a null value first if it is absent.
    pub fn entry_or_null(&mut self, key: &str) -> &mut Value {
        match &mut self.entries {
            Entries::Insertion(m) => m.entry(key.to_owned()).or_default(),
            Entries::Sorted(m) => m.entry(key.to_owned()).or_default(),
            Entries::Hashed(m) => m.entry(key.to_owned()).or_default(),
        }
    }

    /// Look up `key` as an object. An absent or non-object member is first
    /// replaced by an empty object in this map's order.
    pub fn entry_object(&mut self, key: &str) -> &mut Value {
        let order = self.order();
        let slot = self.entry_or_null(key);
        if !slot.is_object() {
            *slot = Value::object(order);
        }
        slot
    }

    /// Iterate over members in the backing container's order.
    pub fn iter(&self) -> Iter<'_> {
        let inner = match &self.entries {
            Entries::Insertion(m) => IterInner::Insertion(m.iter()),
            Entries::Sorted(m) => IterInner::Sorted(m.iter()),
            Entries::Hashed(m) => IterInner::Hashed(m.iter()),
        };
        Iter { inner }
    }

    /// Iterate over keys in the backing container's order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over values in the backing container's order.
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl Extend<(String, Value)> for Map {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Iterator over the members of a [`Map`].
pub struct Iter<'a> {
    inner: IterInner<'a>,
}

enum IterInner<'a> {
    Insertion(indexmap::map::Iter<'a, String, Value>),
    Sorted(btree_map::Iter<'a, String, Value>),
    Hashed(hash_map::Iter<'a, String, Value>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Insertion(it) => it.next(),
            IterInner::Sorted(it) => it.next(),
            IterInner::Hashed(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IterInner::Insertion(it) => it.size_hint(),
            IterInner::Sorted(it) => it.size_hint(),
            IterInner::Hashed(it) => it.size_hint(),
        }
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
