use std::fmt;
use std::rc::Rc;

use ahash::RandomState;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::error;

use super::{integral, Value};

pub(crate) type Entries = IndexMap<MapKey, Value, RandomState>;

// A map key is the hashable subset of Value. Integral floats are stored as
// integers, so that 1 and 1.0 address the same entry, in line with how
// values compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MapKey {
    Bool(bool),
    Integer(i64),
    Float(OrderedFloat<f64>),
    String(Rc<str>),
}

impl MapKey {
    /// Build a key from a value.
    ///
    /// Null, lists, maps and sequences cannot be keys.
    pub fn new(value: &Value) -> error::Result<MapKey> {
        match value {
            Value::Bool(b) => Ok(MapKey::Bool(*b)),
            Value::Integer(i) => Ok(MapKey::Integer(*i)),
            Value::Float(f) => match integral(f.0) {
                Some(i) => Ok(MapKey::Integer(i)),
                None => Ok(MapKey::Float(*f)),
            },
            Value::String(s) => Ok(MapKey::String(s.clone())),
            other => Err(error::Error::argument(format!(
                "a {} cannot be used as a map key",
                other.kind_name()
            ))),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            MapKey::Bool(b) => Value::Bool(*b),
            MapKey::Integer(i) => Value::Integer(*i),
            MapKey::Float(f) => Value::Float(*f),
            MapKey::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::String(s.into())
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey::String(s.into())
    }
}

impl From<i64> for MapKey {
    fn from(i: i64) -> Self {
        MapKey::Integer(i)
    }
}

impl From<bool> for MapKey {
    fn from(b: bool) -> Self {
        MapKey::Bool(b)
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_value(), f)
    }
}

/// A keyed mapping. Entries enumerate in insertion order; replacing the
/// value of an existing key keeps the key's original position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(Rc<Entries>);

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<MapKey>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Entries::default();
        for (key, value) in entries {
            map.insert(key.into(), value.into());
        }
        Self(Rc::new(map))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: impl Into<MapKey>) -> Option<&Value> {
        self.0.get(&key.into())
    }

    pub(crate) fn get_key(&self, key: &MapKey) -> Option<&Value> {
        self.0.get(key)
    }

    /// The entry at a position in enumeration order.
    pub fn get_index(&self, index: usize) -> Option<(&MapKey, &Value)> {
        self.0.get_index(index)
    }

    pub fn keys(&self) -> impl Iterator<Item = &MapKey> + '_ {
        self.0.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &Value)> + '_ {
        self.0.iter()
    }

    /// A new map with `key` set to `value`.
    pub fn put(&self, key: impl Into<MapKey>, value: impl Into<Value>) -> Self {
        let mut map = self.0.as_ref().clone();
        map.insert(key.into(), value.into());
        Self(Rc::new(map))
    }

    pub(crate) fn ptr_eq(&self, other: &Map) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Entries> for Map {
    fn from(entries: Entries) -> Self {
        Self(Rc::new(entries))
    }
}
