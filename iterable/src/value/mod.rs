//! Values.
//!
//! Sequences are heterogeneous: a single sequence may hold numbers, text,
//! tuples, mappings and other sequences. `Value` is the closed set of
//! things an element can be.
mod compare;
mod display;
mod map;

use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::sequence::Sequence;

pub(crate) use map::Entries;
pub use map::{Map, MapKey};

/// An element of a sequence.
#[derive(Debug, Clone)]
pub enum Value {
    /// The explicit "no value" marker.
    ///
    /// It may appear as an element (for instance when a projection finds
    /// nothing), but a sequence cannot be constructed from it.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integral number.
    Integer(i64),
    /// A floating point number, including the infinities and NaN.
    Float(OrderedFloat<f64>),
    /// Text. A text source yields one single-character string per `char`.
    String(Rc<str>),
    /// An ordered tuple. Zips, products, groups and permutations produce
    /// these.
    List(Rc<[Value]>),
    /// A keyed mapping that remembers insertion order.
    Map(Map),
    /// A nested lazy sequence.
    Sequence(Sequence),
}

impl Value {
    /// Build a list value from anything that yields values.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn float(f: f64) -> Self {
        Value::Float(OrderedFloat(f))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer value. Floats only qualify when they are integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(OrderedFloat(f)) => integral(*f),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(OrderedFloat(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    /// Truthiness, the default predicate of `all` and `any`.
    ///
    /// - `Null` and `false` are false.
    ///
    /// - Numbers are false if they are zero or NaN.
    ///
    /// - Strings are false if they are empty.
    ///
    /// - Lists, maps and sequences are always true, even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(OrderedFloat(f)) => !(*f == 0.0 || f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) | Value::Sequence(_) => true,
        }
    }

    /// A short name for the kind of value, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Sequence(_) => "sequence",
        }
    }
}

// The integer an integral float stands for. -2^63 and 2^63 are exact as
// floats; only the former fits an i64.
pub(crate) fn integral(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i.into())
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        match i64::try_from(u) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::float(u as f64),
        }
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        let mut buffer = [0; 4];
        Value::String(Rc::from(&*c.encode_utf8(&mut buffer)))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self {
        Value::String(s)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Sequence> for Value {
    fn from(sequence: Sequence) -> Self {
        Value::Sequence(sequence)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(option: Option<T>) -> Self {
        option.map_or(Value::Null, Into::into)
    }
}
