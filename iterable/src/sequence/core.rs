// The Sequence is a closed set of source kinds plus one variant for
// everything computed from other sequences. The source kind is decided once,
// when the sequence is constructed; afterwards iteration just dispatches on
// the variant.

// The combinators live in the sibling modules, each in an `impl Sequence`
// block of their own:
// search.rs: is_empty, count, index/indices
// transform.rs: map, filter and their tuple-applying forms, select
// slicing.rs: take, drop, head, last, tail, init
// multi.rs: zip, product, chain, flatten
// set.rs: nub, union, intersection, difference
// grouping.rs: group_by, group_all
// fold.rs: folds, scans, numeric and boolean reductions, join
// materialize.rs: to_vec, to_map, reverse, sorted, greater/lesser, sample, slices
// combinatorics.rs: permutations, combinations
// builders.rs: range, repeat, iterate, cycle

use std::rc::Rc;

use crate::error;
use crate::value::{Map, Value};

use super::iter::ItemIter;
use super::variant::{Derived, Indexed, Keyed, Nested, Range, Singleton, Text};

/// A lazy, restartable sequence of values.
///
/// A `Sequence` does not hold iteration state: it describes how to produce
/// elements. Every call to [`Sequence::iter`] gives an independent
/// pull-function, and nothing a pull-function does is visible to any other.
/// Cloning is cheap.
#[derive(Debug, Clone)]
pub enum Sequence {
    /// An ordered list, yielded item by item.
    Indexed(Indexed),
    /// Text, yielded character by character.
    Text(Text),
    /// A keyed mapping, yielded as `[key, value]` pairs.
    Keyed(Keyed),
    /// Any other value, yielded once.
    Singleton(Singleton),
    /// Another sequence, which iteration delegates to.
    Nested(Nested),
    /// An arithmetic progression.
    Range(Range),
    /// A sequence computed from other sequences by a combinator or builder.
    Derived(Derived),
}

impl Sequence {
    /// Construct a sequence from a source value.
    ///
    /// - A list is iterated in order.
    ///
    /// - A string is iterated per character.
    ///
    /// - A map is iterated as `[key, value]` pairs in enumeration order.
    ///
    /// - A sequence is wrapped; iteration delegates to it.
    ///
    /// - `Null` cannot be iterated and is a construction error.
    ///
    /// - Any other value is a singleton.
    pub fn new(source: impl Into<Value>) -> error::Result<Self> {
        match source.into() {
            Value::Null => Err(error::Error::Construction),
            Value::List(items) => Ok(Self::Indexed(Indexed::new(items))),
            Value::String(text) => Ok(Self::Text(Text::new(text))),
            Value::Map(map) => Ok(Self::Keyed(Keyed::new(map))),
            Value::Sequence(inner) => Ok(Self::Nested(Nested::new(inner))),
            other => Ok(Self::Singleton(Singleton::new(other))),
        }
    }

    /// Construct a sequence from a source that may not have been supplied.
    pub fn from_option(source: Option<Value>) -> error::Result<Self> {
        match source {
            Some(value) => Self::new(value),
            None => Err(error::Error::Construction),
        }
    }

    /// The sequence without elements.
    pub fn empty() -> Self {
        Self::Indexed(Vec::<Value>::new().into())
    }

    /// Obtain a fresh pull-function over this sequence.
    pub fn iter(&self) -> ItemIter {
        match self {
            Sequence::Indexed(inner) => ItemIter::new(inner.iter()),
            Sequence::Text(inner) => ItemIter::new(inner.iter()),
            Sequence::Keyed(inner) => ItemIter::new(inner.iter()),
            Sequence::Singleton(inner) => ItemIter::new(inner.iter()),
            Sequence::Nested(inner) => inner.iter(),
            Sequence::Range(inner) => ItemIter::new(inner.iter()),
            Sequence::Derived(inner) => inner.iter(),
        }
    }

    /// The number of elements, when it is known without iterating.
    ///
    /// Sources know their length; sequences computed by combinators do not.
    pub fn len_hint(&self) -> Option<usize> {
        match self {
            Sequence::Indexed(inner) => Some(inner.len()),
            Sequence::Text(inner) => Some(inner.len()),
            Sequence::Keyed(inner) => Some(inner.len()),
            Sequence::Singleton(_) => Some(1),
            Sequence::Nested(inner) => inner.inner().len_hint(),
            Sequence::Range(inner) => Some(inner.len()),
            Sequence::Derived(_) => None,
        }
    }

    /// Whether both sequences are built from the very same recipe.
    ///
    /// This is the notion of equality used when sequences appear as values.
    pub fn same_recipe(&self, other: &Sequence) -> bool {
        match (self, other) {
            (Sequence::Indexed(a), Sequence::Indexed(b)) => a.ptr_eq(b),
            (Sequence::Text(a), Sequence::Text(b)) => a.ptr_eq(b),
            (Sequence::Keyed(a), Sequence::Keyed(b)) => a.ptr_eq(b),
            (Sequence::Singleton(a), Sequence::Singleton(b)) => a.ptr_eq(b),
            (Sequence::Nested(a), Sequence::Nested(b)) => a.ptr_eq(b),
            (Sequence::Range(a), Sequence::Range(b)) => a == b,
            (Sequence::Derived(a), Sequence::Derived(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Wrap a recipe as a derived sequence. `name` only shows up in the
    /// debug representation.
    pub(crate) fn derived<F, I>(name: &'static str, recipe: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: Iterator<Item = error::Result<Value>> + 'static,
    {
        Self::Derived(Derived::new(name, move || ItemIter::new(recipe())))
    }

    /// A derived sequence that materializes this one on its first pull and
    /// yields whatever `build` makes of the buffer. Every pull-function
    /// takes its own buffer.
    pub(crate) fn derive_buffered<F, I>(&self, name: &'static str, build: F) -> Self
    where
        F: Fn(Vec<Value>) -> I + 'static,
        I: Iterator<Item = Value> + 'static,
    {
        let parent = self.clone();
        let build = Rc::new(build);
        Self::derived(name, move || {
            let parent = parent.clone();
            let build = build.clone();
            let mut output: Option<I> = None;
            std::iter::from_fn(move || {
                if output.is_none() {
                    match parent.to_vec() {
                        Ok(buffer) => output = Some(build(buffer)),
                        Err(e) => return Some(Err(e)),
                    }
                }
                output.as_mut()?.next().map(Ok)
            })
        })
    }
}

/// Make a sequence out of a value, reusing it if it already is one.
///
/// Unlike [`Sequence::new`] this does not wrap a sequence in another.
pub fn iterable(source: impl Into<Value>) -> error::Result<Sequence> {
    match source.into() {
        Value::Sequence(sequence) => Ok(sequence),
        other => Sequence::new(other),
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for Sequence
where
    T: Into<Value>,
{
    fn from(items: Vec<T>) -> Self {
        let items = items.into_iter().map(Into::into).collect::<Vec<Value>>();
        Self::Indexed(items.into())
    }
}

impl From<&str> for Sequence {
    fn from(text: &str) -> Self {
        Self::Text(Text::new(text.into()))
    }
}

impl From<String> for Sequence {
    fn from(text: String) -> Self {
        Self::Text(Text::new(text.into()))
    }
}

impl From<Map> for Sequence {
    fn from(map: Map) -> Self {
        Self::Keyed(Keyed::new(map))
    }
}

impl From<Range> for Sequence {
    fn from(range: Range) -> Self {
        Self::Range(range)
    }
}

impl From<&Sequence> for Sequence {
    fn from(sequence: &Sequence) -> Self {
        sequence.clone()
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Indexed(iter.into_iter().collect::<Vec<_>>().into())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = error::Result<Value>;
    type IntoIter = ItemIter;

    fn into_iter(self) -> ItemIter {
        self.iter()
    }
}
