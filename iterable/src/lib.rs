//! Lazy, restartable sequences over heterogeneous values.
//!
//! A [`Sequence`] is built from a source value (a list, text, a map, any
//! single value or another sequence) and transformed with combinators that
//! do no work until the result is pulled from. Every call to
//! [`Sequence::iter`] starts an independent iteration.
//!
//! ```
//! use iterable::{iterable, Sequence, Value};
//!
//! let words = iterable("abcd").unwrap().combinations(Some(3));
//! let words = words.map(|word, _| Value::from(word.to_string().replace(',', "")));
//! assert_eq!(words.join(" ").unwrap(), "abc abd acd bcd");
//!
//! assert_eq!(Sequence::range_step(0, 10, 3).join(",").unwrap(), "0,3,6,9");
//! ```
pub mod error;
pub mod sequence;
pub mod value;

pub use crate::error::{Error, Result};
pub use crate::sequence::{iterable, ItemIter, Selector, Sequence, DEFAULT_SEPARATOR};
pub use crate::value::{Map, MapKey, Value};
