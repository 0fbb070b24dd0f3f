//! A sequence is a lazy, restartable description of how to produce values.
//!
//! Sources (lists, text, maps, single values, other sequences) are
//! classified once, into one of the variants in `variant`. Combinators wrap
//! sequences into new ones without evaluating anything; terminal operations
//! drive the evaluation by pulling through the chain down to the source.
mod builders;
mod combinatorics;
mod core;
mod fold;
mod grouping;
mod iter;
mod materialize;
mod multi;
mod search;
mod select;
mod set;
mod slicing;
mod transform;
mod variant;

pub use self::core::{iterable, Sequence};
pub use fold::DEFAULT_SEPARATOR;
pub use iter::ItemIter;
pub use select::Selector;
pub use variant::{Derived, Indexed, Keyed, Nested, Range, Singleton, Text};
