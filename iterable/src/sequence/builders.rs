use std::rc::Rc;

use crate::value::Value;

use super::variant::Range;
use super::Sequence;

impl Sequence {
    /// The integers `0, 1, ..., end - 1`.
    pub fn range(end: i64) -> Sequence {
        Sequence::range_step(0, end, 1)
    }

    /// The integers from `start` up to, but not including, `end`.
    pub fn range_from(start: i64, end: i64) -> Sequence {
        Sequence::range_step(start, end, 1)
    }

    /// The integers from `start` towards `end` (exclusive) in increments of
    /// `step`. A step that does not progress towards `end` gives an empty
    /// sequence.
    pub fn range_step(start: i64, end: i64, step: i64) -> Sequence {
        Sequence::Range(Range::new(start, end, step))
    }

    /// `value`, over and over without end.
    pub fn repeat(value: impl Into<Value>) -> Sequence {
        let value = value.into();
        Sequence::derived("repeat", move || std::iter::repeat(value.clone()).map(Ok))
    }

    /// `value`, `n` times.
    pub fn repeat_n(value: impl Into<Value>, n: usize) -> Sequence {
        let value = value.into();
        Sequence::derived("repeat", move || {
            std::iter::repeat(value.clone()).take(n).map(Ok)
        })
    }

    /// `seed`, `f(seed)`, `f(f(seed))`, ... without end.
    pub fn iterate<F>(f: F, seed: impl Into<Value>) -> Sequence
    where
        F: Fn(&Value) -> Value + 'static,
    {
        Sequence::iteration(f, seed.into(), None)
    }

    /// The first `n` elements of [`Sequence::iterate`].
    pub fn iterate_n<F>(f: F, seed: impl Into<Value>, n: usize) -> Sequence
    where
        F: Fn(&Value) -> Value + 'static,
    {
        Sequence::iteration(f, seed.into(), Some(n))
    }

    fn iteration<F>(f: F, seed: Value, n: Option<usize>) -> Sequence
    where
        F: Fn(&Value) -> Value + 'static,
    {
        let f = Rc::new(f);
        Sequence::derived("iterate", move || {
            let f = f.clone();
            let seed = seed.clone();
            // `f` runs only when the next element is asked for
            let mut current: Option<Value> = None;
            std::iter::from_fn(move || {
                let next = match current.take() {
                    Some(previous) => f(&previous),
                    None => seed.clone(),
                };
                current = Some(next.clone());
                Some(Ok(next))
            })
            .take(n.unwrap_or(usize::MAX))
        })
    }

    /// This sequence, `times` times over.
    pub fn cycle(&self, times: usize) -> Sequence {
        let parent = self.clone();
        Sequence::derived("cycle", move || {
            let parent = parent.clone();
            (0..times).flat_map(move |_| parent.iter())
        })
    }

    /// This sequence over and over. A round that yields nothing ends the
    /// cycle, so an empty sequence cycles into an empty sequence.
    pub fn cycle_forever(&self) -> Sequence {
        let parent = self.clone();
        Sequence::derived("cycle", move || {
            let parent = parent.clone();
            let mut iter = parent.iter();
            let mut round_is_empty = true;
            std::iter::from_fn(move || loop {
                match iter.next() {
                    Some(item) => {
                        round_is_empty = false;
                        return Some(item);
                    }
                    None if round_is_empty => return None,
                    None => {
                        round_is_empty = true;
                        iter = parent.iter();
                    }
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_range_is_a_source() {
        assert_eq!(Sequence::range_step(0, 10, 3).len_hint(), Some(4));
        assert_eq!(Sequence::range_step(10, 0, -3).join(","), Ok("10,7,4,1".to_string()));
        assert_eq!(Sequence::range_step(0, 10, 0).count(), Ok(0));
    }

    #[test]
    fn test_repeat_n() {
        assert_eq!(Sequence::repeat_n("x", 3).join(""), Ok("xxx".to_string()));
        assert_eq!(Sequence::repeat_n("x", 0).count(), Ok(0));
    }

    #[test]
    fn test_iterate_calls_f_only_when_needed() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let doubling = Sequence::iterate_n(
            move |value| {
                counter.set(counter.get() + 1);
                Value::from(value.as_i64().unwrap() * 2)
            },
            1,
            6,
        );
        assert_eq!(doubling.join(","), Ok("1,2,4,8,16,32".to_string()));
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_cycle_forever() {
        let cycled = Sequence::from("ab").cycle_forever().take(5);
        assert_eq!(cycled.join(""), Ok("ababa".to_string()));
        assert_eq!(Sequence::empty().cycle_forever().count(), Ok(0));
    }
}
