use std::cmp::Ordering;

use crate::error;
use crate::value::{Entries, Map, MapKey, Value};

use super::Sequence;

// Eager operations. Everything here pulls the whole sequence into memory
// before producing anything; the results that are sequences replay that
// buffer.
impl Sequence {
    /// All elements, in order.
    pub fn to_vec(&self) -> error::Result<Vec<Value>> {
        self.iter().collect()
    }

    /// A map from `[key, value]` elements. A key that occurs again replaces
    /// the value but keeps the position of its first occurrence.
    pub fn to_map(&self) -> error::Result<Map> {
        let mut entries = Entries::default();
        for item in self.iter() {
            let item = item?;
            match item.as_list() {
                Some([key, value]) => {
                    entries.insert(MapKey::new(key)?, value.clone());
                }
                _ => {
                    return Err(error::Error::argument(format!(
                        "expected a [key, value] pair, got {}",
                        item
                    )))
                }
            }
        }
        Ok(entries.into())
    }

    /// The elements in reverse order.
    pub fn reverse(&self) -> error::Result<Sequence> {
        let mut buffer = self.to_vec()?;
        buffer.reverse();
        Ok(buffer.into_iter().collect())
    }

    /// The elements in natural order. The sort is stable.
    pub fn sorted(&self) -> error::Result<Sequence> {
        self.sorted_by(Value::natural_cmp)
    }

    pub fn sorted_by<C>(&self, cmp: C) -> error::Result<Sequence>
    where
        C: FnMut(&Value, &Value) -> Ordering,
    {
        let mut buffer = self.to_vec()?;
        buffer.sort_by(cmp);
        Ok(buffer.into_iter().collect())
    }

    /// Every element whose evaluation is the greatest, in order.
    ///
    /// ```
    /// use iterable::{Sequence, Value};
    ///
    /// let sequence = Sequence::range(7);
    /// let greater = sequence
    ///     .greater(|value| Value::from(value.as_i64().unwrap() % 3))
    ///     .unwrap();
    /// assert_eq!(greater, vec![Value::from(2), Value::from(5)]);
    /// ```
    pub fn greater<E>(&self, eval: E) -> error::Result<Vec<Value>>
    where
        E: Fn(&Value) -> Value,
    {
        self.extremes(eval, Ordering::Greater)
    }

    /// Every element whose evaluation is the least, in order.
    pub fn lesser<E>(&self, eval: E) -> error::Result<Vec<Value>>
    where
        E: Fn(&Value) -> Value,
    {
        self.extremes(eval, Ordering::Less)
    }

    fn extremes<E>(&self, eval: E, wanted: Ordering) -> error::Result<Vec<Value>>
    where
        E: Fn(&Value) -> Value,
    {
        let mut best: Option<Value> = None;
        let mut winners = Vec::new();
        for item in self.iter() {
            let value = item?;
            let score = eval(&value);
            let ordering = match &best {
                Some(best) => score.natural_cmp(best),
                None => wanted,
            };
            if ordering == wanted {
                // a new extremum: the earlier candidates are out
                best = Some(score);
                winners.clear();
                winners.push(value);
            } else if ordering == Ordering::Equal {
                winners.push(value);
            }
        }
        Ok(winners)
    }

    /// At most `n` elements at evenly spaced positions, first and last
    /// included. A sequence of at most `n` elements is returned as it is.
    pub fn sample(&self, n: usize) -> error::Result<Sequence> {
        if self.len_hint().is_some_and(|len| len <= n) {
            return Ok(self.clone());
        }
        let buffer = self.to_vec()?;
        let len = buffer.len();
        if len <= n {
            return Ok(self.clone());
        }
        let positions: Box<dyn Iterator<Item = usize>> = match n {
            0 => Box::new(std::iter::empty()),
            1 => Box::new(std::iter::once(0)),
            _ => Box::new((0..n).map(move |i| i * (len - 1) / (n - 1))),
        };
        Ok(positions.map(|position| buffer[position].clone()).collect())
    }

    /// Consecutive chunks of `n` elements; the last one may be shorter.
    pub fn slices(&self, n: usize) -> error::Result<Sequence> {
        if n == 0 {
            return Err(error::Error::argument("slice size must be positive"));
        }
        let parent = self.clone();
        Ok(Sequence::derived("slices", move || {
            let mut iter = parent.iter();
            std::iter::from_fn(move || {
                let mut chunk = Vec::with_capacity(n);
                while chunk.len() < n {
                    match iter.next() {
                        Some(Ok(value)) => chunk.push(value),
                        Some(Err(e)) => return Some(Err(e)),
                        None => break,
                    }
                }
                (!chunk.is_empty()).then(|| Ok(Value::list(chunk)))
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn test_to_map_keeps_last_value_at_first_position() {
        let pairs = Sequence::from(vec![
            Value::list([Value::from("a"), Value::from(1)]),
            Value::list([Value::from("b"), Value::from(2)]),
            Value::list([Value::from("a"), Value::from(3)]),
        ]);
        assert_snapshot!(Value::from(pairs.to_map().unwrap()), @"{a: 3, b: 2}");
    }

    #[test]
    fn test_to_map_rejects_non_pairs() {
        let err = Sequence::from(vec![Value::list([1, 2, 3])]).to_map().unwrap_err();
        assert_snapshot!(err, @"invalid argument: expected a [key, value] pair, got 1,2,3");
    }

    #[test]
    fn test_to_map_of_keyed_source_round_trips() {
        let map = Map::from_entries([("x", 1), ("y", 2)]);
        assert_eq!(Sequence::from(map.clone()).to_map(), Ok(map));
    }

    #[test]
    fn test_reverse_is_an_involution() {
        let sequence = Sequence::from("abc");
        let twice = sequence.reverse().unwrap().reverse().unwrap();
        assert_eq!(twice.to_vec(), sequence.to_vec());
    }

    #[test]
    fn test_sorted_by_descending() {
        let sorted = Sequence::from(vec![1, 3, 2])
            .sorted_by(|a, b| b.natural_cmp(a))
            .unwrap();
        assert_eq!(sorted.join(""), Ok("321".to_string()));
    }

    #[test]
    fn test_lesser_discards_earlier_candidates() {
        let lesser = Sequence::from(vec![5, 4, 1, 7, 1])
            .lesser(Value::clone)
            .unwrap();
        assert_eq!(lesser, vec![Value::from(1), Value::from(1)]);
    }

    #[test]
    fn test_sample_spacing() {
        let sample = Sequence::range(10).sample(4).unwrap();
        assert_eq!(sample.join(","), Ok("0,3,6,9".to_string()));
    }

    #[test]
    fn test_sample_of_derived_sequence() {
        let short = Sequence::range(3).map(|value, _| value.clone());
        assert!(short.sample(3).unwrap().same_recipe(&short));
        assert_eq!(short.sample(2).unwrap().join(","), Ok("0,2".to_string()));
    }

    #[test]
    fn test_slices_of_zero_is_argument_error() {
        let err = Sequence::from("ab").slices(0).unwrap_err();
        assert_eq!(err.code(), "ArgumentError");
    }
}
