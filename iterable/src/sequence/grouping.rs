use std::rc::Rc;

use ahash::RandomState;
use indexmap::IndexMap;

use crate::error;
use crate::value::{Entries, Map, MapKey, Value};

use super::Sequence;

impl Sequence {
    /// Runs of adjacent equal elements, as `[element, [elements...]]`
    /// pairs.
    pub fn group_by(&self) -> Sequence {
        self.group_by_key(Value::clone)
    }

    /// Runs of adjacent elements with equal keys, as `[key, [elements...]]`
    /// pairs. Elements with the same key that are not adjacent end up in
    /// separate groups.
    pub fn group_by_key<K>(&self, key_fn: K) -> Sequence
    where
        K: Fn(&Value) -> Value + 'static,
    {
        let parent = self.clone();
        let key_fn = Rc::new(key_fn);
        Sequence::derived("group_by", move || {
            let key_fn = key_fn.clone();
            let mut iter = parent.iter();
            // the element that ended the previous group starts the next
            let mut pending: Option<(Value, Value)> = None;
            std::iter::from_fn(move || {
                let (key, first) = match pending.take() {
                    Some(pending) => pending,
                    None => match iter.next()? {
                        Ok(value) => (key_fn(&value), value),
                        Err(e) => return Some(Err(e)),
                    },
                };
                let mut group = vec![first];
                loop {
                    match iter.next() {
                        Some(Ok(value)) => {
                            let next_key = key_fn(&value);
                            if next_key == key {
                                group.push(value);
                            } else {
                                pending = Some((next_key, value));
                                break;
                            }
                        }
                        Some(Err(e)) => return Some(Err(e)),
                        None => break,
                    }
                }
                Some(Ok(Value::list([key, Value::list(group)])))
            })
        })
    }

    /// Group all elements by themselves, wherever they occur.
    pub fn group_all(&self) -> error::Result<Map> {
        self.group_all_by(Value::clone)
    }

    /// Group all elements by `key_fn`, wherever they occur. Every group is
    /// the list of its elements, in order.
    pub fn group_all_by<K>(&self, key_fn: K) -> error::Result<Map>
    where
        K: Fn(&Value) -> Value,
    {
        let mut groups: IndexMap<MapKey, Vec<Value>, RandomState> = IndexMap::default();
        for item in self.iter() {
            let value = item?;
            let key = MapKey::new(&key_fn(&value))?;
            groups.entry(key).or_default().push(value);
        }
        let entries = groups
            .into_iter()
            .map(|(key, group)| (key, Value::list(group)))
            .collect::<Entries>();
        Ok(entries.into())
    }

    /// Group all elements by `key_fn`, folding every group with `acc`.
    ///
    /// `acc` receives the value accumulated so far for the group (`None`
    /// for the first element of a group) and the element.
    pub fn group_all_with<K, A>(&self, key_fn: K, acc: A) -> error::Result<Map>
    where
        K: Fn(&Value) -> Value,
        A: Fn(Option<Value>, Value) -> Value,
    {
        let mut entries = Entries::default();
        for item in self.iter() {
            let value = item?;
            let key = MapKey::new(&key_fn(&value))?;
            match entries.get_mut(&key) {
                Some(slot) => {
                    let current = std::mem::replace(slot, Value::Null);
                    *slot = acc(Some(current), value);
                }
                None => {
                    let first = acc(None, value);
                    entries.insert(key, first);
                }
            }
        }
        Ok(entries.into())
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn upper(value: &Value) -> Value {
        Value::from(value.to_string().to_uppercase())
    }

    #[test]
    fn test_group_by_key() {
        let groups = Sequence::from("aAbB").group_by_key(upper);
        assert_snapshot!(groups.join(" ").unwrap(), @"A,a,A B,b,B");
    }

    #[test]
    fn test_group_by_is_restartable() {
        let groups = Sequence::from("aab").group_by();
        assert_eq!(groups.count(), Ok(2));
        assert_eq!(groups.count(), Ok(2));
    }

    #[test]
    fn test_group_all_by() {
        let groups = Sequence::from("abA").group_all_by(upper).unwrap();
        assert_snapshot!(Value::from(groups), @"{A: a,A, B: b}");
    }

    #[test]
    fn test_group_all_with_counts() {
        let counts = Sequence::from("abABb")
            .group_all_with(upper, |count, _| {
                Value::from(count.and_then(|count| count.as_i64()).unwrap_or(0) + 1)
            })
            .unwrap();
        assert_snapshot!(Value::from(counts), @"{A: 2, B: 3}");
    }

    #[test]
    fn test_group_all_rejects_unhashable_keys() {
        let sequence = Sequence::from(vec![Value::list([1])]);
        assert_eq!(sequence.group_all().unwrap_err().code(), "ArgumentError");
    }
}
