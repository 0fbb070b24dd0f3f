use crate::error;
use crate::value::{Map, Value};

/// A keyed mapping, yielded as `[key, value]` pairs in enumeration order.
#[derive(Debug, Clone)]
pub struct Keyed {
    map: Map,
}

impl Keyed {
    pub(crate) fn new(map: Map) -> Self {
        Self { map }
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn iter(&self) -> KeyedIter {
        KeyedIter {
            map: self.map.clone(),
            index: 0,
        }
    }

    pub(crate) fn ptr_eq(&self, other: &Keyed) -> bool {
        self.map.ptr_eq(&other.map)
    }
}

pub struct KeyedIter {
    map: Map,
    index: usize,
}

impl Iterator for KeyedIter {
    type Item = error::Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.map.get_index(self.index)?;
        let pair = Value::list([key.to_value(), value.clone()]);
        self.index += 1;
        Some(Ok(pair))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.map.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}
