use std::rc::Rc;

use crate::error;
use crate::value::Value;

/// An ordered list of values, yielded in index order.
#[derive(Debug, Clone)]
pub struct Indexed {
    items: Rc<[Value]>,
}

impl Indexed {
    pub(crate) fn new(items: Rc<[Value]>) -> Self {
        Self { items }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn iter(&self) -> IndexedIter {
        IndexedIter {
            items: self.items.clone(),
            index: 0,
        }
    }

    pub(crate) fn ptr_eq(&self, other: &Indexed) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }
}

impl From<Vec<Value>> for Indexed {
    fn from(items: Vec<Value>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

pub struct IndexedIter {
    items: Rc<[Value]>,
    index: usize,
}

impl Iterator for IndexedIter {
    type Item = error::Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.get(self.index)?.clone();
        self.index += 1;
        Some(Ok(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}
