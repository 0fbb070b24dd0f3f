use std::rc::Rc;

use crate::sequence::{ItemIter, Sequence};

/// A sequence wrapping another sequence; iteration delegates entirely to
/// the inner one.
#[derive(Debug, Clone)]
pub struct Nested {
    inner: Rc<Sequence>,
}

impl Nested {
    pub(crate) fn new(inner: Sequence) -> Self {
        Self {
            inner: Rc::new(inner),
        }
    }

    pub(crate) fn inner(&self) -> &Sequence {
        &self.inner
    }

    pub(crate) fn iter(&self) -> ItemIter {
        self.inner.iter()
    }

    pub(crate) fn ptr_eq(&self, other: &Nested) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
