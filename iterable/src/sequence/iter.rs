use std::iter::FusedIterator;

use crate::error;
use crate::value::Value;

type BoxedIter = Box<dyn Iterator<Item = error::Result<Value>>>;

/// A pull-function: the single-use iteration state over a sequence.
///
/// Each call to `next` yields the next element, an error if producing the
/// element failed, or `None` once the sequence is exhausted. After `None`
/// or an error every later call yields `None` again; an exhausted
/// `ItemIter` never resumes.
pub struct ItemIter {
    inner: Option<BoxedIter>,
}

impl ItemIter {
    pub(crate) fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = error::Result<Value>> + 'static,
    {
        Self {
            inner: Some(Box::new(iter)),
        }
    }

    /// A pull-function whose only outcome is `error`.
    pub(crate) fn failing(error: error::Error) -> Self {
        Self::new(std::iter::once(Err(error)))
    }
}

impl Iterator for ItemIter {
    type Item = error::Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let iter = self.inner.as_mut()?;
        match iter.next() {
            Some(Ok(value)) => Some(Ok(value)),
            Some(Err(e)) => {
                self.inner = None;
                Some(Err(e))
            }
            None => {
                self.inner = None;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(iter) => iter.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for ItemIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustion_is_idempotent() {
        let mut iter = ItemIter::new(vec![Ok(Value::from(1))].into_iter());
        assert_eq!(iter.next(), Some(Ok(Value::from(1))));
        for _ in 0..3 {
            assert_eq!(iter.next(), None);
        }
    }

    #[test]
    fn test_error_is_terminal() {
        let items = vec![
            Ok(Value::from(1)),
            Err(error::Error::EmptySequence),
            Ok(Value::from(2)),
        ];
        let mut iter = ItemIter::new(items.into_iter());
        assert_eq!(iter.next(), Some(Ok(Value::from(1))));
        assert_eq!(iter.next(), Some(Err(error::Error::EmptySequence)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_inner_iterator_that_resumes_is_not_consulted() {
        let mut calls = 0;
        let flaky = std::iter::from_fn(move || {
            calls += 1;
            if calls == 1 {
                None
            } else {
                Some(Ok(Value::from(calls)))
            }
        });
        let mut iter = ItemIter::new(flaky);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }
}
