use std::rc::Rc;

use crate::error;
use crate::value::Value;

use super::Sequence;

type Predicate = Rc<dyn Fn(&Value) -> bool>;

// Start offsets before the first element clamp to it. Offsets past the
// end need no clamping: nothing is found there.
fn clamp_start(start: isize) -> usize {
    usize::try_from(start).unwrap_or(0)
}

impl Sequence {
    /// Whether the sequence has no elements. Pulls at most one element.
    pub fn is_empty(&self) -> error::Result<bool> {
        Ok(self.iter().next().transpose()?.is_none())
    }

    /// The number of elements. Consumes the whole sequence.
    pub fn count(&self) -> error::Result<usize> {
        let mut count = 0;
        for item in self.iter() {
            item?;
            count += 1;
        }
        Ok(count)
    }

    /// The position of the first element equal to `value`.
    pub fn index_of(&self, value: &Value) -> error::Result<Option<usize>> {
        self.index_of_from(value, 0)
    }

    /// The position of the first element at or after `start` equal to
    /// `value`. A negative `start` counts as 0.
    pub fn index_of_from(&self, value: &Value, start: isize) -> error::Result<Option<usize>> {
        self.find_position(|item| item == value, clamp_start(start))
    }

    /// The position of the first element satisfying `pred`.
    pub fn index_where<P>(&self, pred: P) -> error::Result<Option<usize>>
    where
        P: Fn(&Value) -> bool,
    {
        self.index_where_from(pred, 0)
    }

    pub fn index_where_from<P>(&self, pred: P, start: isize) -> error::Result<Option<usize>>
    where
        P: Fn(&Value) -> bool,
    {
        self.find_position(pred, clamp_start(start))
    }

    /// The positions of all elements equal to `value`, lazily.
    pub fn indices_of(&self, value: impl Into<Value>) -> Sequence {
        self.indices_of_from(value, 0)
    }

    pub fn indices_of_from(&self, value: impl Into<Value>, start: isize) -> Sequence {
        let value = value.into();
        self.positions("indices_of", Rc::new(move |item: &Value| *item == value), start)
    }

    /// The positions of all elements satisfying `pred`, lazily.
    pub fn indices_where<P>(&self, pred: P) -> Sequence
    where
        P: Fn(&Value) -> bool + 'static,
    {
        self.indices_where_from(pred, 0)
    }

    pub fn indices_where_from<P>(&self, pred: P, start: isize) -> Sequence
    where
        P: Fn(&Value) -> bool + 'static,
    {
        self.positions("indices_where", Rc::new(pred), start)
    }

    fn find_position<P>(&self, pred: P, start: usize) -> error::Result<Option<usize>>
    where
        P: Fn(&Value) -> bool,
    {
        for (i, item) in self.iter().enumerate() {
            let item = item?;
            if i >= start && pred(&item) {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    fn positions(&self, name: &'static str, pred: Predicate, start: isize) -> Sequence {
        let parent = self.clone();
        let start = clamp_start(start);
        Sequence::derived(name, move || {
            let pred = pred.clone();
            parent
                .iter()
                .enumerate()
                .filter_map(move |(i, item)| match item {
                    Ok(item) => (i >= start && pred(&item)).then(|| Ok(Value::from(i))),
                    Err(e) => Some(Err(e)),
                })
        })
    }
}
