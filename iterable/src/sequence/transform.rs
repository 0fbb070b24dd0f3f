use std::rc::Rc;

use crate::error;
use crate::value::Value;

use super::Sequence;

// The elements of a tuple-shaped value, for the operations that spread a
// tuple over the arguments of a function.
fn tuple(value: &Value) -> error::Result<&[Value]> {
    value.as_list().ok_or_else(|| {
        error::Error::argument(format!("expected a list element, got a {}", value.kind_name()))
    })
}

impl Sequence {
    /// Apply `f` to every element and its position.
    pub fn map<F>(&self, f: F) -> Sequence
    where
        F: Fn(&Value, usize) -> Value + 'static,
    {
        self.derive_filter_map("map", move |value, i| Some(Ok(f(&value, i))))
    }

    /// Apply `f` to the elements that satisfy `pred`; the others are
    /// skipped. `f` receives the position of the element in this sequence.
    pub fn map_filtered<F, P>(&self, f: F, pred: P) -> Sequence
    where
        F: Fn(&Value, usize) -> Value + 'static,
        P: Fn(&Value, usize) -> bool + 'static,
    {
        self.derive_filter_map("map", move |value, i| {
            pred(&value, i).then(|| Ok(f(&value, i)))
        })
    }

    /// Apply `f` to the fields of every element, which must be a list.
    pub fn map_apply<F>(&self, f: F) -> Sequence
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        self.derive_filter_map("map_apply", move |value, _| Some(tuple(&value).map(&f)))
    }

    pub fn map_apply_filtered<F, P>(&self, f: F, pred: P) -> Sequence
    where
        F: Fn(&[Value]) -> Value + 'static,
        P: Fn(&[Value]) -> bool + 'static,
    {
        self.derive_filter_map("map_apply", move |value, _| match tuple(&value) {
            Ok(fields) => pred(fields).then(|| Ok(f(fields))),
            Err(e) => Some(Err(e)),
        })
    }

    /// Keep the elements satisfying `pred`.
    pub fn filter<P>(&self, pred: P) -> Sequence
    where
        P: Fn(&Value, usize) -> bool + 'static,
    {
        self.derive_filter_map("filter", move |value, i| {
            pred(&value, i).then_some(Ok(value))
        })
    }

    /// Keep the elements satisfying `pred` and transform them with `f`.
    /// `f` receives the position of the element in this sequence, not in
    /// the filtered one.
    pub fn filter_mapped<P, F>(&self, pred: P, f: F) -> Sequence
    where
        P: Fn(&Value, usize) -> bool + 'static,
        F: Fn(&Value, usize) -> Value + 'static,
    {
        self.derive_filter_map("filter", move |value, i| {
            pred(&value, i).then(|| Ok(f(&value, i)))
        })
    }

    /// Keep the elements whose fields satisfy `pred`.
    pub fn filter_apply<P>(&self, pred: P) -> Sequence
    where
        P: Fn(&[Value]) -> bool + 'static,
    {
        self.derive_filter_map("filter_apply", move |value, _| match tuple(&value) {
            Ok(fields) => pred(fields).then_some(Ok(value.clone())),
            Err(e) => Some(Err(e)),
        })
    }

    pub fn filter_apply_mapped<P, F>(&self, pred: P, f: F) -> Sequence
    where
        P: Fn(&[Value]) -> bool + 'static,
        F: Fn(&[Value]) -> Value + 'static,
    {
        self.derive_filter_map("filter_apply", move |value, _| match tuple(&value) {
            Ok(fields) => pred(fields).then(|| Ok(f(fields))),
            Err(e) => Some(Err(e)),
        })
    }

    /// Keep the truthy elements.
    pub fn filter_truthy(&self) -> Sequence {
        self.derive_filter_map("filter", |value, _| value.is_truthy().then_some(Ok(value)))
    }

    /// The shared shape of the element-wise combinators: `f` sees every
    /// element with its position, and decides what, if anything, to yield
    /// in its place. Errors from the parent pass through untouched.
    pub(super) fn derive_filter_map<F>(&self, name: &'static str, f: F) -> Sequence
    where
        F: Fn(Value, usize) -> Option<error::Result<Value>> + 'static,
    {
        let parent = self.clone();
        let f = Rc::new(f);
        Sequence::derived(name, move || {
            let f = f.clone();
            parent
                .iter()
                .enumerate()
                .filter_map(move |(i, item)| match item {
                    Ok(value) => f(value, i),
                    Err(e) => Some(Err(e)),
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(sequence: &Sequence) -> error::Result<Vec<Value>> {
        sequence.iter().collect()
    }

    #[test]
    fn test_map_apply_rejects_non_tuple() {
        let sequence = Sequence::from(vec![Value::list([1, 2]), Value::from(3)]);
        let mapped = sequence.map_apply(|fields| fields[0].clone());
        let mut iter = mapped.iter();
        assert_eq!(iter.next(), Some(Ok(Value::from(1))));
        assert_eq!(iter.next().unwrap().unwrap_err().code(), "ArgumentError");
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_filter_truthy() {
        let sequence = Sequence::from(vec![
            Value::from(0),
            Value::from("a"),
            Value::Null,
            Value::from(false),
            Value::from(2),
        ]);
        assert_eq!(
            values(&sequence.filter_truthy()),
            Ok(vec![Value::from("a"), Value::from(2)])
        );
    }

    #[test]
    fn test_map_filtered_passes_source_position() {
        let sequence = Sequence::from("xyz");
        let mapped = sequence.map_filtered(|_, i| Value::from(i), |value, _| value.as_str() != Some("x"));
        assert_eq!(values(&mapped), Ok(vec![Value::from(1), Value::from(2)]));
    }

    #[test]
    fn test_map_is_lazy() {
        let sequence = Sequence::repeat(1).map(|value, i| {
            Value::from(value.as_i64().unwrap() + i as i64)
        });
        let first = sequence.iter().take(3).collect::<error::Result<Vec<_>>>();
        assert_eq!(first, Ok(vec![Value::from(1), Value::from(2), Value::from(3)]));
    }
}
