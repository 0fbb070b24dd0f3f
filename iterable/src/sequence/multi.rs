use std::rc::Rc;

use crate::error;
use crate::value::Value;

use super::core::iterable;
use super::iter::ItemIter;
use super::Sequence;

impl Sequence {
    // this sequence followed by the others, as one shared list of operands
    fn with_others(
        &self,
        others: impl IntoIterator<Item = impl Into<Sequence>>,
    ) -> Rc<[Sequence]> {
        std::iter::once(self.clone())
            .chain(others.into_iter().map(Into::into))
            .collect()
    }

    /// Tuples of the elements at the same position in this sequence and
    /// each of `others`. Stops with the shortest operand.
    pub fn zip(&self, others: impl IntoIterator<Item = impl Into<Sequence>>) -> Sequence {
        let sequences = self.with_others(others);
        Sequence::derived("zip", move || {
            let mut iters = sequences.iter().map(Sequence::iter).collect::<Vec<_>>();
            std::iter::from_fn(move || {
                let mut tuple = Vec::with_capacity(iters.len());
                for iter in &mut iters {
                    match iter.next()? {
                        Ok(value) => tuple.push(value),
                        Err(e) => return Some(Err(e)),
                    }
                }
                Some(Ok(Value::list(tuple)))
            })
        })
    }

    /// Like [`Sequence::zip`], applying `f` to every tuple.
    pub fn zip_with<F>(
        &self,
        f: F,
        others: impl IntoIterator<Item = impl Into<Sequence>>,
    ) -> Sequence
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        self.zip(others).map_apply(f)
    }

    /// The cartesian product of this sequence and `others`, as tuples.
    ///
    /// The last operand varies fastest; every operand but the first is
    /// iterated again for each combination of the operands before it.
    pub fn product(&self, others: impl IntoIterator<Item = impl Into<Sequence>>) -> Sequence {
        let sequences = self.with_others(others);
        Sequence::derived("product", move || Product::new(sequences.clone()))
    }

    /// This sequence followed by each of `others`.
    pub fn chain(&self, others: impl IntoIterator<Item = impl Into<Sequence>>) -> Sequence {
        let sequences = self.with_others(others);
        Sequence::derived("chain", move || {
            let sequences = sequences.clone();
            (0..sequences.len()).flat_map(move |i| sequences[i].iter())
        })
    }

    /// Expand every element that is a source of its own in place, one level
    /// deep: lists, text, maps and sequences. Elements that would only be
    /// singleton sources, and `Null`, pass through as they are.
    pub fn flatten(&self) -> Sequence {
        let parent = self.clone();
        Sequence::derived("flatten", move || {
            parent.iter().flat_map(|item| match item {
                Ok(Value::Null) => ItemIter::new(std::iter::once(Ok(Value::Null))),
                // a singleton source yields the element itself
                Ok(value) => match iterable(value) {
                    Ok(sequence) => sequence.iter(),
                    Err(e) => ItemIter::failing(e),
                },
                Err(e) => ItemIter::failing(e),
            })
        })
    }
}

// An odometer over the operands of a product: one pull-function and one
// current element per operand.
struct Product {
    sequences: Rc<[Sequence]>,
    iters: Vec<ItemIter>,
    current: Vec<Value>,
    started: bool,
}

impl Product {
    fn new(sequences: Rc<[Sequence]>) -> Self {
        Self {
            iters: Vec::with_capacity(sequences.len()),
            current: Vec::with_capacity(sequences.len()),
            sequences,
            started: false,
        }
    }

    // Restart every operand from `from` onwards and take its first element.
    // `None` means one of them is empty.
    fn restart(&mut self, from: usize) -> Option<error::Result<()>> {
        self.iters.truncate(from);
        self.current.truncate(from);
        for sequence in &self.sequences[from..] {
            let mut iter = sequence.iter();
            match iter.next()? {
                Ok(value) => self.current.push(value),
                Err(e) => return Some(Err(e)),
            }
            self.iters.push(iter);
        }
        Some(Ok(()))
    }

    fn advance(&mut self) -> Option<error::Result<()>> {
        for position in (0..self.iters.len()).rev() {
            match self.iters[position].next() {
                Some(Ok(value)) => {
                    self.current[position] = value;
                    return self.restart(position + 1);
                }
                Some(Err(e)) => return Some(Err(e)),
                None => continue,
            }
        }
        None
    }
}

impl Iterator for Product {
    type Item = error::Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = if self.started {
            self.advance()
        } else {
            self.started = true;
            self.restart(0)
        };
        match step? {
            Ok(()) => Some(Ok(Value::list(self.current.iter().cloned()))),
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::value::Map;

    use super::*;

    fn joined(sequence: &Sequence) -> String {
        sequence
            .map(|tuple, _| Value::from(tuple.to_string().replace(',', "")))
            .join(" ")
            .unwrap()
    }

    #[test]
    fn test_product_of_three() {
        let product = Sequence::from("01").product(["ab", "xy"]);
        assert_eq!(
            joined(&product),
            "0ax 0ay 0bx 0by 1ax 1ay 1bx 1by"
        );
    }

    #[test]
    fn test_product_with_empty_middle() {
        let product = Sequence::from("01").product(["", "xy"]);
        assert_eq!(product.count(), Ok(0));
    }

    #[test]
    fn test_product_is_restartable() {
        let product = Sequence::from("01").product(["ab"]);
        assert_eq!(joined(&product), joined(&product));
    }

    #[test]
    fn test_zip_of_one() {
        let zipped = Sequence::from("ab").zip(Vec::<Sequence>::new());
        assert_eq!(
            zipped.to_vec(),
            Ok(vec![Value::list(["a"]), Value::list(["b"])])
        );
    }

    #[test]
    fn test_flatten_expands_text() {
        let sequence = Sequence::from(vec![Value::from("ab"), Value::from(1)]);
        assert_eq!(
            sequence.flatten().to_vec(),
            Ok(vec![Value::from("a"), Value::from("b"), Value::from(1)])
        );
    }

    #[test]
    fn test_flatten_expands_maps_into_pairs() {
        let map = Map::from_entries([("x", 1)]);
        let sequence = Sequence::from(vec![Value::from(map), Value::list([2])]);
        assert_eq!(
            sequence.flatten().to_vec(),
            Ok(vec![
                Value::list([Value::from("x"), Value::from(1)]),
                Value::from(2),
            ])
        );
    }

    #[test]
    fn test_flatten_passes_scalars_and_null() {
        let sequence = Sequence::from(vec![Value::from(true), Value::Null, Value::from(1.5)]);
        assert_eq!(
            sequence.flatten().to_vec(),
            Ok(vec![Value::from(true), Value::Null, Value::from(1.5)])
        );
    }

    #[test]
    fn test_flatten_expands_nested_sequences() {
        let sequence = Sequence::from(vec![Sequence::range(2), Sequence::range_from(5, 6)]);
        assert_eq!(
            sequence.flatten().to_vec(),
            Ok(vec![Value::from(0), Value::from(1), Value::from(5)])
        );
    }
}
