use std::cmp::Ordering;
use std::rc::Rc;

use itertools::Itertools;

use crate::error;
use crate::value::Value;

use super::Sequence;

/// The separator `join` uses when the caller has no preference.
pub const DEFAULT_SEPARATOR: &str = ",";

// What the reductions give for a sequence without elements.
const SUM_FALLBACK: i64 = 0;
const MIN_FALLBACK: f64 = f64::INFINITY;
const MAX_FALLBACK: f64 = f64::NEG_INFINITY;

fn add(a: &Value, b: &Value) -> Value {
    match (a, b) {
        // continue in floating point once integers overflow
        (Value::Integer(a), Value::Integer(b)) => match a.checked_add(*b) {
            Some(sum) => Value::Integer(sum),
            None => Value::float(*a as f64 + *b as f64),
        },
        _ => Value::float(a.as_f64().unwrap_or(f64::NAN) + b.as_f64().unwrap_or(f64::NAN)),
    }
}

impl Sequence {
    /// Visit every element with its position. Returns the last element
    /// visited, if any.
    pub fn for_each<F>(&self, mut f: F) -> error::Result<Option<Value>>
    where
        F: FnMut(&Value, usize),
    {
        let mut last = None;
        for (i, item) in self.iter().enumerate() {
            let value = item?;
            f(&value, i);
            last = Some(value);
        }
        Ok(last)
    }

    /// Left fold starting from `seed`.
    pub fn foldl<F>(&self, f: F, seed: impl Into<Value>) -> error::Result<Value>
    where
        F: Fn(Value, Value) -> Value,
    {
        self.iter().try_fold(seed.into(), |acc, item| Ok(f(acc, item?)))
    }

    /// Left fold starting from the first element.
    pub fn foldl1<F>(&self, f: F) -> error::Result<Value>
    where
        F: Fn(Value, Value) -> Value,
    {
        let mut iter = self.iter();
        let first = iter.next().unwrap_or(Err(error::Error::EmptySequence))?;
        iter.try_fold(first, |acc, item| Ok(f(acc, item?)))
    }

    /// The running left fold: `seed`, then the accumulated value after
    /// every element.
    pub fn scanl<F>(&self, f: F, seed: impl Into<Value>) -> Sequence
    where
        F: Fn(Value, Value) -> Value + 'static,
    {
        let parent = self.clone();
        let f = Rc::new(f);
        let seed = seed.into();
        Sequence::derived("scanl", move || {
            let f = f.clone();
            let mut acc = seed.clone();
            std::iter::once(Ok(seed.clone())).chain(parent.iter().map(
                move |item| -> error::Result<Value> {
                    let previous = std::mem::replace(&mut acc, Value::Null);
                    acc = f(previous, item?);
                    Ok(acc.clone())
                },
            ))
        })
    }

    /// The running left fold starting from the first element, which is
    /// yielded as it is.
    pub fn scanl1<F>(&self, f: F) -> Sequence
    where
        F: Fn(Value, Value) -> Value + 'static,
    {
        let parent = self.clone();
        let f = Rc::new(f);
        Sequence::derived("scanl", move || {
            let f = f.clone();
            let mut acc: Option<Value> = None;
            parent.iter().map(move |item| -> error::Result<Value> {
                let value = item?;
                let next = match acc.take() {
                    Some(previous) => f(previous, value),
                    None => value,
                };
                acc = Some(next.clone());
                Ok(next)
            })
        })
    }

    /// Right fold starting from `seed`; `f` receives the element and the
    /// accumulated value. Buffers the whole sequence.
    pub fn foldr<F>(&self, f: F, seed: impl Into<Value>) -> error::Result<Value>
    where
        F: Fn(Value, Value) -> Value,
    {
        let buffer = self.to_vec()?;
        Ok(buffer.into_iter().rev().fold(seed.into(), |acc, value| f(value, acc)))
    }

    /// Right fold starting from the last element.
    pub fn foldr1<F>(&self, f: F) -> error::Result<Value>
    where
        F: Fn(Value, Value) -> Value,
    {
        let mut buffer = self.to_vec()?;
        let last = buffer.pop().ok_or(error::Error::EmptySequence)?;
        Ok(buffer.into_iter().rev().fold(last, |acc, value| f(value, acc)))
    }

    /// The running right fold: `seed`, then the accumulated value after
    /// every element from the last to the first. Buffers the whole sequence
    /// on the first pull.
    pub fn scanr<F>(&self, f: F, seed: impl Into<Value>) -> Sequence
    where
        F: Fn(Value, Value) -> Value + 'static,
    {
        let seed = seed.into();
        self.derive_buffered("scanr", move |buffer| {
            scan_right(buffer, Some(seed.clone()), &f).into_iter()
        })
    }

    pub fn scanr1<F>(&self, f: F) -> Sequence
    where
        F: Fn(Value, Value) -> Value + 'static,
    {
        self.derive_buffered("scanr", move |buffer| scan_right(buffer, None, &f).into_iter())
    }

    /// The sum of the elements, or 0 if there are none.
    pub fn sum(&self) -> error::Result<Value> {
        self.sum_or(SUM_FALLBACK)
    }

    /// The sum of the elements, or `fallback` if there are none. Every
    /// element must be a number.
    pub fn sum_or(&self, fallback: impl Into<Value>) -> error::Result<Value> {
        let mut total: Option<Value> = None;
        for item in self.iter() {
            let value = item?;
            if !value.is_number() {
                return Err(error::Error::argument(format!(
                    "cannot sum a {}",
                    value.kind_name()
                )));
            }
            total = Some(match total {
                Some(total) => add(&total, &value),
                None => value,
            });
        }
        Ok(total.unwrap_or_else(|| fallback.into()))
    }

    /// The least element in natural order, or infinity if there are none.
    pub fn min(&self) -> error::Result<Value> {
        self.min_or(MIN_FALLBACK)
    }

    pub fn min_or(&self, fallback: impl Into<Value>) -> error::Result<Value> {
        Ok(self.extreme(Ordering::Less)?.unwrap_or_else(|| fallback.into()))
    }

    /// The greatest element in natural order, or negative infinity if there
    /// are none.
    pub fn max(&self) -> error::Result<Value> {
        self.max_or(MAX_FALLBACK)
    }

    pub fn max_or(&self, fallback: impl Into<Value>) -> error::Result<Value> {
        Ok(self.extreme(Ordering::Greater)?.unwrap_or_else(|| fallback.into()))
    }

    // the first element that no later element beats in direction `wanted`
    fn extreme(&self, wanted: Ordering) -> error::Result<Option<Value>> {
        let mut best: Option<Value> = None;
        for item in self.iter() {
            let value = item?;
            let beats = match &best {
                Some(current) => value.natural_cmp(current) == wanted,
                None => true,
            };
            if beats {
                best = Some(value);
            }
        }
        Ok(best)
    }

    /// Whether every element satisfies `pred`. Stops at the first that
    /// does not.
    pub fn all<P>(&self, pred: P) -> error::Result<bool>
    where
        P: Fn(&Value) -> bool,
    {
        for item in self.iter() {
            if !pred(&item?) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether some element satisfies `pred`. Stops at the first that
    /// does.
    pub fn any<P>(&self, pred: P) -> error::Result<bool>
    where
        P: Fn(&Value) -> bool,
    {
        for item in self.iter() {
            if pred(&item?) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn all_truthy(&self) -> error::Result<bool> {
        self.all(Value::is_truthy)
    }

    pub fn any_truthy(&self) -> error::Result<bool> {
        self.any(Value::is_truthy)
    }

    /// The textual forms of the elements, separated by `separator`.
    pub fn join(&self, separator: &str) -> error::Result<String> {
        itertools::process_results(self.iter(), |mut values| values.join(separator))
    }

    /// The textual forms of the elements, separated by
    /// [`DEFAULT_SEPARATOR`].
    pub fn join_default(&self) -> error::Result<String> {
        self.join(DEFAULT_SEPARATOR)
    }
}

// `seed`, then every accumulated value from the right. Without a seed the
// last element is the first accumulated value.
fn scan_right<F>(mut buffer: Vec<Value>, seed: Option<Value>, f: &F) -> Vec<Value>
where
    F: Fn(Value, Value) -> Value,
{
    let Some(mut acc) = seed.or_else(|| buffer.pop()) else {
        return Vec::new();
    };
    let mut output = Vec::with_capacity(buffer.len() + 1);
    output.push(acc.clone());
    for value in buffer.into_iter().rev() {
        acc = f(value, acc);
        output.push(acc.clone());
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn power(base: Value, exponent: Value) -> Value {
        Value::from(base.as_i64().unwrap().pow(exponent.as_i64().unwrap() as u32))
    }

    fn max(a: Value, b: Value) -> Value {
        if b.natural_cmp(&a) == Ordering::Greater {
            b
        } else {
            a
        }
    }

    #[test]
    fn test_foldl1_of_empty() {
        assert_eq!(Sequence::empty().foldl1(max), Err(error::Error::EmptySequence));
    }

    #[test]
    fn test_foldr_is_right_associative() {
        let sequence = Sequence::from(vec![2, 2, 3]);
        assert_eq!(sequence.foldr1(power), Ok(Value::from(256)));
        assert_eq!(Sequence::from(vec![2, 2]).foldr(power, 3), Ok(Value::from(256)));
    }

    #[test]
    fn test_scanr1() {
        let scanned = Sequence::from(vec![2, 2, 3]).scanr1(power);
        assert_eq!(
            scanned.to_vec(),
            Ok(vec![Value::from(3), Value::from(8), Value::from(256)])
        );
    }

    #[test]
    fn test_scanl_with_seed_on_empty() {
        let scanned = Sequence::empty().scanl(max, f64::NEG_INFINITY);
        assert_eq!(scanned.to_vec(), Ok(vec![Value::float(f64::NEG_INFINITY)]));
    }

    #[test]
    fn test_sum_overflows_into_float() {
        let sum = Sequence::from(vec![i64::MAX, 1]).sum().unwrap();
        assert_eq!(sum, Value::float(i64::MAX as f64 + 1.0));
    }

    #[test]
    fn test_sum_of_mixed_numbers() {
        assert_eq!(
            Sequence::from(vec![Value::from(1), Value::from(0.5)]).sum(),
            Ok(Value::from(1.5))
        );
    }

    #[test]
    fn test_sum_rejects_text() {
        let err = Sequence::from("ab").sum().unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: cannot sum a string");
    }

    #[test]
    fn test_min_max_fallbacks() {
        assert_eq!(Sequence::empty().min(), Ok(Value::float(f64::INFINITY)));
        assert_eq!(Sequence::empty().max(), Ok(Value::float(f64::NEG_INFINITY)));
        assert_eq!(Sequence::empty().min_or(1), Ok(Value::from(1)));
    }

    #[test]
    fn test_min_keeps_first_of_equals() {
        let sequence = Sequence::from(vec![Value::from(2.0), Value::from(1), Value::from(1.0)]);
        let min = sequence.min().unwrap();
        assert!(matches!(min, Value::Integer(1)));
    }

    #[test]
    fn test_all_short_circuits() {
        let unbounded = Sequence::iterate(|value| Value::from(value.as_i64().unwrap() + 1), 0);
        assert_eq!(unbounded.all(|value| value.as_i64().unwrap() < 5), Ok(false));
        assert_eq!(unbounded.any(|value| value.as_i64().unwrap() > 5), Ok(true));
    }

    #[test]
    fn test_for_each_returns_last() {
        let mut positions = Vec::new();
        let last = Sequence::from("ab").for_each(|_, i| positions.push(i));
        assert_eq!(last, Ok(Some(Value::from("b"))));
        assert_eq!(positions, vec![0, 1]);
        assert_eq!(Sequence::empty().for_each(|_, _| unreachable!()), Ok(None));
    }

    #[test]
    fn test_join_default_separator() {
        assert_eq!(Sequence::range(3).join_default(), Ok("0,1,2".to_string()));
        assert_eq!(
            Sequence::range(3).join(DEFAULT_SEPARATOR),
            Ok("0,1,2".to_string())
        );
        assert_eq!(Sequence::empty().join_default(), Ok(String::new()));
    }

    #[test]
    fn test_join_propagates_errors() {
        assert_eq!(
            Sequence::empty().tail().join_default(),
            Err(error::Error::EmptySequence)
        );
    }
}
