use std::rc::Rc;

use crate::value::Value;

use super::Sequence;

type Equality = Rc<dyn Fn(&Value, &Value) -> bool>;

fn strict_eq(a: &Value, b: &Value) -> bool {
    a == b
}

impl Sequence {
    /// The elements with duplicates removed, in order of first occurrence.
    pub fn nub(&self) -> Sequence {
        self.nub_by(strict_eq)
    }

    /// Like [`Sequence::nub`], with `eq` deciding what counts as a
    /// duplicate.
    pub fn nub_by<E>(&self, eq: E) -> Sequence
    where
        E: Fn(&Value, &Value) -> bool + 'static,
    {
        let parent = self.clone();
        let eq = Rc::new(eq);
        Sequence::derived("nub", move || {
            let eq = eq.clone();
            let mut seen: Vec<Value> = Vec::new();
            parent.iter().filter(move |item| match item {
                Ok(value) => {
                    if seen.iter().any(|previous| eq(previous, value)) {
                        false
                    } else {
                        seen.push(value.clone());
                        true
                    }
                }
                Err(_) => true,
            })
        })
    }

    /// The elements of this sequence, then the elements of `other` not seen
    /// before, without duplicates.
    pub fn union(&self, other: impl Into<Sequence>) -> Sequence {
        self.union_by(strict_eq, other)
    }

    pub fn union_by<E>(&self, eq: E, other: impl Into<Sequence>) -> Sequence
    where
        E: Fn(&Value, &Value) -> bool + 'static,
    {
        self.chain([other.into()]).nub_by(eq)
    }

    /// The elements of this sequence that also occur in `other`.
    pub fn intersection(&self, other: impl Into<Sequence>) -> Sequence {
        self.intersection_by(strict_eq, other)
    }

    pub fn intersection_by<E>(&self, eq: E, other: impl Into<Sequence>) -> Sequence
    where
        E: Fn(&Value, &Value) -> bool + 'static,
    {
        self.filter_against("intersection", Rc::new(eq), other.into(), true)
    }

    /// The elements of this sequence that do not occur in `other`.
    pub fn difference(&self, other: impl Into<Sequence>) -> Sequence {
        self.difference_by(strict_eq, other)
    }

    pub fn difference_by<E>(&self, eq: E, other: impl Into<Sequence>) -> Sequence
    where
        E: Fn(&Value, &Value) -> bool + 'static,
    {
        self.filter_against("difference", Rc::new(eq), other.into(), false)
    }

    // Keep the elements whose membership in `other` is `keep`. `other` is
    // buffered on the first pull.
    fn filter_against(
        &self,
        name: &'static str,
        eq: Equality,
        other: Sequence,
        keep: bool,
    ) -> Sequence {
        let parent = self.clone();
        Sequence::derived(name, move || {
            let eq = eq.clone();
            let other = other.clone();
            let mut left = parent.iter();
            let mut right: Option<Vec<Value>> = None;
            std::iter::from_fn(move || {
                if right.is_none() {
                    match other.to_vec() {
                        Ok(buffer) => right = Some(buffer),
                        Err(e) => return Some(Err(e)),
                    }
                }
                let right = right.as_deref().unwrap_or_default();
                loop {
                    match left.next()? {
                        Ok(value) => {
                            if right.iter().any(|r| eq(&value, r)) == keep {
                                return Some(Ok(value));
                            }
                        }
                        Err(e) => return Some(Err(e)),
                    }
                }
            })
        })
    }
}
