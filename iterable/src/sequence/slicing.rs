use std::rc::Rc;

use crate::error;
use crate::value::Value;

use super::Sequence;

impl Sequence {
    /// The longest prefix whose elements satisfy `pred`.
    pub fn take_while<P>(&self, pred: P) -> Sequence
    where
        P: Fn(&Value) -> bool + 'static,
    {
        let parent = self.clone();
        let pred = Rc::new(pred);
        Sequence::derived("take_while", move || {
            let pred = pred.clone();
            parent.iter().take_while(move |item| match item {
                Ok(value) => pred(value),
                Err(_) => true,
            })
        })
    }

    /// The first `n` elements, or all of them if there are fewer.
    pub fn take(&self, n: isize) -> Sequence {
        let n = usize::try_from(n).unwrap_or(0);
        let parent = self.clone();
        Sequence::derived("take", move || parent.iter().take(n))
    }

    /// Everything after the longest prefix whose elements satisfy `pred`.
    pub fn drop_while<P>(&self, pred: P) -> Sequence
    where
        P: Fn(&Value) -> bool + 'static,
    {
        let parent = self.clone();
        let pred = Rc::new(pred);
        Sequence::derived("drop_while", move || {
            let pred = pred.clone();
            parent
                .iter()
                .skip_while(move |item| matches!(item, Ok(value) if pred(value)))
        })
    }

    /// Everything after the first `n` elements.
    pub fn drop(&self, n: isize) -> Sequence {
        let n = usize::try_from(n).unwrap_or(0);
        self.derive_filter_map("drop", move |value, i| (i >= n).then_some(Ok(value)))
    }

    /// The first element.
    pub fn head(&self) -> error::Result<Value> {
        self.iter().next().unwrap_or(Err(error::Error::EmptySequence))
    }

    /// The first element, or `default` if there is none.
    pub fn head_or(&self, default: impl Into<Value>) -> error::Result<Value> {
        Ok(self.iter().next().transpose()?.unwrap_or_else(|| default.into()))
    }

    /// The last element. Consumes the whole sequence.
    pub fn last(&self) -> error::Result<Value> {
        self.last_element()?.ok_or(error::Error::EmptySequence)
    }

    pub fn last_or(&self, default: impl Into<Value>) -> error::Result<Value> {
        Ok(self.last_element()?.unwrap_or_else(|| default.into()))
    }

    fn last_element(&self) -> error::Result<Option<Value>> {
        let mut last = None;
        for item in self.iter() {
            last = Some(item?);
        }
        Ok(last)
    }

    /// Everything but the first element.
    ///
    /// This never fails by itself; pulling from the tail of an empty
    /// sequence fails with an empty sequence error.
    pub fn tail(&self) -> Sequence {
        let parent = self.clone();
        Sequence::derived("tail", move || {
            let mut iter = parent.iter();
            let mut started = false;
            std::iter::from_fn(move || {
                if !started {
                    started = true;
                    match iter.next() {
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Some(Err(e)),
                        None => return Some(Err(error::Error::EmptySequence)),
                    }
                }
                iter.next()
            })
        })
    }

    /// Everything but the last element.
    ///
    /// Like [`Sequence::tail`], this fails only once it is pulled from.
    pub fn init(&self) -> Sequence {
        let parent = self.clone();
        Sequence::derived("init", move || {
            let mut iter = parent.iter();
            let mut pending: Option<Value> = None;
            let mut started = false;
            std::iter::from_fn(move || {
                if !started {
                    started = true;
                    match iter.next() {
                        Some(Ok(value)) => pending = Some(value),
                        Some(Err(e)) => return Some(Err(e)),
                        None => return Some(Err(error::Error::EmptySequence)),
                    }
                }
                // hold one element back: it is only yielded once it is
                // known not to be the last
                match iter.next()? {
                    Ok(next) => pending.replace(next).map(Ok),
                    Err(e) => Some(Err(e)),
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_negative_is_empty() {
        let sequence = Sequence::from(vec![1, 2]);
        assert_eq!(sequence.take(-1).is_empty(), Ok(true));
        assert_eq!(sequence.drop(-1).count(), Ok(2));
    }

    #[test]
    fn test_take_from_unbounded() {
        assert_eq!(Sequence::repeat("x").take(3).count(), Ok(3));
    }

    #[test]
    fn test_tail_of_empty_fails_lazily() {
        let tail = Sequence::empty().tail();
        assert_eq!(tail.is_empty(), Err(error::Error::EmptySequence));
        let mut iter = tail.iter();
        assert_eq!(iter.next(), Some(Err(error::Error::EmptySequence)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_init_of_empty_fails_lazily() {
        let init = Sequence::empty().init();
        assert_eq!(init.head(), Err(error::Error::EmptySequence));
    }

    #[test]
    fn test_init_holds_back_last() {
        let init = Sequence::from("abc").init();
        assert_eq!(init.join(""), Ok("ab".to_string()));
        assert_eq!(init.join(""), Ok("ab".to_string()));
    }

    #[test]
    fn test_drop_does_not_swallow_errors() {
        let dropped = Sequence::empty().tail().drop(3);
        assert_eq!(dropped.to_vec(), Err(error::Error::EmptySequence));
    }

    #[test]
    fn test_drop_while_passes_errors_on() {
        let dropped = Sequence::empty().tail().drop_while(|_| true);
        assert_eq!(dropped.count(), Err(error::Error::EmptySequence));
    }
}
