use crate::error;
use crate::value::Value;

/// An arithmetic progression from `start` towards `end` (exclusive) in
/// increments of `step`.
///
/// A step of zero, or a step pointing away from `end`, gives an empty
/// range: a progression that never reaches its end is not a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    start: i64,
    end: i64,
    step: i64,
}

impl Range {
    pub(crate) fn new(start: i64, end: i64, step: i64) -> Self {
        Range { start, end, step }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub(crate) fn len(&self) -> usize {
        // i128 so that the distance between two i64 cannot overflow
        let start = self.start as i128;
        let end = self.end as i128;
        let step = self.step as i128;
        let len = if step > 0 && start < end {
            (end - start - 1) / step + 1
        } else if step < 0 && start > end {
            (start - end - 1) / -step + 1
        } else {
            0
        };
        usize::try_from(len).unwrap_or(usize::MAX)
    }

    /// Whether `value` is one of the elements of the progression.
    pub fn contains(&self, value: i64) -> bool {
        let offset = value as i128 - self.start as i128;
        let step = self.step as i128;
        step != 0
            && offset % step == 0
            && offset / step >= 0
            && ((offset / step) as u128) < self.len() as u128
    }

    pub(crate) fn iter(&self) -> RangeIterator {
        RangeIterator::new(self.start, self.step, self.len())
    }
}

impl Default for Range {
    /// The range with no elements.
    fn default() -> Self {
        Range::new(0, 0, 1)
    }
}

pub struct RangeIterator {
    next: i64,
    step: i64,
    remaining: usize,
}

impl RangeIterator {
    fn new(start: i64, step: i64, len: usize) -> Self {
        RangeIterator {
            next: start,
            step,
            remaining: len,
        }
    }
}

impl Iterator for RangeIterator {
    type Item = error::Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.next;
        self.remaining -= 1;
        // the step past the last element may leave i64; it is never yielded
        self.next = self.next.wrapping_add(self.step);
        Some(Ok(i.into()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len() {
        assert_eq!(Range::new(0, 10, 3).len(), 4);
        assert_eq!(Range::new(1, 10, 3).len(), 3);
        assert_eq!(Range::new(0, 0, 1).len(), 0);
        assert_eq!(Range::new(1, 0, 1).len(), 0);
        assert_eq!(Range::new(0, 5, 0).len(), 0);
        assert_eq!(Range::new(5, 0, -2).len(), 3);
        assert_eq!(Range::new(0, 5, -1).len(), 0);
    }

    #[test]
    fn test_len_does_not_overflow() {
        assert_eq!(Range::new(i64::MIN, i64::MAX, i64::MAX).len(), 3);
    }

    #[test]
    fn test_contains() {
        let range = Range::new(1, 10, 3);
        assert!(range.contains(1));
        assert!(range.contains(7));
        assert!(!range.contains(10));
        assert!(!range.contains(2));
        assert!(!range.contains(-2));
        assert!(Range::new(5, 0, -2).contains(1));
        assert!(!Range::new(5, 0, -2).contains(0));
    }

    #[test]
    fn test_iter_descending() {
        let values = Range::new(5, 0, -2)
            .iter()
            .collect::<error::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(values, vec![Value::from(5), Value::from(3), Value::from(1)]);
    }
}
