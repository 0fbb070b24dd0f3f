use iterable::{Sequence, Value};

/// Pull `expected` from a fresh pull-function over `sequence`, then check
/// that it stays exhausted.
pub fn expect_sequence<V>(sequence: &Sequence, expected: impl IntoIterator<Item = V>)
where
    V: Into<Value>,
{
    let mut iter = sequence.iter();
    for (i, expected) in expected.into_iter().enumerate() {
        assert_eq!(iter.next(), Some(Ok(expected.into())), "element {}", i);
    }
    for _ in 0..3 {
        assert_eq!(iter.next(), None);
    }
}

pub fn expect_empty(sequence: &Sequence) {
    expect_sequence(sequence, Vec::<Value>::new());
}

/// The textual form of every element, for comparing tuples and maps.
pub fn texts(sequence: &Sequence) -> Vec<String> {
    sequence
        .iter()
        .map(|item| item.unwrap().to_string())
        .collect()
}
