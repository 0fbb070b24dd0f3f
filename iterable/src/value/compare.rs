use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use super::{integral, Value};

// Strict equality, the default comparator of the set-like operations.
// Numbers compare by numeric value regardless of representation; nested
// sequences compare by identity, as two recipes can only be compared
// by running them.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            // exact: a float equals an integer only if it is that integer
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                integral(b.0) == Some(*a)
            }
            // compare the raw floats so that NaN is unequal to itself
            (Value::Float(a), Value::Float(b)) => a.0 == b.0,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b) || a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a.same_recipe(b),
            _ => false,
        }
    }
}

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Integer(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
            Value::List(_) => 4,
            Value::Map(_) => 5,
            Value::Sequence(_) => 6,
        }
    }

    /// The natural ordering, used by `sorted`, `min`, `max`, `greater` and
    /// `lesser` when no comparator is supplied.
    ///
    /// Values of different kinds order by kind: null, booleans, numbers,
    /// strings, lists, maps, sequences. Numbers order by value with NaN
    /// greatest, strings and lists lexicographically. Sequences are all
    /// equal to each other.
    pub fn natural_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
                let a = OrderedFloat(self.as_f64().unwrap_or(f64::NAN));
                let b = OrderedFloat(other.as_f64().unwrap_or(f64::NAN));
                a.cmp(&b)
            }
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => compare_lists(a, b),
            (Value::Map(a), Value::Map(b)) => {
                for ((a_key, a_value), (b_key, b_value)) in a.iter().zip(b.iter()) {
                    let ordering = a_key
                        .to_value()
                        .natural_cmp(&b_key.to_value())
                        .then_with(|| a_value.natural_cmp(b_value));
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn compare_lists(a: &[Value], b: &[Value]) -> Ordering {
    for (a, b) in a.iter().zip(b) {
        let ordering = a.natural_cmp(b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_equal_across_representations() {
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_ne!(Value::from(1), Value::from("1"));
        assert_ne!(Value::float(f64::NAN), Value::float(f64::NAN));
    }

    #[test]
    fn test_large_integers_compare_exactly_with_floats() {
        // 2^53 + 1 has no f64 representation and rounds to 2^53
        let above = Value::from(9_007_199_254_740_993_i64);
        let float = Value::float(9_007_199_254_740_992.0);
        assert_ne!(above, float);
        assert_ne!(float, above);
        assert_eq!(Value::from(9_007_199_254_740_992_i64), float);
        assert_ne!(Value::from(i64::MAX), Value::float(i64::MAX as f64));
        assert_ne!(Value::from(1), Value::float(1.5));
    }

    #[test]
    fn test_lists_compare_structurally() {
        assert_eq!(Value::list(["a", "b"]), Value::list(["a", "b"]));
        assert_ne!(Value::list(["a", "b"]), Value::list(["a"]));
    }

    #[test]
    fn test_natural_order_across_kinds() {
        let mut values = vec![
            Value::from("b"),
            Value::from(2),
            Value::Null,
            Value::from(1.5),
            Value::from(true),
            Value::from("a"),
        ];
        values.sort_by(Value::natural_cmp);
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::from(true),
                Value::from(1.5),
                Value::from(2),
                Value::from("a"),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn test_natural_order_of_lists() {
        assert_eq!(
            Value::list([1, 2]).natural_cmp(&Value::list([1, 3])),
            Ordering::Less
        );
        assert_eq!(
            Value::list([1, 2]).natural_cmp(&Value::list([1])),
            Ordering::Greater
        );
    }

    #[test]
    fn test_infinity_is_greatest_number() {
        assert_eq!(
            Value::float(f64::INFINITY).natural_cmp(&Value::from(i64::MAX)),
            Ordering::Greater
        );
    }
}
