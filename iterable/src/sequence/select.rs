use std::fmt;
use std::rc::Rc;

use ahash::{HashSet, HashSetExt};

use crate::error;
use crate::value::{Entries, MapKey, Value};

use super::Sequence;

/// A projection applied to every element by [`Sequence::select`].
#[derive(Clone)]
pub enum Selector {
    /// The item at a position of a list or text, or the entry with an
    /// integer key in a map.
    Key(usize),
    /// The entry with a string key in a map.
    Property(Rc<str>),
    /// A list with one projection per selector.
    Keys(Vec<Selector>),
    /// A map with one projection per named selector, resolved recursively.
    Template(Vec<(Rc<str>, Selector)>),
    /// An arbitrary function of the element.
    Function(Rc<dyn Fn(&Value) -> Value>),
}

impl Selector {
    pub fn key(index: usize) -> Self {
        Selector::Key(index)
    }

    pub fn property(name: impl Into<Rc<str>>) -> Self {
        Selector::Property(name.into())
    }

    pub fn keys<I>(selectors: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Selector>,
    {
        Selector::Keys(selectors.into_iter().map(Into::into).collect())
    }

    /// A template of named selectors. Names must be unique.
    pub fn template<I, N, S>(entries: I) -> error::Result<Self>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<Rc<str>>,
        S: Into<Selector>,
    {
        let mut seen = HashSet::new();
        let mut template = Vec::new();
        for (name, selector) in entries {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(error::Error::argument(format!(
                    "duplicate name {:?} in template",
                    name
                )));
            }
            template.push((name, selector.into()));
        }
        Ok(Selector::Template(template))
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + 'static,
    {
        Selector::Function(Rc::new(f))
    }

    /// Project `value`. A missing position or key gives `Null`.
    pub fn apply(&self, value: &Value) -> error::Result<Value> {
        match self {
            Selector::Key(index) => match value {
                Value::List(items) => Ok(items.get(*index).cloned().into()),
                Value::String(text) => Ok(text.chars().nth(*index).into()),
                Value::Map(map) => {
                    let key = i64::try_from(*index).map(MapKey::Integer).ok();
                    Ok(key.and_then(|key| map.get_key(&key).cloned()).into())
                }
                other => Err(error::Error::argument(format!(
                    "cannot select position {} from {}",
                    index,
                    other.kind_name()
                ))),
            },
            Selector::Property(name) => match value {
                Value::Map(map) => Ok(map.get_key(&MapKey::String(name.clone())).cloned().into()),
                other => Err(error::Error::argument(format!(
                    "cannot select property {:?} from {}",
                    name,
                    other.kind_name()
                ))),
            },
            Selector::Keys(selectors) => {
                let items = selectors
                    .iter()
                    .map(|selector| selector.apply(value))
                    .collect::<error::Result<Vec<_>>>()?;
                Ok(Value::list(items))
            }
            Selector::Template(template) => {
                let mut entries = Entries::default();
                for (name, selector) in template {
                    entries.insert(MapKey::String(name.clone()), selector.apply(value)?);
                }
                Ok(Value::Map(entries.into()))
            }
            Selector::Function(f) => Ok(f(value)),
        }
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Key(index) => f.debug_tuple("Key").field(index).finish(),
            Selector::Property(name) => f.debug_tuple("Property").field(name).finish(),
            Selector::Keys(selectors) => f.debug_tuple("Keys").field(selectors).finish(),
            Selector::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Selector::Function(_) => f.write_str("Function"),
        }
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Selector::Key(index)
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Selector::Property(name.into())
    }
}

impl Sequence {
    /// Project every element through `selector`.
    pub fn select(&self, selector: impl Into<Selector>) -> Sequence {
        let selector = selector.into();
        self.derive_filter_map("select", move |value, _| Some(selector.apply(&value)))
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use crate::value::Map;

    use super::*;

    fn rows() -> Sequence {
        Sequence::from(vec![
            Value::list([0, 1, 2]),
            Value::list([3, 4, 5]),
            Value::list([6, 7, 8]),
        ])
    }

    fn joined(sequence: &Sequence) -> String {
        sequence.join(" | ").unwrap()
    }

    #[test]
    fn test_select_key() {
        assert_snapshot!(joined(&rows().select(2usize)), @"2 | 5 | 8");
    }

    #[test]
    fn test_select_keys() {
        let selector = Selector::keys([0usize, 2]);
        assert_snapshot!(joined(&rows().select(selector)), @"0,2 | 3,5 | 6,8");
    }

    #[test]
    fn test_select_template() {
        let selector = Selector::template([
            ("a", Selector::key(1)),
            ("b", Selector::keys([0usize, 2])),
            (
                "c",
                Selector::function(|row| {
                    let row = row.as_list().unwrap();
                    Value::from(row[0].as_i64().unwrap() + row[2].as_i64().unwrap())
                }),
            ),
        ])
        .unwrap();
        assert_snapshot!(
            joined(&rows().select(selector)),
            @"{a: 1, b: 0,2, c: 2} | {a: 4, b: 3,5, c: 8} | {a: 7, b: 6,8, c: 14}"
        );
    }

    #[test]
    fn test_select_property() {
        let points = Sequence::from(vec![
            Map::from_entries([("x", 0), ("y", 0)]),
            Map::from_entries([("x", 1), ("y", 0)]),
        ]);
        assert_snapshot!(joined(&points.select("x")), @"0 | 1");
        assert_snapshot!(joined(&points.select(Selector::keys(["y", "x"]))), @"0,0 | 0,1");
    }

    #[test]
    fn test_missing_key_is_null() {
        assert_eq!(Selector::key(5).apply(&Value::list([1])), Ok(Value::Null));
        assert_eq!(
            Selector::property("z").apply(&Map::from_entries([("x", 1)]).into()),
            Ok(Value::Null)
        );
    }

    #[test]
    fn test_key_of_text() {
        assert_eq!(Selector::key(1).apply(&Value::from("ab")), Ok(Value::from("b")));
    }

    #[test]
    fn test_select_from_scalar_is_argument_error() {
        let err = Selector::property("x").apply(&Value::from(1)).unwrap_err();
        assert_snapshot!(err, @r#"invalid argument: cannot select property "x" from integer"#);
    }

    #[test]
    fn test_duplicate_template_name() {
        let err = Selector::template([("a", Selector::key(0)), ("a", Selector::key(1))]).unwrap_err();
        assert_eq!(err.code(), "ArgumentError");
    }
}
