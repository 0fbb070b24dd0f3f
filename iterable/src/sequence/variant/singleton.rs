use std::rc::Rc;

use crate::error;
use crate::value::Value;

/// Any other value, yielded exactly once.
#[derive(Debug, Clone)]
pub struct Singleton {
    value: Rc<Value>,
}

impl Singleton {
    pub(crate) fn new(value: Value) -> Self {
        Self {
            value: Rc::new(value),
        }
    }

    pub(crate) fn iter(&self) -> std::iter::Once<error::Result<Value>> {
        std::iter::once(Ok(self.value.as_ref().clone()))
    }

    pub(crate) fn ptr_eq(&self, other: &Singleton) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}
