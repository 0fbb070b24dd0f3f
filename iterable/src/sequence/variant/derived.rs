use std::fmt;
use std::rc::Rc;

use crate::sequence::ItemIter;

type Recipe = dyn Fn() -> ItemIter;

/// A sequence computed from other sequences.
///
/// It holds only the recipe for building a pull-function; every call to
/// `iter` runs the recipe again, so each iteration starts from scratch and
/// shares no state with any other.
#[derive(Clone)]
pub struct Derived {
    name: &'static str,
    recipe: Rc<Recipe>,
}

impl Derived {
    pub(crate) fn new<F>(name: &'static str, recipe: F) -> Self
    where
        F: Fn() -> ItemIter + 'static,
    {
        Self {
            name,
            recipe: Rc::new(recipe),
        }
    }

    pub(crate) fn iter(&self) -> ItemIter {
        (self.recipe)()
    }

    pub(crate) fn ptr_eq(&self, other: &Derived) -> bool {
        Rc::ptr_eq(&self.recipe, &other.recipe)
    }
}

impl fmt::Debug for Derived {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Derived").field(&self.name).finish()
    }
}
