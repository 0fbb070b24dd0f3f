use std::rc::Rc;

use crate::error;
use crate::value::Value;

/// Text, yielded one character at a time.
#[derive(Debug, Clone)]
pub struct Text {
    text: Rc<str>,
}

impl Text {
    pub(crate) fn new(text: Rc<str>) -> Self {
        Self { text }
    }

    pub(crate) fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub(crate) fn iter(&self) -> TextIter {
        TextIter {
            text: self.text.clone(),
            offset: 0,
        }
    }

    pub(crate) fn ptr_eq(&self, other: &Text) -> bool {
        Rc::ptr_eq(&self.text, &other.text)
    }
}

pub struct TextIter {
    text: Rc<str>,
    // byte offset of the next character
    offset: usize,
}

impl Iterator for TextIter {
    type Item = error::Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.text[self.offset..].chars().next()?;
        self.offset += c.len_utf8();
        Some(Ok(c.into()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // every remaining char takes between 1 and 4 bytes
        let remaining = self.text.len() - self.offset;
        (remaining.div_ceil(4), Some(remaining))
    }
}
