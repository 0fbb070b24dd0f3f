use crate::value::Value;

use super::Sequence;

// The length of the arrangements to generate. Zero, negative and too large
// lengths generate nothing.
fn arrangement_len(k: Option<isize>, len: usize) -> Option<usize> {
    let k = match k {
        Some(k) => usize::try_from(k).ok()?,
        None => len,
    };
    (k > 0 && k <= len).then_some(k)
}

impl Sequence {
    /// All ordered arrangements of `k` distinct elements (by position), or
    /// of all elements if `k` is `None`, as lists.
    ///
    /// Arrangements come in lexicographic order of source positions. The
    /// sequence is buffered on the first pull; arrangements are then
    /// generated one at a time.
    pub fn permutations(&self, k: Option<isize>) -> Sequence {
        self.derive_buffered("permutations", move |buffer| {
            let k = arrangement_len(k, buffer.len());
            Permutations::new(buffer, k)
        })
    }

    /// All selections of `k` elements that keep their relative order, or
    /// the single selection of all elements if `k` is `None`, as lists.
    ///
    /// Selections come in lexicographic order of source positions.
    pub fn combinations(&self, k: Option<isize>) -> Sequence {
        self.derive_buffered("combinations", move |buffer| {
            let k = arrangement_len(k, buffer.len());
            Combinations::new(buffer, k)
        })
    }
}

// Backtracking over positions: `chosen` is the stack of positions in the
// current arrangement, `used` marks which positions are on it.
struct Permutations {
    items: Vec<Value>,
    k: usize,
    chosen: Vec<usize>,
    used: Vec<bool>,
    started: bool,
    done: bool,
}

impl Permutations {
    fn new(items: Vec<Value>, k: Option<usize>) -> Self {
        let used = vec![false; items.len()];
        Self {
            items,
            k: k.unwrap_or(0),
            chosen: Vec::new(),
            used,
            started: false,
            done: k.is_none(),
        }
    }

    // complete the arrangement with the lowest unused positions
    fn fill(&mut self) {
        while self.chosen.len() < self.k {
            match self.used.iter().position(|used| !used) {
                Some(position) => self.push(position),
                None => return,
            }
        }
    }

    fn push(&mut self, position: usize) {
        self.used[position] = true;
        self.chosen.push(position);
    }

    // replace the deepest position that can still grow by the next unused
    // one, then fill up again
    fn advance(&mut self) -> bool {
        while let Some(position) = self.chosen.pop() {
            self.used[position] = false;
            let next = (position + 1..self.items.len()).find(|&next| !self.used[next]);
            if let Some(next) = next {
                self.push(next);
                self.fill();
                return true;
            }
        }
        false
    }
}

impl Iterator for Permutations {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        if self.done {
            return None;
        }
        if self.started {
            if !self.advance() {
                self.done = true;
                return None;
            }
        } else {
            self.started = true;
            self.fill();
        }
        Some(Value::list(
            self.chosen.iter().map(|&position| self.items[position].clone()),
        ))
    }
}

// The positions of the current selection, always strictly increasing.
struct Combinations {
    items: Vec<Value>,
    positions: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    fn new(items: Vec<Value>, k: Option<usize>) -> Self {
        Self {
            items,
            positions: (0..k.unwrap_or(0)).collect(),
            started: false,
            done: k.is_none(),
        }
    }

    fn advance(&mut self) -> bool {
        let n = self.items.len();
        let k = self.positions.len();
        // the rightmost position that has not reached its last possible
        // place
        let Some(i) = (0..k).rev().find(|&i| self.positions[i] < n - k + i) else {
            return false;
        };
        self.positions[i] += 1;
        for j in i + 1..k {
            self.positions[j] = self.positions[j - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        if self.done {
            return None;
        }
        if self.started {
            if !self.advance() {
                self.done = true;
                return None;
            }
        } else {
            self.started = true;
        }
        Some(Value::list(
            self.positions.iter().map(|&position| self.items[position].clone()),
        ))
    }
}
