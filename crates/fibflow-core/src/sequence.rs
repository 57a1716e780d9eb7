//! The state of a generation run.

/// Two consecutive terms of the sequence.
///
/// Every run owns its own instance, seeded with `(1, 1)`, so the first
/// value it yields is `2`. The addition is checked: once the next term
/// doesn't fit into `u64` the iterator is exhausted and stays exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fibonacci {
    prev: u64,
    cur: u64,
    exhausted: bool,
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self::new()
    }
}

impl Fibonacci {
    /// Creates a generator at the seed state.
    pub fn new() -> Self {
        Self {
            prev: 1,
            cur: 1,
            exhausted: false,
        }
    }

    /// Computes the next term and shifts the state.
    pub fn advance(&mut self) -> Option<u64> {
        if self.exhausted {
            return None;
        }
        match self.prev.checked_add(self.cur) {
            Some(next) => {
                self.prev = self.cur;
                self.cur = next;
                Some(next)
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    /// The latest computed term (or the seed).
    pub fn current(&self) -> u64 {
        self.cur
    }
}

impl Iterator for Fibonacci {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        self.advance()
    }
}
