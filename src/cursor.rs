use crate::error::{BenchError, Result};

/// Index of the working set copy the next timed invocation consumes.
///
/// Invariant: `0 <= position <= capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationCursor {
    position: usize,
    capacity: usize,
}

impl InvocationCursor {
    pub fn new(capacity: usize) -> Self {
        Self {
            position: 0,
            capacity,
        }
    }

    /// Returns the current index and moves past it.
    ///
    /// Fails without moving if all `capacity` indices were handed out since the last reset. That
    /// means the invocation count and the iteration plan disagree, which is a harness bug.
    #[inline]
    pub fn advance(&mut self) -> Result<usize> {
        if self.position >= self.capacity {
            return Err(BenchError::CursorExhausted {
                capacity: self.capacity,
            });
        }

        let index = self.position;
        self.position += 1;
        Ok(index)
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.capacity
    }
}
