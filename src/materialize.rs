use std::collections::TryReserveError;
use std::mem;

use crate::error::{BenchError, Result};

/// Independent mutable copies of a base sequence, one per upcoming timed invocation.
///
/// Building the copies is what keeps allocation and memcpy out of the timed region, so every
/// method here must be called before the timer starts.
#[derive(Debug, Clone)]
pub struct WorkingSet<T> {
    copies: Vec<Vec<T>>,
    memory_limit: Option<usize>,
}

impl<T> Default for WorkingSet<T> {
    fn default() -> Self {
        Self {
            copies: Vec::new(),
            memory_limit: None,
        }
    }
}

impl<T: Clone> WorkingSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty working set that refuses to grow beyond `bytes` of element storage.
    pub fn with_memory_limit(bytes: usize) -> Self {
        Self {
            copies: Vec::new(),
            memory_limit: Some(bytes),
        }
    }

    /// Builds `count` fresh copies of `base`.
    pub fn materialize(base: &[T], count: usize) -> Result<Self> {
        let mut working_set = Self::new();
        working_set.refill(base, count)?;
        Ok(working_set)
    }

    /// Replaces the contents with `count` fresh copies of `base`.
    ///
    /// If the previous contents had the same shape, the existing buffers are overwritten in place
    /// and nothing is allocated. Otherwise the old copies are released first and new ones are
    /// allocated fallibly.
    pub fn refill(&mut self, base: &[T], count: usize) -> Result<()> {
        if count == 0 {
            return Err(BenchError::InvalidInvocationCount(count));
        }

        let requested_bytes = self.check_budget(base.len(), count)?;

        let same_shape =
            self.copies.len() == count && self.copies.iter().all(|copy| copy.len() == base.len());
        if same_shape {
            for copy in self.copies.iter_mut() {
                copy.clone_from_slice(base);
            }
            return Ok(());
        }

        self.copies = Vec::new();

        let out_of_resources = |_: TryReserveError| BenchError::OutOfResources { requested_bytes };

        let mut copies = Vec::new();
        copies.try_reserve_exact(count).map_err(out_of_resources)?;
        for _ in 0..count {
            let mut copy = Vec::new();
            copy.try_reserve_exact(base.len()).map_err(out_of_resources)?;
            copy.extend_from_slice(base);
            copies.push(copy);
        }

        self.copies = copies;
        Ok(())
    }

    fn check_budget(&self, len: usize, count: usize) -> Result<usize> {
        let elem_size = mem::size_of::<T>().max(1);
        let requested_bytes = count
            .checked_mul(len)
            .and_then(|elems| elems.checked_mul(elem_size))
            .ok_or(BenchError::OutOfResources {
                requested_bytes: usize::MAX,
            })?;

        let over_limit = self.memory_limit.is_some_and(|limit| requested_bytes > limit);
        if over_limit || requested_bytes > isize::MAX as usize {
            return Err(BenchError::OutOfResources { requested_bytes });
        }

        Ok(requested_bytes)
    }
}

impl<T> WorkingSet<T> {
    /// Number of copies.
    pub fn len(&self) -> usize {
        self.copies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.copies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[T]> {
        self.copies.get(index).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut [T]> {
        self.copies.get_mut(index).map(Vec::as_mut_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[T]> {
        self.copies.iter().map(Vec::as_slice)
    }

    /// Drops all copies and their memory.
    pub fn clear(&mut self) {
        self.copies = Vec::new();
    }
}
