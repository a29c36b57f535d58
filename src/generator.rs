use std::collections::HashSet;
use std::env;

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::error::{BenchError, Result};
use crate::values::BenchValue;

pub const DEFAULT_SEED: u64 = 12345;

static SEED: Lazy<u64> = Lazy::new(|| {
    env::var("OVERRIDE_SEED")
        .ok()
        .and_then(|seed| seed.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SEED)
});

/// The seed used by [`generate`]. Read once from `OVERRIDE_SEED`, falls back to [`DEFAULT_SEED`].
pub fn random_seed() -> u64 {
    *SEED
}

/// Generates the base sequence for one configuration with the process seed.
pub fn generate<T: BenchValue>(size: usize) -> Result<Vec<T>> {
    generate_with_seed(size, random_seed())
}

/// Generates `size` pairwise distinct values in random, never ascending, order.
///
/// The same `size` and `seed` always produce the same sequence.
pub fn generate_with_seed<T: BenchValue>(size: usize, seed: u64) -> Result<Vec<T>> {
    if size == 0 {
        return Err(BenchError::InvalidSize(size));
    }

    let values = unique_i32(size, seed)?;

    Ok(values.into_iter().map(T::from_i32).collect())
}

fn unique_i32(size: usize, seed: u64) -> Result<Vec<i32>> {
    // There are only 2^32 distinct i32 values.
    if u32::try_from(size).is_err() {
        return Err(BenchError::InvalidSize(size));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(size);
    let mut values = Vec::with_capacity(size);

    while values.len() < size {
        let value = rng.gen::<i32>();
        if seen.insert(value) {
            values.push(value);
        }
    }

    // A random draw can come out ascending for tiny sizes, which would not exercise the sort.
    if values.windows(2).all(|w| w[0] <= w[1]) {
        values.reverse();
    }

    Ok(values)
}
