use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::BenchError;

/// An in-place sort under measurement.
///
/// The harness never implements sorting itself, it only calls through this seam.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering;
}

pub struct RustStdUnstable {}

impl Sort for RustStdUnstable {
    fn name() -> String {
        "rust_std_unstable".into()
    }

    #[inline]
    fn sort<T>(arr: &mut [T])
    where
        T: Ord,
    {
        arr.sort_unstable();
    }

    #[inline]
    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        arr.sort_unstable_by(compare);
    }
}

pub struct RustStdStable {}

impl Sort for RustStdStable {
    fn name() -> String {
        "rust_std_stable".into()
    }

    #[inline]
    fn sort<T>(arr: &mut [T])
    where
        T: Ord,
    {
        arr.sort();
    }

    #[inline]
    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        arr.sort_by(compare);
    }
}

/// Runtime selection of a [`Sort`] implementation, for the configuration surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortChoice {
    #[default]
    RustStdUnstable,
    RustStdStable,
}

impl SortChoice {
    pub fn name(self) -> String {
        match self {
            SortChoice::RustStdUnstable => RustStdUnstable::name(),
            SortChoice::RustStdStable => RustStdStable::name(),
        }
    }
}

impl fmt::Display for SortChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for SortChoice {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rust_std_unstable" => Ok(SortChoice::RustStdUnstable),
            "rust_std_stable" => Ok(SortChoice::RustStdStable),
            other => Err(BenchError::Config(format!("unknown sort '{other}'"))),
        }
    }
}
