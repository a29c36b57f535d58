//! The element types a benchmark configuration can sort.
//!
//! Three variants isolate the cost of comparing through an indirection from the cost of the sort
//! algorithm itself: a native integer, a small value type wrapping an integer and a reference type
//! wrapping an integer.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::Serialize;

use crate::error::BenchError;

/// Runtime tag for an element variant, used by the configuration surface and in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    I32,
    IntStruct,
    IntClass,
}

impl ElementKind {
    pub const ALL: [ElementKind; 3] = [
        ElementKind::I32,
        ElementKind::IntStruct,
        ElementKind::IntClass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::I32 => "i32",
            ElementKind::IntStruct => "int_struct",
            ElementKind::IntClass => "int_class",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s.trim())
            .ok_or_else(|| BenchError::Config(format!("unknown element kind '{s}'")))
    }
}

/// A type that can be generated from a unique integer and sorted by the harness.
pub trait BenchValue: Ord + Clone + fmt::Debug {
    const KIND: ElementKind;

    /// Wraps `value`. Called once per element of the base sequence, never in the timed region.
    fn from_i32(value: i32) -> Self;
}

impl BenchValue for i32 {
    const KIND: ElementKind = ElementKind::I32;

    #[inline]
    fn from_i32(value: i32) -> Self {
        value
    }
}

/// Value type, copied inline and compared without indirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntStruct(i32);

impl IntStruct {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl PartialOrd for IntStruct {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IntStruct {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl BenchValue for IntStruct {
    const KIND: ElementKind = ElementKind::IntStruct;

    #[inline]
    fn from_i32(value: i32) -> Self {
        Self(value)
    }
}

/// Reference type. The integer is allocated once, clones share that allocation and every
/// comparison goes through the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntClass(Rc<i32>);

impl IntClass {
    pub fn new(value: i32) -> Self {
        Self(Rc::new(value))
    }

    pub fn value(&self) -> i32 {
        *self.0
    }

    /// True if both handles point to the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialOrd for IntClass {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IntClass {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        (*self.0).cmp(&*other.0)
    }
}

impl BenchValue for IntClass {
    const KIND: ElementKind = ElementKind::IntClass;

    #[inline]
    fn from_i32(value: i32) -> Self {
        Self::new(value)
    }
}
