//! Micro-benchmark harness measuring in-place sort throughput over different element types.
//!
//! All allocation and copying happens outside the timed region: the base sequence is generated
//! once per configuration and a fresh copy per timed invocation is materialized before every
//! measured iteration.

pub mod affinity;
pub mod config;
pub mod cursor;
pub mod driver;
pub mod error;
pub mod generator;
pub mod materialize;
pub mod report;
pub mod sort;
pub mod values;

pub use config::HarnessConfig;
pub use cursor::InvocationCursor;
pub use driver::{run_all, run_configuration, run_selected, ConfigurationOutcome, SortBenchmark};
pub use error::{BenchError, Result};
pub use materialize::WorkingSet;
pub use report::{
    CollectingReporter, ConfigurationReport, IterationSample, JsonLinesReporter, Reporter,
};
pub use sort::{RustStdStable, RustStdUnstable, Sort, SortChoice};
pub use values::{BenchValue, ElementKind, IntClass, IntStruct};
