//! Hand-off of measurements to whatever aggregates them.
//!
//! The harness produces the raw distribution of per-invocation cost for each configuration.
//! Statistical treatment and presentation belong to the consumer of these reports.

use std::io::Write;
use std::time::Duration;

use serde::Serialize;

use crate::error::Result;
use crate::values::ElementKind;

/// Timing of one measured iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationSample {
    pub elapsed: Duration,
    pub invocations: usize,
}

impl IterationSample {
    /// Elapsed time of the timed region divided by the number of invocations in it.
    pub fn per_invocation_ns(&self) -> f64 {
        if self.invocations == 0 {
            return 0.0;
        }

        self.elapsed.as_nanos() as f64 / self.invocations as f64
    }
}

/// All samples of one successfully completed configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationReport {
    pub sort: String,
    pub kind: ElementKind,
    pub size: usize,
    pub invocations_per_iteration: usize,
    /// Per-invocation cost in nanoseconds, one entry per measured iteration.
    pub samples: Vec<f64>,
}

impl ConfigurationReport {
    pub fn new(
        sort: String,
        kind: ElementKind,
        size: usize,
        invocations_per_iteration: usize,
    ) -> Self {
        Self {
            sort,
            kind,
            size,
            invocations_per_iteration,
            samples: Vec::new(),
        }
    }

    pub fn push(&mut self, sample: IterationSample) {
        self.samples.push(sample.per_invocation_ns());
    }

    /// `<sort>/<kind>/<size>`, also what the configuration filter matches against.
    pub fn name(&self) -> String {
        configuration_name(&self.sort, self.kind, self.size)
    }
}

pub fn configuration_name(sort: &str, kind: ElementKind, size: usize) -> String {
    format!("{sort}/{kind}/{size}")
}

/// Receives the result of every configuration that ran to completion.
pub trait Reporter {
    fn report(&mut self, report: &ConfigurationReport) -> Result<()>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, report: &ConfigurationReport) -> Result<()> {
        (**self).report(report)
    }
}

/// Writes each report as one JSON object per line.
pub struct JsonLinesReporter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for JsonLinesReporter<W> {
    fn report(&mut self, report: &ConfigurationReport) -> Result<()> {
        serde_json::to_writer(&mut self.writer, report)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub reports: Vec<ConfigurationReport>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, report: &ConfigurationReport) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}
