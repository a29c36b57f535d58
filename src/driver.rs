use std::hint::black_box;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::config::HarnessConfig;
use crate::cursor::InvocationCursor;
use crate::error::{BenchError, Result};
use crate::generator;
use crate::materialize::WorkingSet;
use crate::report::{configuration_name, ConfigurationReport, IterationSample, Reporter};
use crate::sort::{RustStdStable, RustStdUnstable, Sort, SortChoice};
use crate::values::{BenchValue, ElementKind, IntClass, IntStruct};

/// One configuration (element type `T`, sequence length `size`) measuring the sort `S`.
///
/// Per measured iteration the life cycle is `setup_iteration`, `invocations_per_iteration` calls
/// of `invoke` (the only timed part) and `cleanup_iteration`.
pub struct SortBenchmark<T, S> {
    size: usize,
    invocations_per_iteration: usize,
    base: Vec<T>,
    working_set: WorkingSet<T>,
    cursor: InvocationCursor,
    _sort: PhantomData<S>,
}

impl<T: BenchValue, S: Sort> SortBenchmark<T, S> {
    /// Generates the base sequence. Runs once per configuration.
    pub fn setup(size: usize, invocations_per_iteration: usize) -> Result<Self> {
        Self::setup_with_limits(size, invocations_per_iteration, generator::random_seed(), None)
    }

    /// Like [`setup`](Self::setup), with an explicit seed and a cap on working set memory.
    pub fn setup_with_limits(
        size: usize,
        invocations_per_iteration: usize,
        seed: u64,
        memory_limit: Option<usize>,
    ) -> Result<Self> {
        let working_set = memory_limit.map_or_else(WorkingSet::new, WorkingSet::with_memory_limit);
        let base = generator::generate_with_seed(size, seed)?;
        Self::from_base(base, invocations_per_iteration, working_set)
    }

    fn from_base(
        base: Vec<T>,
        invocations_per_iteration: usize,
        working_set: WorkingSet<T>,
    ) -> Result<Self> {
        if invocations_per_iteration == 0 {
            return Err(BenchError::InvalidInvocationCount(invocations_per_iteration));
        }

        Ok(Self {
            size: base.len(),
            invocations_per_iteration,
            base,
            working_set,
            cursor: InvocationCursor::new(invocations_per_iteration),
            _sort: PhantomData,
        })
    }

    /// Materializes one fresh copy of the base sequence per upcoming invocation.
    pub fn setup_iteration(&mut self) -> Result<()> {
        self.prepare(self.invocations_per_iteration)
    }

    fn prepare(&mut self, invocations: usize) -> Result<()> {
        self.working_set.refill(&self.base, invocations)?;
        if self.cursor.capacity() != invocations {
            self.cursor = InvocationCursor::new(invocations);
        }
        self.cursor.reset();
        Ok(())
    }

    /// Sorts the next unconsumed copy. This is the body of the timed region.
    #[inline]
    pub fn invoke(&mut self) -> Result<()> {
        let index = self.cursor.advance()?;
        let copy = self
            .working_set
            .get_mut(index)
            .ok_or(BenchError::WorkingSetMissing { index })?;

        S::sort(black_box(&mut copy[..self.size]));
        Ok(())
    }

    pub fn cleanup_iteration(&mut self) {
        self.cursor.reset();
    }

    /// Runs one full iteration with `invocations` timed calls and returns the elapsed time of
    /// the timed region only.
    pub fn measure(&mut self, invocations: usize) -> Result<Duration> {
        self.prepare(invocations)?;

        let start = Instant::now();
        for _ in 0..invocations {
            self.invoke()?;
        }
        let elapsed = start.elapsed();

        self.cleanup_iteration();
        Ok(elapsed)
    }

    /// Times `invocations` calls split into iterations of at most `max_per_iteration` copies each,
    /// and returns the summed elapsed time. Keeps the working set bounded when the caller picks
    /// large invocation counts.
    pub fn measure_batched(
        &mut self,
        invocations: usize,
        max_per_iteration: usize,
    ) -> Result<Duration> {
        if max_per_iteration == 0 {
            return Err(BenchError::InvalidInvocationCount(max_per_iteration));
        }

        let mut remaining = invocations;
        let mut elapsed = Duration::ZERO;
        while remaining > 0 {
            let chunk = remaining.min(max_per_iteration);
            elapsed += self.measure(chunk)?;
            remaining -= chunk;
        }

        Ok(elapsed)
    }

    pub fn run_iteration(&mut self) -> Result<IterationSample> {
        let invocations = self.invocations_per_iteration;
        let elapsed = self.measure(invocations)?;

        Ok(IterationSample {
            elapsed,
            invocations,
        })
    }

    /// Runs `iterations` measured iterations. Any error discards all samples taken so far.
    pub fn run(&mut self, iterations: usize) -> Result<ConfigurationReport> {
        if iterations == 0 {
            return Err(BenchError::Config("at least one measured iteration is required".into()));
        }

        let mut report =
            ConfigurationReport::new(S::name(), T::KIND, self.size, self.invocations_per_iteration);

        for iteration in 0..iterations {
            let sample = self.run_iteration()?;
            debug!(
                iteration,
                per_invocation_ns = sample.per_invocation_ns(),
                "iteration finished"
            );
            report.push(sample);
        }

        self.working_set.clear();
        Ok(report)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn invocations_per_iteration(&self) -> usize {
        self.invocations_per_iteration
    }

    pub fn base(&self) -> &[T] {
        &self.base
    }

    pub fn working_set(&self) -> &WorkingSet<T> {
        &self.working_set
    }

    pub fn cursor(&self) -> &InvocationCursor {
        &self.cursor
    }
}

/// Result of one configuration in [`run_all`].
#[derive(Debug)]
pub struct ConfigurationOutcome {
    pub name: String,
    pub result: Result<()>,
}

/// Runs a single configuration to completion and hands the samples to `reporter`.
///
/// Nothing is reported if any step fails.
pub fn run_configuration<T, S, R>(
    config: &HarnessConfig,
    size: usize,
    reporter: &mut R,
) -> Result<()>
where
    T: BenchValue,
    S: Sort,
    R: Reporter + ?Sized,
{
    let mut benchmark = SortBenchmark::<T, S>::setup_with_limits(
        size,
        config.invocations_per_iteration,
        generator::random_seed(),
        config.memory_limit,
    )?;
    let report = benchmark.run(config.iterations)?;

    let fastest_ns = report.samples.iter().copied().fold(f64::INFINITY, f64::min);
    debug!(name = %report.name(), fastest_ns, "configuration finished");

    reporter.report(&report)
}

/// Runs every selected `(kind, size)` configuration of `config` with the sort `S`, one after the
/// other. A failing configuration is logged and recorded, the remaining ones still run.
pub fn run_all<S, R>(config: &HarnessConfig, reporter: &mut R) -> Vec<ConfigurationOutcome>
where
    S: Sort,
    R: Reporter + ?Sized,
{
    let sort_name = S::name();
    let mut outcomes = Vec::new();

    for &kind in &config.kinds {
        for &size in &config.sizes {
            let name = configuration_name(&sort_name, kind, size);
            if !config.is_selected(&name) {
                continue;
            }

            info!(%name, iterations = config.iterations, "running configuration");
            let result = match kind {
                ElementKind::I32 => run_configuration::<i32, S, R>(config, size, reporter),
                ElementKind::IntStruct => {
                    run_configuration::<IntStruct, S, R>(config, size, reporter)
                }
                ElementKind::IntClass => {
                    run_configuration::<IntClass, S, R>(config, size, reporter)
                }
            };

            if let Err(err) = &result {
                error!(%name, error = %err, "configuration failed");
            }

            outcomes.push(ConfigurationOutcome { name, result });
        }
    }

    outcomes
}

/// [`run_all`] with the sort picked at runtime.
pub fn run_selected<R>(config: &HarnessConfig, reporter: &mut R) -> Vec<ConfigurationOutcome>
where
    R: Reporter + ?Sized,
{
    match config.sort {
        SortChoice::RustStdUnstable => run_all::<RustStdUnstable, R>(config, reporter),
        SortChoice::RustStdStable => run_all::<RustStdStable, R>(config, reporter),
    }
}
