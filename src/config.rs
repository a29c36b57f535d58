use std::env;
use std::str::FromStr;

use regex::Regex;

use crate::error::{BenchError, Result};
use crate::sort::SortChoice;
use crate::values::ElementKind;

/// Invocations per measured iteration in the reference configuration.
pub const DEFAULT_INVOCATIONS_PER_ITERATION: usize = 40_000;

pub const DEFAULT_ITERATIONS: usize = 15;

pub const DEFAULT_SIZE: usize = 512;

/// Which configurations to run and how to measure them.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub sizes: Vec<usize>,
    pub kinds: Vec<ElementKind>,
    pub invocations_per_iteration: usize,
    pub iterations: usize,
    pub sort: SortChoice,
    /// Only configurations whose name matches are run.
    pub filter: Option<Regex>,
    /// Upper bound for the working set of one iteration, in bytes.
    pub memory_limit: Option<usize>,
    pub pin_core: Option<usize>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            sizes: vec![DEFAULT_SIZE],
            kinds: ElementKind::ALL.to_vec(),
            invocations_per_iteration: DEFAULT_INVOCATIONS_PER_ITERATION,
            iterations: DEFAULT_ITERATIONS,
            sort: SortChoice::default(),
            filter: None,
            memory_limit: None,
            pin_core: None,
        }
    }
}

impl HarnessConfig {
    /// Reads the `SORT_BENCH_*` environment variables, unset ones keep their default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(sizes) = lookup("SORT_BENCH_SIZES") {
            config.sizes = parse_list(&sizes, "SORT_BENCH_SIZES")?;
        }
        if let Some(kinds) = lookup("SORT_BENCH_KINDS") {
            config.kinds = parse_list(&kinds, "SORT_BENCH_KINDS")?;
        }
        if let Some(invocations) = lookup("SORT_BENCH_INVOCATIONS") {
            config.invocations_per_iteration = parse_value(&invocations, "SORT_BENCH_INVOCATIONS")?;
        }
        if let Some(iterations) = lookup("SORT_BENCH_ITERATIONS") {
            config.iterations = parse_value(&iterations, "SORT_BENCH_ITERATIONS")?;
        }
        if let Some(sort) = lookup("SORT_BENCH_SORT") {
            config.sort = sort.parse()?;
        }
        if let Some(filter) = lookup("SORT_BENCH_FILTER") {
            config.filter = Some(Regex::new(&filter)?);
        }
        if let Some(limit) = lookup("SORT_BENCH_MEMORY_LIMIT") {
            config.memory_limit = Some(parse_value(&limit, "SORT_BENCH_MEMORY_LIMIT")?);
        }
        if let Some(core) = lookup("SORT_BENCH_PIN_CORE") {
            config.pin_core = Some(parse_value(&core, "SORT_BENCH_PIN_CORE")?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that could never produce a measurement.
    pub fn validate(&self) -> Result<()> {
        if let Some(&size) = self.sizes.iter().find(|&&size| size == 0) {
            return Err(BenchError::InvalidSize(size));
        }
        if self.invocations_per_iteration == 0 {
            return Err(BenchError::InvalidInvocationCount(0));
        }
        if self.iterations == 0 {
            return Err(BenchError::Config("at least one measured iteration is required".into()));
        }
        if self.sizes.is_empty() || self.kinds.is_empty() {
            return Err(BenchError::Config("no configurations selected".into()));
        }

        Ok(())
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter.is_match(name))
    }
}

fn parse_value<T: FromStr>(raw: &str, key: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| BenchError::Config(format!("{key}: cannot parse '{raw}'")))
}

fn parse_list<T: FromStr>(raw: &str, key: &str) -> Result<Vec<T>> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_value(item, key))
        .collect()
}
