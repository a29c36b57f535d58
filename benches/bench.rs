use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use sort_throughput_rs::affinity::pin_to_core;
use sort_throughput_rs::generator::random_seed;
use sort_throughput_rs::{
    BenchValue, ElementKind, HarnessConfig, IntClass, IntStruct, RustStdUnstable, SortBenchmark,
};

fn bench_kind<T: BenchValue>(c: &mut Criterion, config: &HarnessConfig) {
    let mut group = c.benchmark_group(format!("sort/{}", T::KIND));

    for &size in &config.sizes {
        let setup = SortBenchmark::<T, RustStdUnstable>::setup_with_limits(
            size,
            config.invocations_per_iteration,
            random_seed(),
            config.memory_limit,
        );
        let mut benchmark = match setup {
            Ok(benchmark) => benchmark,
            Err(err) => {
                eprintln!("skipping {}/{size}: {err}", T::KIND);
                continue;
            }
        };

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            // Criterion picks the invocation count per sample and doubles it during warm-up. It is
            // split into iterations of at most `invocations_per_iteration` copies, each
            // materialized before its timer starts.
            b.iter_custom(|iters| {
                if iters == 0 {
                    return Duration::ZERO;
                }

                benchmark
                    .measure_batched(iters as usize, config.invocations_per_iteration)
                    .unwrap_or_else(|err| panic!("{}/{size}: {err}", T::KIND))
            });
        });
    }

    group.finish();
}

fn bench(c: &mut Criterion) {
    let config = HarnessConfig::from_env().unwrap_or_else(|err| panic!("{err}"));

    if let Some(core) = config.pin_core {
        if !pin_to_core(core) {
            eprintln!("could not pin to core {core}, running unpinned");
        }
    }

    for kind in &config.kinds {
        match kind {
            ElementKind::I32 => bench_kind::<i32>(c, &config),
            ElementKind::IntStruct => bench_kind::<IntStruct>(c, &config),
            ElementKind::IntClass => bench_kind::<IntClass>(c, &config),
        }
    }
}

criterion_group!(benches, bench);
criterion_main!(benches);
