use std::io;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sort_throughput_rs::affinity::pin_to_core;
use sort_throughput_rs::{run_selected, HarnessConfig, JsonLinesReporter};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let config = match HarnessConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid harness configuration");
            return ExitCode::FAILURE;
        }
    };

    if let Some(core) = config.pin_core {
        pin_to_core(core);
    }

    info!(
        sort = %config.sort,
        sizes = ?config.sizes,
        kinds = ?config.kinds,
        invocations_per_iteration = config.invocations_per_iteration,
        iterations = config.iterations,
        "starting"
    );

    let stdout = io::stdout();
    let mut reporter = JsonLinesReporter::new(stdout.lock());
    let outcomes = run_selected(&config, &mut reporter);

    let failed = outcomes.iter().filter(|outcome| outcome.result.is_err()).count();
    info!(ran = outcomes.len(), failed, "done");

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
