use thiserror::Error;

/// Everything that can abort a benchmark configuration.
///
/// None of these are retried. A failed configuration is reported to the caller and produces no
/// measurement.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The requested sequence length was zero.
    #[error("invalid size {0}, the sequence length must be positive")]
    InvalidSize(usize),

    /// The requested number of invocations per iteration was zero.
    #[error("invalid invocation count {0}, at least one invocation per iteration is required")]
    InvalidInvocationCount(usize),

    /// The working set for one iteration could not be allocated.
    #[error("out of resources, could not allocate {requested_bytes} bytes of working memory")]
    OutOfResources { requested_bytes: usize },

    /// More timed invocations were attempted than copies were materialized.
    #[error("invocation cursor exhausted after {capacity} invocations without a reset")]
    CursorExhausted { capacity: usize },

    /// A timed invocation was attempted before the iteration was set up.
    #[error("no working set copy at index {index}, the iteration was not set up")]
    WorkingSetMissing { index: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid configuration filter: {0}")]
    Filter(#[from] regex::Error),

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;
