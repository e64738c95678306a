use thiserror::Error;

/// Errors produced by the Recap summarization stack.
#[derive(Debug, Error)]
pub enum RecapError {
    /// The computed input budget is non-positive for this configuration.
    #[error("invalid budget: {0}")]
    InvalidBudget(String),

    /// A provider error that may succeed on retry (connectivity, timeout,
    /// rate limit, server error).
    #[error("transient provider error: {0}")]
    Transient(String),

    /// A provider error flagged as not worth retrying.
    #[error("non-retryable provider error: {0}")]
    NonRetryable(String),

    /// A summarization call gave up, either by exhausting its attempt
    /// budget or by hitting a non-retryable error.
    #[error("summarization call failed after {attempts} attempt(s): {cause}")]
    CallFailed { attempts: usize, cause: String },

    /// A caller-side precondition did not hold.
    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("cache error: {0}")]
    Cache(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parsing(String),
}
