//! Startup and output errors.

use apiprobe_application::{ExecuteRequestError, HttpClientError};
use apiprobe_infrastructure::{ConfigError, SerializationError};
use thiserror::Error;

/// Everything that keeps a run from starting or its report from being
/// written. Failed checks are not errors; they end up in the report.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("cannot create HTTP client: {0}")]
    Client(#[from] HttpClientError),

    /// The base URL was rejected.
    #[error("invalid target: {0}")]
    Target(#[from] ExecuteRequestError),

    /// The JSON report could not be written.
    #[error("cannot write report: {0}")]
    Report(#[from] SerializationError),

    /// The summary could not be printed.
    #[error("cannot write summary: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Exit code for startup failures, distinct from a failed run.
    pub const EXIT_CODE: u8 = 2;
}
