//! Apiprobe Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP client, clock, progress sink)
//! - Request execution against a base URL
//! - The scenario runner and the built-in suites

pub mod execute_request;
pub mod ports;
pub mod runner;
pub mod suites;

#[cfg(test)]
mod test_support;

pub use execute_request::{ExecuteRequest, ExecuteRequestError, ExecuteResult};
pub use ports::{
    Clock, HttpClient, HttpClientError, HttpFuture, NullProgress, OutgoingRequest, ProgressSink,
};
pub use runner::{DEFAULT_MATRIX_DELAY, RunOptions, ScenarioRunner};
pub use suites::{SuiteKind, SuiteSettings};
