//! Apiprobe Domain - Core types
//!
//! This crate defines the model of the contract-verification harness:
//! request templates, expectations, scenarios, results and reports.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod id;
pub mod report;
pub mod request;
pub mod response;
pub mod result;
pub mod scenario;
pub mod testing;

pub use auth::{AuthContext, AuthMode};
pub use error::{CaseError, DomainError, DomainResult, FailureKind};
pub use id::generate_run_tag;
pub use report::{FailureEntry, Report, RunAbort, Summary, VALIDATION_STATUS};
pub use request::{Header, Headers, HttpMethod, RequestBody, RequestTemplate};
pub use response::{Response, ResponseBody, StatusCode};
pub use result::TestResult;
pub use scenario::{
    DEFAULT_BURST_SIZE, DEFAULT_TOKEN_KEY, PayloadVariant, Scenario, Suite, TestCase,
};
pub use testing::{BodyPredicate, ConditionalStatus, Expectation, StatusExpectation};
