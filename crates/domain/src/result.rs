//! Outcome of one executed request slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CaseError, FailureKind};
use crate::response::ResponseBody;

/// Result of a single executed case, matrix variant or burst slot.
///
/// Fields are private: a result is created once and never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    name: String,
    status: Option<u16>,
    passed: bool,
    detail: String,
    timestamp: DateTime<Utc>,
    elapsed_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    failure: Option<FailureKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_data: Option<ResponseBody>,
}

impl TestResult {
    /// Creates a passed result.
    #[must_use]
    pub fn pass(
        name: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
        timestamp: DateTime<Utc>,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            status: Some(status),
            passed: true,
            detail: detail.into(),
            timestamp,
            elapsed_ms,
            failure: None,
            request_payload: None,
            response_data: None,
        }
    }

    /// Creates a failed result, keeping the payloads for diagnosis.
    #[must_use]
    pub fn fail(
        name: impl Into<String>,
        error: &CaseError,
        timestamp: DateTime<Utc>,
        elapsed_ms: u64,
        request_payload: Option<String>,
        response_data: Option<ResponseBody>,
    ) -> Self {
        Self {
            name: name.into(),
            status: error.status(),
            passed: false,
            detail: error.to_string(),
            timestamp,
            elapsed_ms,
            failure: Some(error.kind()),
            request_payload,
            response_data,
        }
    }

    /// Test name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Observed status code, if a response arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Whether the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.passed
    }

    /// Free-text detail.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// When the request was issued.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Wall time spent on the case.
    #[must_use]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Failure category, for failed results.
    #[must_use]
    pub const fn failure(&self) -> Option<FailureKind> {
        self.failure
    }

    /// Request payload, kept only on failure.
    #[must_use]
    pub fn request_payload(&self) -> Option<&str> {
        self.request_payload.as_deref()
    }

    /// Response body, kept only on failure.
    #[must_use]
    pub const fn response_data(&self) -> Option<&ResponseBody> {
        self.response_data.as_ref()
    }
}
