//! Domain error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A JSON path expression is malformed.
    #[error("invalid JSON path '{path}': {reason}")]
    InvalidJsonPath {
        /// The offending expression.
        path: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Why a single executed case failed.
///
/// Every variant is recovered at the case boundary and turned into a failed
/// [`TestResult`](crate::result::TestResult); none of them aborts a run on
/// its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaseError {
    /// The network call could not complete (timeout, refused, DNS, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The observed status code is outside the expected set.
    #[error("unexpected status {actual}, expected {expected}")]
    UnexpectedStatus {
        /// Description of the accepted statuses.
        expected: String,
        /// Status the server returned.
        actual: u16,
    },

    /// The case needs a bearer token but no login has succeeded.
    #[error("no authentication context for '{case}': a successful login must run first")]
    MissingAuth {
        /// Name of the case that was skipped.
        case: String,
    },

    /// The status matched but the body check did not hold.
    #[error("status {status} matched but body check failed: {reason}")]
    BodyPredicate {
        /// Status the server returned.
        status: u16,
        /// Which check failed and why.
        reason: String,
    },
}

impl CaseError {
    /// Returns the serializable category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) => FailureKind::Transport,
            Self::UnexpectedStatus { .. } => FailureKind::UnexpectedStatus,
            Self::MissingAuth { .. } => FailureKind::MissingAuth,
            Self::BodyPredicate { .. } => FailureKind::BodyPredicate,
        }
    }

    /// Returns the observed status, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { actual, .. } => Some(*actual),
            Self::BodyPredicate { status, .. } => Some(*status),
            Self::Transport(_) | Self::MissingAuth { .. } => None,
        }
    }
}

/// Category of a failed result, as stored in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// See [`CaseError::Transport`].
    Transport,
    /// See [`CaseError::UnexpectedStatus`].
    UnexpectedStatus,
    /// See [`CaseError::MissingAuth`].
    MissingAuth,
    /// See [`CaseError::BodyPredicate`].
    BodyPredicate,
}

impl FailureKind {
    /// Short label used in console output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transport => "TransportError",
            Self::UnexpectedStatus => "UnexpectedStatusError",
            Self::MissingAuth => "MissingAuthError",
            Self::BodyPredicate => "BodyPredicateFailure",
        }
    }
}
