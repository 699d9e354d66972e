//! Report aggregation.

use serde::{Deserialize, Serialize};

use crate::result::TestResult;

/// Status code the harness calls out separately in summaries.
pub const VALIDATION_STATUS: u16 = 422;

/// Why a run stopped before executing every scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAbort {
    /// Name of the case whose failure stopped the run.
    pub case: String,
    /// Failure detail of that case.
    pub reason: String,
}

/// Ordered collection of results for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    results: Vec<TestResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aborted: Option<RunAbort>,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            results: Vec::new(),
            aborted: None,
        }
    }

    /// Appends a result.
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Records that the run stopped early.
    pub fn abort(&mut self, abort: RunAbort) {
        self.aborted = Some(abort);
    }

    /// Results in execution order.
    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// The abort, if the run stopped early.
    #[must_use]
    pub const fn aborted(&self) -> Option<&RunAbort> {
        self.aborted.as_ref()
    }

    /// Number of results.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Produces the deterministic summary.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let total = self.results.len();
        let passed = self.results.iter().filter(|r| r.passed()).count();
        let failures = self
            .results
            .iter()
            .filter(|r| !r.passed())
            .map(|r| FailureEntry {
                name: r.name().to_string(),
                detail: r.detail().to_string(),
            })
            .collect();
        let validation_errors = self
            .results
            .iter()
            .filter(|r| r.status() == Some(VALIDATION_STATUS))
            .map(|r| r.name().to_string())
            .collect();

        Summary {
            total,
            passed,
            failed: total - passed,
            pass_rate: pass_rate(passed, total),
            failures,
            validation_errors,
            aborted: self.aborted.clone(),
        }
    }

    /// Success only when nothing failed and the run was not aborted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.aborted.is_none() && self.results.iter().all(TestResult::passed)
    }

    /// Process exit code: 0 on success, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.is_success())
    }
}

/// One line of the failure list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Test name.
    pub name: String,
    /// Failure detail.
    pub detail: String,
}

/// Aggregated view of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Total results.
    pub total: usize,
    /// Passed results.
    pub passed: usize,
    /// Failed results.
    pub failed: usize,
    /// Pass percentage, rounded to one decimal place.
    pub pass_rate: f64,
    /// Failed results in execution order.
    pub failures: Vec<FailureEntry>,
    /// Names of results that observed HTTP 422, pass or fail.
    pub validation_errors: Vec<String>,
    /// Set when the run stopped early.
    pub aborted: Option<RunAbort>,
}

impl Summary {
    /// Pass rate formatted with one decimal, e.g. `87.5%`.
    #[must_use]
    pub fn pass_rate_display(&self) -> String {
        format!("{:.1}%", self.pass_rate)
    }
}

#[allow(clippy::cast_precision_loss)]
fn pass_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        ((passed as f64 / total as f64) * 1000.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CaseError;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn pass(name: &str, status: u16) -> TestResult {
        TestResult::pass(name, status, "ok", Utc::now(), 1)
    }

    fn fail(name: &str, status: u16) -> TestResult {
        let err = CaseError::UnexpectedStatus {
            expected: "= 200".to_string(),
            actual: status,
        };
        TestResult::fail(name, &err, Utc::now(), 1, None, None)
    }

    #[test]
    fn test_summary_counts_and_rate() {
        let mut report = Report::new();
        report.push(pass("a", 200));
        report.push(fail("b", 422));
        report.push(pass("c", 200));

        let summary = report.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.pass_rate, 66.7);
        assert_eq!(summary.pass_rate_display(), "66.7%");
        assert_eq!(
            summary.failures,
            vec![FailureEntry {
                name: "b".to_string(),
                detail: "unexpected status 422, expected = 200".to_string(),
            }]
        );
        assert_eq!(summary.validation_errors, vec!["b".to_string()]);
        assert!(!report.is_success());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_expected_422_is_listed_but_passes() {
        let mut report = Report::new();
        report.push(pass("missing fields [1: empty object]", 422));

        let summary = report.summary();
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.validation_errors.len(), 1);
        assert!(report.is_success());
    }

    #[test]
    fn test_empty_report_is_success() {
        let report = Report::new();
        assert_eq!(report.summary().pass_rate, 100.0);
        assert!(report.is_success());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_abort_fails_the_run() {
        let mut report = Report::new();
        report.push(pass("Register", 200));
        report.abort(RunAbort {
            case: "Login".to_string(),
            reason: "unexpected status 401".to_string(),
        });

        assert!(!report.is_success());
        assert_eq!(
            report.summary().aborted.map(|a| a.case),
            Some("Login".to_string())
        );
    }

    #[test]
    fn test_order_is_preserved() {
        let mut report = Report::new();
        for name in ["first", "second", "third"] {
            report.push(pass(name, 200));
        }
        let names: Vec<_> = report.results().iter().map(TestResult::name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
