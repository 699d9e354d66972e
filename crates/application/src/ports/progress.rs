//! Progress reporting port

use apiprobe_domain::{RunAbort, Suite, TestResult};

/// Receives results as they are produced.
///
/// The console adapter prints one PASS/FAIL line per result; tests use
/// [`NullProgress`] or a recording sink.
pub trait ProgressSink: Send + Sync {
    /// A suite is about to run.
    fn suite_started(&self, suite: &Suite);

    /// A result was created and appended to the report.
    fn result_recorded(&self, result: &TestResult);

    /// The run stopped early.
    fn run_aborted(&self, abort: &RunAbort);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn suite_started(&self, _suite: &Suite) {}

    fn result_recorded(&self, _result: &TestResult) {}

    fn run_aborted(&self, _abort: &RunAbort) {}
}
