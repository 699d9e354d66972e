//! Console output: one line per result, then the summary.

use std::io::{self, Write};
use std::sync::Mutex;

use apiprobe_application::ports::ProgressSink;
use apiprobe_domain::{RunAbort, Suite, Summary, TestResult};

const RULE_WIDTH: usize = 60;

/// Streams PASS/FAIL lines to a writer as results arrive.
///
/// Failed results are followed by the request payload and the response
/// body, verbatim.
pub struct ConsoleReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleReporter<io::Stdout> {
    /// Reporter writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    /// Reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn emit(&self, write: impl FnOnce(&mut W) -> io::Result<()>) {
        let result = match self.out.lock() {
            Ok(mut out) => write(&mut *out).and_then(|()| out.flush()),
            Err(poisoned) => write(&mut *poisoned.into_inner()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write progress");
        }
    }
}

impl<W: Write + Send> ProgressSink for ConsoleReporter<W> {
    fn suite_started(&self, suite: &Suite) {
        self.emit(|out| {
            writeln!(out)?;
            writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
            writeln!(
                out,
                "Suite: {} ({} checks)",
                suite.name,
                suite.expected_results()
            )?;
            writeln!(out, "{}", "=".repeat(RULE_WIDTH))
        });
    }

    fn result_recorded(&self, result: &TestResult) {
        self.emit(|out| write_result(out, result));
    }

    fn run_aborted(&self, abort: &RunAbort) {
        self.emit(|out| {
            writeln!(
                out,
                "STOP '{}' failed, remaining scenarios skipped",
                abort.case
            )
        });
    }
}

fn write_result(out: &mut impl Write, result: &TestResult) -> io::Result<()> {
    let mark = if result.passed() { "PASS" } else { "FAIL" };
    writeln!(
        out,
        "{mark} {}: {} ({} ms)",
        result.name(),
        result.detail(),
        result.elapsed_ms()
    )?;

    if let Some(payload) = result.request_payload() {
        writeln!(out, "   Request:")?;
        write_indented(out, payload)?;
    }
    if let Some(body) = result.response_data() {
        writeln!(out, "   Response:")?;
        if body.is_empty() {
            writeln!(out, "      <empty>")?;
        } else {
            write_indented(out, &body.to_text())?;
        }
    }
    Ok(())
}

fn write_indented(out: &mut impl Write, text: &str) -> io::Result<()> {
    for line in text.lines() {
        writeln!(out, "      {line}")?;
    }
    Ok(())
}

/// Writes the final summary.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_summary(out: &mut impl Write, summary: &Summary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "TEST SUMMARY")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Total Tests: {}", summary.total)?;
    writeln!(out, "Passed: {}", summary.passed)?;
    writeln!(out, "Failed: {}", summary.failed)?;
    writeln!(out, "Success Rate: {}", summary.pass_rate_display())?;

    if !summary.failures.is_empty() {
        writeln!(out)?;
        writeln!(out, "FAILED TESTS:")?;
        for failure in &summary.failures {
            writeln!(out, "  - {}: {}", failure.name, failure.detail)?;
        }
    }

    if !summary.validation_errors.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "422 RESPONSES ({}):",
            summary.validation_errors.len()
        )?;
        for name in &summary.validation_errors {
            writeln!(out, "  - {name}")?;
        }
    }

    if let Some(abort) = &summary.aborted {
        writeln!(out)?;
        writeln!(out, "RUN ABORTED at '{}': {}", abort.case, abort.reason)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use apiprobe_domain::{CaseError, Report, ResponseBody};
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn failed_result() -> TestResult {
        let error = CaseError::UnexpectedStatus {
            expected: "status = 200".to_string(),
            actual: 422,
        };
        TestResult::fail(
            "Add Staff",
            &error,
            Utc::now(),
            12,
            Some("{\n  \"username\": \"a\"\n}".to_string()),
            Some(ResponseBody::Json(json!({"detail": "bad"}))),
        )
    }

    fn output(reporter: ConsoleReporter<Vec<u8>>) -> String {
        String::from_utf8_lossy(&reporter.into_inner()).into_owned()
    }

    #[test]
    fn test_pass_line() {
        let reporter = ConsoleReporter::new(Vec::new());
        reporter.result_recorded(&TestResult::pass("Login", 200, "status 200 OK", Utc::now(), 5));
        assert_eq!(output(reporter), "PASS Login: status 200 OK (5 ms)\n");
    }

    #[test]
    fn test_failure_dumps_payloads_verbatim() {
        let reporter = ConsoleReporter::new(Vec::new());
        reporter.result_recorded(&failed_result());
        let text = output(reporter);

        assert!(text.starts_with("FAIL Add Staff: unexpected status 422"));
        assert!(text.contains("   Request:\n      {\n        \"username\": \"a\"\n      }\n"));
        assert!(text.contains("   Response:\n      {\n        \"detail\": \"bad\"\n      }\n"));
    }

    #[test]
    fn test_summary_lists_failures_and_422s() {
        let mut report = Report::new();
        report.push(TestResult::pass("Login", 200, "ok", Utc::now(), 1));
        report.push(failed_result());

        let mut out = Vec::new();
        write_summary(&mut out, &report.summary()).expect("write to Vec");
        let text = String::from_utf8_lossy(&out);

        assert!(text.contains("Total Tests: 2\nPassed: 1\nFailed: 1\nSuccess Rate: 50.0%\n"));
        assert!(text.contains("FAILED TESTS:\n  - Add Staff: unexpected status 422"));
        assert!(text.contains("422 RESPONSES (1):\n  - Add Staff\n"));
        assert!(!text.contains("RUN ABORTED"));
    }
}
