//! Scenario Runner
//!
//! Executes suites in declared order, threads the [`AuthContext`] from
//! login scenarios into dependent cases, and appends one [`TestResult`]
//! per executed request slot to the [`Report`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use apiprobe_domain::{
    AuthContext, BodyPredicate, CaseError, Expectation, PayloadVariant, Report, RequestTemplate,
    Response, RunAbort, Scenario, Suite, TestCase, TestResult,
};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::execute_request::ExecuteRequest;
use crate::ports::{Clock, HttpClient, ProgressSink};

/// Default pause between matrix variants.
pub const DEFAULT_MATRIX_DELAY: Duration = Duration::from_millis(100);

/// Tunables of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Pause between two variants of the same matrix.
    pub matrix_delay: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            matrix_delay: DEFAULT_MATRIX_DELAY,
        }
    }
}

/// Runs one request and turns the outcome into a [`TestResult`].
struct CaseExecutor<C: HttpClient> {
    requests: ExecuteRequest<C>,
    clock: Arc<dyn Clock>,
}

impl<C: HttpClient> Clone for CaseExecutor<C> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C: HttpClient> CaseExecutor<C> {
    async fn run(
        &self,
        name: &str,
        template: &RequestTemplate,
        expect: &Expectation,
        auth: &AuthContext,
    ) -> TestResult {
        self.run_with(name, template, auth, |response| expect.evaluate(response))
            .await
    }

    async fn run_with<F>(
        &self,
        name: &str,
        template: &RequestTemplate,
        auth: &AuthContext,
        check: F,
    ) -> TestResult
    where
        F: FnOnce(&Response) -> Result<String, CaseError>,
    {
        let timestamp = self.clock.now();
        let started = Instant::now();

        let response = match self.requests.prepare(name, template, auth) {
            Ok(request) => {
                tracing::debug!(case = name, method = %request.method, url = %request.url, "sending");
                self.requests.execute(&request).await.map_err(CaseError::from)
            }
            Err(e) => Err(CaseError::from(e)),
        };
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let (error, body) = match response {
            Ok(response) => match check(&response) {
                Ok(detail) => {
                    return TestResult::pass(
                        name,
                        response.status_code(),
                        detail,
                        timestamp,
                        elapsed_ms,
                    );
                }
                Err(error) => (error, Some(response.body)),
            },
            Err(error) => (error, None),
        };

        tracing::debug!(case = name, error = %error, "case failed");
        TestResult::fail(
            name,
            &error,
            timestamp,
            elapsed_ms,
            template.body.display_payload(),
            body,
        )
    }
}

/// Drives suites against one target.
pub struct ScenarioRunner<C: HttpClient + 'static> {
    executor: CaseExecutor<C>,
    progress: Arc<dyn ProgressSink>,
    options: RunOptions,
}

impl<C: HttpClient + 'static> ScenarioRunner<C> {
    /// Creates a runner with default options.
    pub fn new(
        requests: ExecuteRequest<C>,
        clock: Arc<dyn Clock>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            executor: CaseExecutor { requests, clock },
            progress,
            options: RunOptions::default(),
        }
    }

    /// Replaces the run options (builder pattern).
    #[must_use]
    pub const fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the suites in order and returns the report.
    ///
    /// Each suite starts unauthenticated. A failed login, or a failed case
    /// marked `halt_on_failure`, stops the whole run; the report then
    /// carries the abort.
    pub async fn run(&self, suites: &[Suite]) -> Report {
        let mut report = Report::new();

        for suite in suites {
            tracing::info!(
                suite = %suite.name,
                scenarios = suite.scenarios.len(),
                expected_results = suite.expected_results(),
                "running suite"
            );
            self.progress.suite_started(suite);

            let mut auth = AuthContext::none();
            if let Err(abort) = self.run_suite(suite, &mut auth, &mut report).await {
                tracing::warn!(case = %abort.case, reason = %abort.reason, "run aborted");
                self.progress.run_aborted(&abort);
                report.abort(abort);
                break;
            }
        }

        report
    }

    async fn run_suite(
        &self,
        suite: &Suite,
        auth: &mut AuthContext,
        report: &mut Report,
    ) -> Result<(), RunAbort> {
        for scenario in &suite.scenarios {
            match scenario {
                Scenario::Login { case, token_key } => {
                    let (result, token) = self.login(case, token_key, auth).await;
                    let abort = abort_for(&result);
                    self.record(report, result);
                    match token {
                        Some(token) => {
                            let replaced = auth.is_authenticated();
                            *auth = AuthContext::bearer(token);
                            tracing::info!(token = %auth.redacted(), replaced, "authenticated");
                        }
                        None => return Err(abort),
                    }
                }
                Scenario::Case(case) => {
                    let result = self
                        .executor
                        .run(&case.name, &case.request, &case.expect, auth)
                        .await;
                    let halt = case.halt_on_failure && !result.passed();
                    let abort = abort_for(&result);
                    self.record(report, result);
                    if halt {
                        return Err(abort);
                    }
                }
                Scenario::Matrix {
                    name,
                    template,
                    expect,
                    variants,
                } => {
                    self.matrix(name, template, expect, variants, auth, report)
                        .await;
                }
                Scenario::Duplicate { name, template } => {
                    self.duplicate(name, template, auth, report).await;
                }
                Scenario::Burst {
                    name,
                    template,
                    expect,
                    size,
                } => {
                    for result in self.burst(name, template, expect, *size, auth).await {
                        self.record(report, result);
                    }
                }
            }
        }
        Ok(())
    }

    async fn login(
        &self,
        case: &TestCase,
        token_key: &str,
        auth: &AuthContext,
    ) -> (TestResult, Option<String>) {
        let mut token = None;
        let result = self
            .executor
            .run_with(&case.name, &case.request, auth, |response| {
                let detail = case.expect.evaluate(response)?;
                let value = response
                    .body
                    .as_json()
                    .and_then(|body| body.get(token_key))
                    .and_then(Value::as_str)
                    .ok_or_else(|| CaseError::BodyPredicate {
                        status: response.status_code(),
                        reason: format!("response has no string '{token_key}'"),
                    })?;
                token = Some(value.to_string());
                Ok(detail)
            })
            .await;
        (result, token)
    }

    async fn matrix(
        &self,
        name: &str,
        template: &RequestTemplate,
        expect: &Expectation,
        variants: &[PayloadVariant],
        auth: &AuthContext,
        report: &mut Report,
    ) {
        for (index, variant) in variants.iter().enumerate() {
            if index > 0 && !self.options.matrix_delay.is_zero() {
                tokio::time::sleep(self.options.matrix_delay).await;
            }
            let case = format!("{name} [{}: {}]", index + 1, variant.label);
            let request = variant.apply(template);
            let expect = variant.expect.as_ref().unwrap_or(expect);
            let result = self.executor.run(&case, &request, expect, auth).await;
            self.record(report, result);
        }
    }

    async fn duplicate(
        &self,
        name: &str,
        template: &RequestTemplate,
        auth: &AuthContext,
        report: &mut Report,
    ) {
        let first = self
            .executor
            .run(
                &format!("{name} [first submission]"),
                template,
                &Expectation::exact(200),
                auth,
            )
            .await;
        self.record(report, first);

        let rejected = Expectation::one_of([400, 409])
            .with_body(BodyPredicate::detail_contains_ignore_case("already"));
        let second = self
            .executor
            .run(&format!("{name} [resubmission]"), template, &rejected, auth)
            .await;
        self.record(report, second);
    }

    /// Fires `size` requests at once and returns their results by slot.
    async fn burst(
        &self,
        name: &str,
        template: &RequestTemplate,
        expect: &Expectation,
        size: usize,
        auth: &AuthContext,
    ) -> Vec<TestResult> {
        if size == 0 {
            return Vec::new();
        }
        tracing::info!(burst = name, size, "dispatching concurrent requests");

        let (tx, mut rx) = mpsc::channel(size);
        let mut handles = Vec::with_capacity(size);

        for slot in 1..=size {
            let tx = tx.clone();
            let executor = self.executor.clone();
            let expect = expect.clone();
            let auth = auth.clone();
            let case = slot_name(name, slot);
            let request = template.clone().with_body(template.body.for_slot(slot));

            let handle = tokio::spawn(async move {
                let result = executor.run(&case, &request, &expect, &auth).await;
                if tx.send((slot, result)).await.is_err() {
                    tracing::warn!(slot, "burst receiver dropped");
                }
            });
            handles.push((slot, handle));
        }
        drop(tx);

        let mut results = Vec::with_capacity(size);
        while let Some(entry) = rx.recv().await {
            results.push(entry);
        }

        for (slot, handle) in handles {
            if let Err(e) = handle.await {
                tracing::error!(slot, error = %e, "burst task did not complete");
                let error = CaseError::Transport(format!("task failed: {e}"));
                let result = TestResult::fail(
                    slot_name(name, slot),
                    &error,
                    self.executor.clock.now(),
                    0,
                    template.body.for_slot(slot).display_payload(),
                    None,
                );
                results.push((slot, result));
            }
        }

        results.sort_by_key(|(slot, _)| *slot);
        results.into_iter().map(|(_, result)| result).collect()
    }

    fn record(&self, report: &mut Report, result: TestResult) {
        self.progress.result_recorded(&result);
        report.push(result);
    }
}

fn slot_name(burst: &str, slot: usize) -> String {
    format!("{burst} [slot {slot}]")
}

fn abort_for(result: &TestResult) -> RunAbort {
    RunAbort {
        case: result.name().to_string(),
        reason: result.detail().to_string(),
    }
}
