//! apiprobe - HTTP contract-verification harness
//!
//! Wires configuration, the reqwest adapter and the console reporter into
//! the scenario runner. The binary in `main.rs` only parses arguments and
//! maps the outcome to an exit code.

pub mod cli;
pub mod error;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use apiprobe_application::{
    ExecuteRequest, ProgressSink, RunOptions, ScenarioRunner, SuiteKind, SuiteSettings,
};
use apiprobe_domain::{Report, generate_run_tag};
use apiprobe_infrastructure::{
    ConsoleReporter, ReportDocument, ReqwestHttpClient, Settings, SystemClock, settings,
    write_report, write_summary,
};

pub use cli::{Cli, SuiteSelection};
pub use error::AppError;

/// Loads configuration for `cli` and runs the selected suites, printing to
/// stdout.
///
/// # Errors
///
/// Returns `AppError` when the run cannot start or its report cannot be
/// written. Failed checks are reported through the returned [`Report`].
pub async fn run(cli: &Cli) -> Result<Report, AppError> {
    let settings = settings::load(cli.config.as_deref(), &cli.overrides())?;
    execute(
        &settings,
        &cli.suite.kinds(),
        cli.report.as_deref(),
        Arc::new(ConsoleReporter::stdout()),
        &mut std::io::stdout(),
    )
    .await
}

/// Runs `kinds` against the configured target.
///
/// # Errors
///
/// Same as [`run`].
pub async fn execute(
    settings: &Settings,
    kinds: &[SuiteKind],
    report_path: Option<&Path>,
    progress: Arc<dyn ProgressSink>,
    summary_out: &mut impl Write,
) -> Result<Report, AppError> {
    let client = Arc::new(ReqwestHttpClient::new(&settings.http)?);
    let requests = ExecuteRequest::new(client, &settings.target.base_url)?;

    let suite_settings = suite_settings(settings);
    tracing::info!(
        target_url = requests.base_url(),
        run_tag = %suite_settings.run_tag,
        suites = ?kinds,
        "starting run"
    );
    let suites: Vec<_> = kinds.iter().map(|kind| kind.build(&suite_settings)).collect();

    let runner = ScenarioRunner::new(requests, Arc::new(SystemClock), progress)
        .with_options(RunOptions {
            matrix_delay: settings.probe.matrix_delay(),
        });
    let report = runner.run(&suites).await;

    write_summary(summary_out, &report.summary())?;

    if let Some(path) = report_path {
        let document = ReportDocument::new(
            settings.target.base_url.clone(),
            kinds.iter().map(ToString::to_string).collect(),
            chrono::Utc::now(),
            &report,
        );
        write_report(path, &document).await?;
    }

    Ok(report)
}

fn suite_settings(settings: &Settings) -> SuiteSettings {
    SuiteSettings {
        username: settings.credentials.username.clone(),
        password: settings.credentials.password.clone(),
        full_name: settings.credentials.full_name.clone(),
        organization_name: settings.credentials.organization_name.clone(),
        business_slug: settings.probe.business_slug.clone(),
        token_key: settings.probe.token_key.clone(),
        burst_size: settings.probe.burst_size,
        run_tag: generate_run_tag(),
    }
}
