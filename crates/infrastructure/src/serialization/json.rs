//! JSON serialization helpers for deterministic output.

use std::io;
use std::path::Path;

use apiprobe_domain::{Report, Summary, TestResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Struct fields in declaration order
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes JSON from a string.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

/// Contents of a `--report` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Base URL the run targeted.
    pub target: String,
    /// Suites that were selected.
    pub suites: Vec<String>,
    /// When the report was written.
    pub generated_at: DateTime<Utc>,
    /// Aggregated counts, failures and 422s.
    pub summary: Summary,
    /// Every result in execution order.
    pub results: Vec<TestResult>,
}

impl ReportDocument {
    /// Captures a finished report.
    #[must_use]
    pub fn new(
        target: impl Into<String>,
        suites: Vec<String>,
        generated_at: DateTime<Utc>,
        report: &Report,
    ) -> Self {
        Self {
            target: target.into(),
            suites,
            generated_at,
            summary: report.summary(),
            results: report.results().to_vec(),
        }
    }
}

/// Writes the document to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub async fn write_report(path: &Path, document: &ReportDocument) -> Result<(), SerializationError> {
    let json = to_json_stable(document)?;
    tokio::fs::write(path, json).await?;
    tracing::info!(path = %path.display(), results = document.results.len(), "report written");
    Ok(())
}
