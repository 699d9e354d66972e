//! Response type
//!
//! Contains types for representing HTTP responses including
//! status codes, headers, body, and timing information.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StatusCode;
use crate::request::Headers;

/// Response body, parsed as JSON when the server said it was JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ResponseBody {
    /// Zero-length body.
    #[default]
    Empty,
    /// Structured JSON document.
    Json(Value),
    /// Anything else, as text.
    Text(String),
}

impl ResponseBody {
    /// Returns the JSON document, if the body is structured.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Empty | Self::Text(_) => None,
        }
    }

    /// Renders the body as text (pretty-printed when structured).
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }

    /// Returns true for a zero-length body.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// An HTTP response as observed by the harness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: Headers,
    /// Parsed or raw body
    pub body: ResponseBody,
    /// Time from send to last body byte
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl Response {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, headers: Headers, body: ResponseBody, duration: Duration) -> Self {
        Self {
            status: StatusCode::new(status),
            headers,
            body,
            duration,
        }
    }

    /// Shortcut for a JSON response with a JSON content type.
    #[must_use]
    pub fn json(status: u16, value: Value) -> Self {
        Self::new(
            status,
            Headers::new().with("content-type", "application/json"),
            ResponseBody::Json(value),
            Duration::ZERO,
        )
    }

    /// Shortcut for a text response without headers.
    #[must_use]
    pub fn text(status: u16, text: impl Into<String>) -> Self {
        Self::new(
            status,
            Headers::new(),
            ResponseBody::Text(text.into()),
            Duration::ZERO,
        )
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns the `detail` string of a JSON error body.
    ///
    /// Validation errors carry a list instead of a string; those yield `None`.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.body.as_json()?.get("detail")?.as_str()
    }

    /// Returns the body as text for predicates and dumps.
    #[must_use]
    pub fn body_text(&self) -> String {
        match &self.body {
            ResponseBody::Json(value) => value.to_string(),
            other => other.to_text(),
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
