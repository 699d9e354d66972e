//! Checks on response bodies.

use regex::Regex;
use serde_json::Value;

use super::json_path;
use crate::response::Response;

/// A condition a response body must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyPredicate {
    /// Body text contains a substring.
    Contains {
        /// Text to search for.
        text: String,
        /// Case-insensitive search.
        ignore_case: bool,
    },
    /// Body text matches a regex.
    Matches {
        /// Regex pattern.
        pattern: String,
    },
    /// The JSON `detail` string contains a substring.
    DetailContains {
        /// Text to search for.
        text: String,
        /// Case-insensitive search.
        ignore_case: bool,
    },
    /// A JSON path exists and optionally equals a value.
    JsonPath {
        /// Path expression (e.g. `$.error.code`).
        path: String,
        /// Expected value.
        expected: Option<Value>,
    },
    /// The body is a JSON array.
    IsJsonArray,
    /// At least one of the inner predicates holds.
    AnyOf(Vec<BodyPredicate>),
}

impl BodyPredicate {
    /// Case-sensitive `detail` substring check.
    #[must_use]
    pub fn detail_contains(text: impl Into<String>) -> Self {
        Self::DetailContains {
            text: text.into(),
            ignore_case: false,
        }
    }

    /// Case-insensitive `detail` substring check.
    #[must_use]
    pub fn detail_contains_ignore_case(text: impl Into<String>) -> Self {
        Self::DetailContains {
            text: text.into(),
            ignore_case: true,
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Contains { text, .. } => format!("body contains '{text}'"),
            Self::Matches { pattern } => format!("body matches /{pattern}/"),
            Self::DetailContains { text, .. } => format!("detail contains '{text}'"),
            Self::JsonPath {
                path,
                expected: Some(v),
            } => format!("JSON {path} equals {v}"),
            Self::JsonPath {
                path,
                expected: None,
            } => format!("JSON {path} exists"),
            Self::IsJsonArray => "body is a JSON array".to_string(),
            Self::AnyOf(inner) => {
                let parts: Vec<_> = inner.iter().map(Self::description).collect();
                format!("any of ({})", parts.join(" | "))
            }
        }
    }

    /// Evaluates the predicate.
    ///
    /// # Errors
    ///
    /// Returns the reason the predicate does not hold.
    pub fn evaluate(&self, response: &Response) -> Result<(), String> {
        match self {
            Self::Contains { text, ignore_case } => {
                if contains(&response.body_text(), text, *ignore_case) {
                    Ok(())
                } else {
                    Err(format!("body does not contain '{text}'"))
                }
            }
            Self::Matches { pattern } => {
                let regex = Regex::new(pattern)
                    .map_err(|e| format!("invalid regex pattern '{pattern}': {e}"))?;
                if regex.is_match(&response.body_text()) {
                    Ok(())
                } else {
                    Err(format!("body does not match pattern '{pattern}'"))
                }
            }
            Self::DetailContains { text, ignore_case } => match response.detail() {
                Some(detail) if contains(detail, text, *ignore_case) => Ok(()),
                Some(detail) => Err(format!("detail '{detail}' does not contain '{text}'")),
                None => Err("response has no string 'detail' field".to_string()),
            },
            Self::JsonPath { path, expected } => {
                let json = response
                    .body
                    .as_json()
                    .ok_or_else(|| "body is not JSON".to_string())?;
                match json_path::query(json, path).map_err(|e| e.to_string())? {
                    None => Err(format!("JSON path '{path}' not found")),
                    Some(actual) => match expected {
                        Some(expected) if actual != expected => Err(format!(
                            "JSON path '{path}': expected {expected}, got {actual}"
                        )),
                        _ => Ok(()),
                    },
                }
            }
            Self::IsJsonArray => match response.body.as_json() {
                Some(Value::Array(_)) => Ok(()),
                Some(_) => Err("body is JSON but not an array".to_string()),
                None => Err("body is not JSON".to_string()),
            },
            Self::AnyOf(inner) => {
                let mut reasons = Vec::with_capacity(inner.len());
                for predicate in inner {
                    match predicate.evaluate(response) {
                        Ok(()) => return Ok(()),
                        Err(reason) => reasons.push(reason),
                    }
                }
                Err(format!("none matched: {}", reasons.join("; ")))
            }
        }
    }
}

fn contains(haystack: &str, needle: &str, ignore_case: bool) -> bool {
    if ignore_case {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    } else {
        haystack.contains(needle)
    }
}
