//! HTTP Request body types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder replaced by the slot index in burst payloads.
pub const SLOT_PLACEHOLDER: &str = "{n}";

/// HTTP request body with its encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Structured body serialized as JSON.
    Json {
        /// The JSON document.
        value: Value,
    },
    /// Fields sent as `application/x-www-form-urlencoded`, in order.
    Form {
        /// Key/value pairs.
        fields: Vec<(String, String)>,
    },
    /// Text sent as-is, with an optional content type.
    Raw {
        /// The content type, or `None` to send no Content-Type at all.
        content_type: Option<String>,
        /// The body content.
        content: String,
    },
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Creates a JSON body.
    #[must_use]
    pub const fn json(value: Value) -> Self {
        Self::Json { value }
    }

    /// Creates a form body from key/value pairs.
    #[must_use]
    pub fn form<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Creates a raw body.
    #[must_use]
    pub fn raw(content_type: Option<&str>, content: impl Into<String>) -> Self {
        Self::Raw {
            content_type: content_type.map(str::to_string),
            content: content.into(),
        }
    }

    /// Returns whether there is nothing to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Json { .. } => false,
            Self::Form { fields } => fields.is_empty(),
            Self::Raw { content, .. } => content.is_empty(),
        }
    }

    /// Returns the content type implied by the encoding.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Json { .. } => Some("application/json"),
            Self::Form { .. } => Some("application/x-www-form-urlencoded"),
            Self::Raw { content_type, .. } => content_type.as_deref(),
        }
    }

    /// Returns a copy with every `{n}` in string values replaced by `slot`.
    ///
    /// Used by burst probes so concurrent requests carry distinct data.
    #[must_use]
    pub fn for_slot(&self, slot: usize) -> Self {
        let slot = slot.to_string();
        match self {
            Self::None => Self::None,
            Self::Json { value } => Self::Json {
                value: substitute(value, &slot),
            },
            Self::Form { fields } => Self::Form {
                fields: fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.replace(SLOT_PLACEHOLDER, &slot)))
                    .collect(),
            },
            Self::Raw {
                content_type,
                content,
            } => Self::Raw {
                content_type: content_type.clone(),
                content: content.replace(SLOT_PLACEHOLDER, &slot),
            },
        }
    }

    /// Renders the payload for failure dumps.
    #[must_use]
    pub fn display_payload(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Json { value } => {
                Some(serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()))
            }
            Self::Form { fields } => Some(
                fields
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join("&"),
            ),
            Self::Raw { content, .. } => Some(content.clone()),
        }
    }
}

fn substitute(value: &Value, slot: &str) -> Value {
    match value {
        Value::String(s) => Value::String(s.replace(SLOT_PLACEHOLDER, slot)),
        Value::Array(items) => Value::Array(items.iter().map(|v| substitute(v, slot)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute(v, slot)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_content_types() {
        assert_eq!(
            RequestBody::json(json!({})).content_type(),
            Some("application/json")
        );
        assert_eq!(
            RequestBody::form([("username", "a")]).content_type(),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(RequestBody::raw(None, "{}").content_type(), None);
        assert_eq!(RequestBody::none().content_type(), None);
    }

    #[test]
    fn test_empty_json_object_is_not_empty() {
        assert!(!RequestBody::json(json!({})).is_empty());
        assert!(RequestBody::none().is_empty());
        assert!(RequestBody::form(Vec::<(String, String)>::new()).is_empty());
    }

    #[test]
    fn test_for_slot_substitutes_nested_strings() {
        let body = RequestBody::json(json!({
            "username": "concurrent{n}@example.com",
            "full_name": "Concurrent User {n}",
            "tags": ["t{n}"],
            "age": 3
        }));

        let slotted = body.for_slot(4);
        assert_eq!(
            slotted,
            RequestBody::json(json!({
                "username": "concurrent4@example.com",
                "full_name": "Concurrent User 4",
                "tags": ["t4"],
                "age": 3
            }))
        );
    }

    #[test]
    fn test_display_payload_form() {
        let body = RequestBody::form([("username", "a@b.c"), ("password", "x")]);
        assert_eq!(
            body.display_payload().as_deref(),
            Some("username=a@b.c&password=x")
        );
    }
}
