//! Request template type

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Headers, HttpMethod, RequestBody};
use crate::auth::AuthMode;

/// Everything needed to issue one request, minus the base URL and token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RequestTemplate {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the target base URL (e.g. `/staff/add`)
    pub path: String,
    /// Explicit headers; these win over headers implied by the body.
    #[serde(default)]
    pub headers: Headers,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// How the Authorization header is resolved
    #[serde(default)]
    pub auth: AuthMode,
}

impl RequestTemplate {
    /// Creates a template with the given method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Headers::new(),
            body: RequestBody::none(),
            auth: AuthMode::default(),
        }
    }

    /// Creates a GET template.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST template with a JSON body.
    #[must_use]
    pub fn post_json(path: impl Into<String>, value: Value) -> Self {
        Self::new(HttpMethod::Post, path).with_body(RequestBody::json(value))
    }

    /// Creates a POST template with a form body.
    #[must_use]
    pub fn post_form<K, V>(path: impl Into<String>, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(HttpMethod::Post, path).with_body(RequestBody::form(fields))
    }

    /// Replaces the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Sets the auth mode.
    #[must_use]
    pub const fn with_auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    /// Returns the content type that will be sent, if any.
    ///
    /// An explicit `Content-Type` header overrides the body's own.
    #[must_use]
    pub fn effective_content_type(&self) -> Option<&str> {
        self.headers
            .get("content-type")
            .or_else(|| self.body.content_type())
    }
}
