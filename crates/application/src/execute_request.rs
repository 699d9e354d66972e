//! Execute Request Use Case
//!
//! Resolves a [`RequestTemplate`] against the target base URL and the
//! current [`AuthContext`], then sends it through the [`HttpClient`] port.

use std::sync::Arc;

use apiprobe_domain::{AuthContext, AuthMode, CaseError, RequestTemplate, Response};
use thiserror::Error;
use url::Url;

use crate::ports::{HttpClient, HttpClientError, OutgoingRequest};

/// Result type for request execution.
pub type ExecuteResult = Result<Response, ExecuteRequestError>;

/// Error type for the execute request use case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecuteRequestError {
    /// Base URL is empty.
    #[error("base URL is required")]
    EmptyUrl,

    /// Base URL is invalid.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// The template requires a token and none is available.
    #[error("'{case}' requires authentication but no login has succeeded")]
    MissingAuth {
        /// Case that asked for the token.
        case: String,
    },

    /// HTTP request failed.
    #[error("{0}")]
    HttpError(#[from] HttpClientError),
}

impl From<ExecuteRequestError> for CaseError {
    fn from(error: ExecuteRequestError) -> Self {
        match error {
            ExecuteRequestError::MissingAuth { case } => Self::MissingAuth { case },
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Use case for executing templated requests against one target.
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
    base_url: String,
}

impl<C: HttpClient> Clone for ExecuteRequest<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            base_url: self.base_url.clone(),
        }
    }
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates the use case for the given target.
    ///
    /// # Validation
    ///
    /// - base URL must not be empty
    /// - base URL must be an absolute http:// or https:// URL
    ///
    /// # Errors
    ///
    /// Returns `ExecuteRequestError` if the base URL is unusable.
    pub fn new(client: Arc<C>, base_url: &str) -> Result<Self, ExecuteRequestError> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(ExecuteRequestError::EmptyUrl);
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ExecuteRequestError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }
        Url::parse(base_url).map_err(|e| ExecuteRequestError::InvalidUrl(format!("{e}: {base_url}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The normalized base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins the base URL and a template path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Resolves a template into a request ready to send.
    ///
    /// Explicit template headers win; otherwise the body's content type is
    /// added, and the bearer token is attached according to the auth mode.
    ///
    /// # Errors
    ///
    /// [`ExecuteRequestError::MissingAuth`] when the template requires a
    /// token and `auth` holds none. No request is issued in that case.
    pub fn prepare(
        &self,
        case: &str,
        template: &RequestTemplate,
        auth: &AuthContext,
    ) -> Result<OutgoingRequest, ExecuteRequestError> {
        let mut headers = template.headers.clone();

        if !headers.contains("content-type")
            && let Some(content_type) = template.body.content_type()
        {
            headers.set("Content-Type", content_type);
        }

        match template.auth {
            AuthMode::Anonymous => {}
            AuthMode::Optional => {
                if let Some(value) = auth.authorization_header() {
                    headers.set("Authorization", value);
                }
            }
            AuthMode::Required => {
                let value = auth
                    .authorization_header()
                    .ok_or_else(|| ExecuteRequestError::MissingAuth {
                        case: case.to_string(),
                    })?;
                headers.set("Authorization", value);
            }
        }

        Ok(OutgoingRequest {
            method: template.method,
            url: self.url_for(&template.path),
            headers,
            body: template.body.clone(),
        })
    }

    /// Sends a prepared request.
    ///
    /// # Errors
    ///
    /// Returns `ExecuteRequestError::HttpError` on transport failures.
    pub async fn execute(&self, request: &OutgoingRequest) -> ExecuteResult {
        let response = self.client.execute(request).await?;
        Ok(response)
    }
}
