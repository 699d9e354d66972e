//! HTTP Client port

use std::future::Future;
use std::pin::Pin;

use apiprobe_domain::{Headers, HttpMethod, RequestBody, Response};
use thiserror::Error;

/// A fully resolved request: absolute URL, final headers, body.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL
    pub url: String,
    /// Headers to send, Authorization and Content-Type included
    pub headers: Headers,
    /// Body to encode according to its kind
    pub body: RequestBody,
}

/// Errors raised when a request cannot complete at the transport level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The request did not finish within the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error.
        message: String,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connection failure (TLS, reset, ...).
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Anything else reported by the HTTP library.
    #[error("{0}")]
    Other(String),
}

/// Boxed future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> = Pin<Box<dyn Future<Output = Result<Response, HttpClientError>> + Send + 'a>>;

/// Port for executing HTTP requests.
///
/// Implementations perform exactly one attempt per call: no retries, and
/// the same connect/read timeouts for every request.
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or an unencodable body.
    fn execute(&self, request: &OutgoingRequest) -> HttpFuture<'_>;
}
