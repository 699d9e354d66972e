//! reqwest adapter for the `HttpClient` port.
//!
//! Timeouts are fixed when the client is built so every request of a run
//! behaves the same way.

use std::time::Instant;

use apiprobe_application::ports::{HttpClient, HttpClientError, HttpFuture, OutgoingRequest};
use apiprobe_domain::{Headers, HttpMethod, RequestBody, Response, ResponseBody};
use reqwest::{Client, Method, Url};

use crate::settings::HttpSettings;

/// Sends probe requests over a shared `reqwest::Client`.
///
/// Redirects are not followed, so the status the
/// server sends is the status that gets evaluated.
pub struct ReqwestHttpClient {
    client: Client,
    timeout_ms: u64,
}

impl ReqwestHttpClient {
    /// Creates a client from the HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(settings: &HttpSettings) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .connect_timeout(settings.connect_timeout())
            .timeout(settings.request_timeout())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout_ms: settings.request_timeout_ms,
        })
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Encodes the body. Content-Type is already part of the headers.
    fn build_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        match body {
            RequestBody::None => Ok(builder),
            RequestBody::Json { value } => {
                let bytes = serde_json::to_vec(value)
                    .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
                Ok(builder.body(bytes))
            }
            RequestBody::Form { fields } => {
                let encoded = serde_urlencoded::to_string(fields)
                    .map_err(|e| HttpClientError::InvalidBody(format!("Invalid form: {e}")))?;
                Ok(builder.body(encoded))
            }
            RequestBody::Raw { content, .. } => Ok(builder.body(content.clone())),
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = format!("{error:?}").to_lowercase();
            if message.contains("dns") || message.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message: error.to_string(),
                };
            }
            if message.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(error.to_string());
        }

        if error.is_builder() {
            return HttpClientError::InvalidUrl(error.to_string());
        }

        HttpClientError::Other(error.to_string())
    }

    /// Parses the body as JSON when the content type says so, else text.
    fn parse_body(content_type: Option<&str>, bytes: &[u8]) -> ResponseBody {
        if bytes.is_empty() {
            return ResponseBody::Empty;
        }

        let is_json = content_type
            .and_then(|ct| ct.parse::<mime::Mime>().ok())
            .is_some_and(|m| {
                m.subtype() == mime::JSON || m.suffix().is_some_and(|s| s == mime::JSON)
            });

        if is_json && let Ok(value) = serde_json::from_slice(bytes) {
            return ResponseBody::Json(value);
        }
        ResponseBody::Text(String::from_utf8_lossy(bytes).into_owned())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &OutgoingRequest) -> HttpFuture<'_> {
        let method = request.method;
        let url = request.url.clone();
        let headers = request.headers.clone();
        let body = request.body.clone();
        let timeout_ms = self.timeout_ms;

        Box::pin(async move {
            let parsed_url =
                Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(method), parsed_url);
            for header in headers.iter() {
                builder = builder.header(header.name.as_str(), header.value.as_str());
            }
            builder = Self::build_body(builder, &body)?;

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status().as_u16();
            let response_headers: Headers = response
                .headers()
                .iter()
                .map(|(k, v)| (k.as_str(), v.to_str().unwrap_or("<binary>")))
                .collect();

            let bytes = response
                .bytes()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;
            let duration = start.elapsed();

            let body = Self::parse_body(response_headers.get("content-type"), &bytes);
            tracing::debug!(
                %url,
                status,
                elapsed_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                "response received"
            );

            Ok(Response::new(status, response_headers, body, duration))
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_methods_keep_their_wire_name() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ] {
            assert_eq!(
                ReqwestHttpClient::to_reqwest_method(method).as_str(),
                method.to_string()
            );
        }
    }

    #[test]
    fn test_builds_from_default_settings() {
        assert!(ReqwestHttpClient::new(&HttpSettings::default()).is_ok());
    }

    #[test]
    fn test_form_body_is_url_encoded() {
        let body = RequestBody::form([("username", "a@b.com"), ("password", "p w")]);
        let client = Client::new();
        let request = ReqwestHttpClient::build_body(client.post("https://example.com"), &body)
            .expect("form should encode")
            .build()
            .expect("request should build");
        let bytes = request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .expect("buffered body");
        assert_eq!(bytes, b"username=a%40b.com&password=p+w");
    }

    #[test]
    fn test_json_detection() {
        assert_eq!(
            ReqwestHttpClient::parse_body(Some("application/json; charset=utf-8"), br#"{"a":1}"#),
            ResponseBody::Json(json!({"a": 1}))
        );
        assert_eq!(
            ReqwestHttpClient::parse_body(Some("application/problem+json"), b"[]"),
            ResponseBody::Json(json!([]))
        );
        assert_eq!(
            ReqwestHttpClient::parse_body(Some("text/plain"), br#"{"a":1}"#),
            ResponseBody::Text(r#"{"a":1}"#.to_string())
        );
        assert_eq!(
            ReqwestHttpClient::parse_body(Some("application/json"), b"not json"),
            ResponseBody::Text("not json".to_string())
        );
        assert_eq!(
            ReqwestHttpClient::parse_body(None, b""),
            ResponseBody::Empty
        );
    }
}
