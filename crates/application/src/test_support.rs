//! Scripted HTTP client for unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use apiprobe_domain::{HttpMethod, RequestBody, Response};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use crate::ports::{Clock, HttpClient, HttpClientError, HttpFuture, OutgoingRequest};

pub const BASE_URL: &str = "http://probe.test/api";

type Handler = Box<dyn Fn(&OutgoingRequest) -> Response + Send + Sync>;

struct Route {
    method: HttpMethod,
    url: String,
    handler: Handler,
}

/// Answers requests from a table of routes and records what it received.
pub struct ScriptedClient {
    routes: Vec<Route>,
    failure: Option<HttpClientError>,
    log: Mutex<Vec<OutgoingRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            failure: None,
            log: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn route(
        mut self,
        method: HttpMethod,
        path: &str,
        handler: impl Fn(&OutgoingRequest) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.routes.push(Route {
            method,
            url: format!("{BASE_URL}{path}"),
            handler: Box::new(handler),
        });
        self
    }

    pub fn respond(self, method: HttpMethod, path: &str, response: Response) -> Self {
        self.route(method, path, move |_| response.clone())
    }

    pub fn fail_all(mut self, error: HttpClientError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn requests(&self) -> Vec<OutgoingRequest> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn hits(&self, path: &str) -> usize {
        let url = format!("{BASE_URL}{path}");
        self.requests().iter().filter(|r| r.url == url).count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl HttpClient for ScriptedClient {
    fn execute(&self, request: &OutgoingRequest) -> HttpFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            if let Ok(mut log) = self.log.lock() {
                log.push(request.clone());
            }
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            Ok(self
                .routes
                .iter()
                .find(|r| r.method == request.method && r.url == request.url)
                .map_or_else(
                    || Response::json(404, json!({"detail": "Not Found"})),
                    |r| (r.handler)(&request),
                ))
        })
    }
}

/// A staff endpoint that rejects missing auth, missing fields and
/// duplicate usernames the way the real service does.
pub fn staff_endpoint() -> impl Fn(&OutgoingRequest) -> Response + Send + Sync + 'static {
    let seen = Arc::new(Mutex::new(HashSet::new()));
    move |request| {
        if !request.headers.contains("authorization") {
            return Response::json(401, json!({"detail": "Not authenticated"}));
        }
        let value = match &request.body {
            RequestBody::Json { value } => value.clone(),
            RequestBody::Raw { content, .. } => {
                serde_json::from_str(content).unwrap_or(serde_json::Value::Null)
            }
            _ => serde_json::Value::Null,
        };
        let fields = ["username", "password", "full_name"];
        if fields.iter().any(|f| !value.get(*f).is_some_and(serde_json::Value::is_string)) {
            return Response::json(422, json!({"detail": [{"msg": "field required"}]}));
        }
        if fields.iter().any(|f| value[*f].as_str().is_some_and(str::is_empty)) {
            return Response::json(400, json!({"detail": "Fields must not be empty"}));
        }
        let username = value["username"].as_str().unwrap_or_default().to_string();
        let inserted = seen.lock().map(|mut s| s.insert(username)).unwrap_or(false);
        if inserted {
            Response::json(200, json!({"message": "Staff added"}))
        } else {
            Response::json(400, json!({"detail": "Username already registered"}))
        }
    }
}

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn epoch() -> Self {
        Self(Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
