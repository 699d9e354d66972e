//! Traits the runner depends on; the infrastructure crate implements them.

mod clock;
mod http_client;
mod progress;

pub use clock::Clock;
pub use http_client::{HttpClient, HttpClientError, HttpFuture, OutgoingRequest};
pub use progress::{NullProgress, ProgressSink};
