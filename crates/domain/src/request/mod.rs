//! HTTP Request domain types

mod body;
mod header;
mod method;
mod template;

pub use body::{RequestBody, SLOT_PLACEHOLDER};
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use template::RequestTemplate;
