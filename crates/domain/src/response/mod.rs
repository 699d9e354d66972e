//! HTTP Response domain types

mod spec;
mod status;

pub use spec::{Response, ResponseBody};
pub use status::StatusCode;
