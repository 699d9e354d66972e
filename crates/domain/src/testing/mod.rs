//! Expected outcomes and how responses are checked against them.

mod expectation;
pub mod json_path;
mod predicate;
mod status;

pub use expectation::{ConditionalStatus, Expectation};
pub use predicate::BodyPredicate;
pub use status::StatusExpectation;
