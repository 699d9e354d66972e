//! Authentication domain types

mod context;

pub use context::{AuthContext, AuthMode};
