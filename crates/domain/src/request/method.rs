//! Request methods used by probes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Method of a [`RequestTemplate`](super::RequestTemplate).
///
/// The harness only needs the methods the target API exposes; reads are
/// `Get`, everything that creates or changes state goes through the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Read.
    #[default]
    Get,
    /// Create or submit.
    Post,
    /// Replace.
    Put,
    /// Partial update.
    Patch,
    /// Remove.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wire_name_matches_display() {
        for method in [HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete] {
            let json = serde_json::to_string(&method).expect("serializable");
            assert_eq!(json, format!("\"{method}\""));
        }
    }
}
