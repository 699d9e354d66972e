//! Bearer token state shared by dependent cases

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of token characters kept by [`AuthContext::redacted`].
const REDACTED_PREFIX_LEN: usize = 20;

/// How a request resolves its Authorization header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Never send an Authorization header.
    Anonymous,
    /// Send the bearer token when one is available.
    #[default]
    Optional,
    /// Fail the case before sending if there is no token.
    Required,
}

/// The bearer token acquired by the most recent successful login.
///
/// Values are immutable: a new login produces a new context that replaces
/// the old one as a whole.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
}

impl AuthContext {
    /// A context with no token.
    #[must_use]
    pub const fn none() -> Self {
        Self { token: None }
    }

    /// A context holding a bearer token.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Returns true if a token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the `Authorization` header value, if any.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    /// Returns a log-safe prefix of the token.
    #[must_use]
    pub fn redacted(&self) -> String {
        match &self.token {
            None => "<none>".to_string(),
            Some(token) => {
                let prefix: String = token.chars().take(REDACTED_PREFIX_LEN).collect();
                format!("{prefix}...")
            }
        }
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &self.redacted())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_none_has_no_header() {
        let ctx = AuthContext::none();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.authorization_header(), None);
        assert_eq!(ctx.redacted(), "<none>");
    }

    #[test]
    fn test_bearer_header() {
        let ctx = AuthContext::bearer("abc");
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.authorization_header().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let ctx = AuthContext::bearer("eyJhbGciOiJIUzI1NiJ9.secret-payload.signature");
        let debug = format!("{ctx:?}");
        assert!(debug.contains("eyJhbGciOiJIUzI1NiJ9..."));
        assert!(!debug.contains("signature"));
    }
}
