//! Accepted status code sets

/// The set of status codes a case accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (inclusive).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
    /// The endpoint exists: anything below 500 except 404.
    Reachable,
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => (*min..=*max).contains(&status),
            Self::OneOf(codes) => codes.contains(&status),
            Self::Reachable => status < 500 && status != 404,
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
            Self::Reachable => "reachable (non-5xx, non-404)".to_string(),
        }
    }

    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }

    /// Create a "any 4xx" expectation.
    #[must_use]
    pub const fn client_error() -> Self {
        Self::Range { min: 400, max: 499 }
    }

    /// Create a one-of expectation.
    #[must_use]
    pub fn one_of(codes: impl IntoIterator<Item = u16>) -> Self {
        Self::OneOf(codes.into_iter().collect())
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::Exact(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact() {
        let exp = StatusExpectation::exact(401);
        assert!(exp.matches(401));
        assert!(!exp.matches(200));
    }

    #[test]
    fn test_range() {
        let exp = StatusExpectation::client_error();
        assert!(exp.matches(400));
        assert!(exp.matches(499));
        assert!(!exp.matches(200));
        assert!(!exp.matches(500));
    }

    #[test]
    fn test_one_of() {
        let exp = StatusExpectation::one_of([200, 400]);
        assert!(exp.matches(200));
        assert!(exp.matches(400));
        assert!(!exp.matches(422));
        assert_eq!(exp.description(), "in [200, 400]");
    }

    #[test]
    fn test_reachable() {
        let exp = StatusExpectation::Reachable;
        assert!(exp.matches(200));
        assert!(exp.matches(401));
        assert!(exp.matches(422));
        assert!(!exp.matches(404));
        assert!(!exp.matches(500));
        assert!(!exp.matches(503));
    }
}
