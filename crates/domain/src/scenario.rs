//! Scenario declarations.
//!
//! A [`Suite`] is an ordered list of [`Scenario`]s. Scenarios are plain data;
//! the runner in the application layer executes them.

use serde_json::Value;

use crate::request::{Headers, RequestBody, RequestTemplate};
use crate::testing::Expectation;

/// Default number of concurrent requests in a burst probe.
pub const DEFAULT_BURST_SIZE: usize = 5;

/// Default JSON key holding the bearer token in a login response.
pub const DEFAULT_TOKEN_KEY: &str = "access_token";

/// One named HTTP check with an expected outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// Name shown in the progress stream and report.
    pub name: String,
    /// What to send.
    pub request: RequestTemplate,
    /// What to accept.
    pub expect: Expectation,
    /// Stop the whole run if this case fails.
    pub halt_on_failure: bool,
}

impl TestCase {
    /// Creates a case.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestTemplate, expect: Expectation) -> Self {
        Self {
            name: name.into(),
            request,
            expect,
            halt_on_failure: false,
        }
    }

    /// Marks the case as a precondition for the rest of the run.
    #[must_use]
    pub const fn halting(mut self) -> Self {
        self.halt_on_failure = true;
        self
    }
}

/// One payload of a matrix scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadVariant {
    /// Short label appended to the result name.
    pub label: String,
    /// Body sent for this variant.
    pub body: RequestBody,
    /// Headers layered over the template's.
    pub headers: Headers,
    /// Replaces the matrix-wide expectation for this variant.
    pub expect: Option<Expectation>,
}

impl PayloadVariant {
    /// Creates a variant with a JSON body.
    #[must_use]
    pub fn json(label: impl Into<String>, value: Value) -> Self {
        Self::new(label, RequestBody::json(value))
    }

    /// Creates a variant with any body.
    #[must_use]
    pub fn new(label: impl Into<String>, body: RequestBody) -> Self {
        Self {
            label: label.into(),
            body,
            headers: Headers::new(),
            expect: None,
        }
    }

    /// Sets a header for this variant only.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Overrides the expectation for this variant.
    #[must_use]
    pub fn expecting(mut self, expect: Expectation) -> Self {
        self.expect = Some(expect);
        self
    }

    /// Applies the variant to a template.
    #[must_use]
    pub fn apply(&self, template: &RequestTemplate) -> RequestTemplate {
        let mut request = template.clone();
        request.body = self.body.clone();
        request.headers.merge(&self.headers);
        request
    }
}

/// An entry in a suite.
#[derive(Debug, Clone, PartialEq)]
pub enum Scenario {
    /// Acquire a bearer token. A failed login is fatal to the run.
    Login {
        /// The login request and its expectation.
        case: TestCase,
        /// JSON key of the token in the response.
        token_key: String,
    },
    /// A single request.
    Case(TestCase),
    /// The same template sent once per payload variant.
    Matrix {
        /// Matrix name; results are labelled `name [i: label]`.
        name: String,
        /// Shared request template.
        template: RequestTemplate,
        /// Expectation for variants without their own.
        expect: Expectation,
        /// Payloads, executed in order.
        variants: Vec<PayloadVariant>,
    },
    /// The same payload sent twice; the second must be rejected.
    Duplicate {
        /// Scenario name.
        name: String,
        /// The request sent both times.
        template: RequestTemplate,
    },
    /// `size` identical requests fired concurrently.
    Burst {
        /// Burst name; results are labelled `name [slot i]`.
        name: String,
        /// Template; `{n}` in string values is replaced by the slot index.
        template: RequestTemplate,
        /// Expectation applied to every slot.
        expect: Expectation,
        /// Number of concurrent requests.
        size: usize,
    },
}

impl Scenario {
    /// Creates a login scenario using the default token key.
    #[must_use]
    pub fn login(case: TestCase) -> Self {
        Self::Login {
            case,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }

    /// Returns the scenario name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Login { case, .. } | Self::Case(case) => &case.name,
            Self::Matrix { name, .. } | Self::Duplicate { name, .. } | Self::Burst { name, .. } => {
                name
            }
        }
    }

    /// Number of results this scenario produces when run to completion.
    #[must_use]
    pub fn result_count(&self) -> usize {
        match self {
            Self::Login { .. } | Self::Case(_) => 1,
            Self::Matrix { variants, .. } => variants.len(),
            Self::Duplicate { .. } => 2,
            Self::Burst { size, .. } => *size,
        }
    }
}

/// A named, ordered list of scenarios.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Suite {
    /// Suite name.
    pub name: String,
    /// Scenarios in execution order.
    pub scenarios: Vec<Scenario>,
}

impl Suite {
    /// Creates an empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scenarios: Vec::new(),
        }
    }

    /// Appends a scenario (builder pattern).
    #[must_use]
    pub fn with(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    /// Appends a single case (builder pattern).
    #[must_use]
    pub fn with_case(self, case: TestCase) -> Self {
        self.with(Scenario::Case(case))
    }

    /// Number of results a full run of this suite produces.
    #[must_use]
    pub fn expected_results(&self) -> usize {
        self.scenarios.iter().map(Scenario::result_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthMode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_variant_apply_overrides_body_and_headers() {
        let template = RequestTemplate::post_json("/staff/add", json!({"username": "a"}))
            .with_header("Content-Type", "application/json")
            .with_auth(AuthMode::Required);
        let variant = PayloadVariant::json("form header", json!({"username": "b"}))
            .with_header("content-type", "application/x-www-form-urlencoded");

        let applied = variant.apply(&template);
        assert_eq!(applied.body, RequestBody::json(json!({"username": "b"})));
        assert_eq!(
            applied.headers.get("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(applied.auth, AuthMode::Required);
        assert_eq!(applied.headers.len(), 1);
    }

    #[test]
    fn test_suite_expected_results() {
        let template = RequestTemplate::get("/");
        let suite = Suite::new("demo")
            .with(Scenario::login(TestCase::new(
                "Login",
                RequestTemplate::post_form("/token", [("username", "u"), ("password", "p")]),
                Expectation::exact(200),
            )))
            .with(Scenario::Matrix {
                name: "m".to_string(),
                template: template.clone(),
                expect: Expectation::exact(422),
                variants: vec![
                    PayloadVariant::json("a", json!({})),
                    PayloadVariant::json("b", json!({})),
                ],
            })
            .with(Scenario::Duplicate {
                name: "d".to_string(),
                template: template.clone(),
            })
            .with(Scenario::Burst {
                name: "b".to_string(),
                template,
                expect: Expectation::one_of([200, 400]),
                size: DEFAULT_BURST_SIZE,
            });

        assert_eq!(suite.expected_results(), 1 + 2 + 2 + 5);
        assert_eq!(suite.scenarios[0].name(), "Login");
    }
}
