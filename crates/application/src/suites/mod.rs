//! Built-in suites against the appointment-scheduling service.
//!
//! - [`SuiteKind::Backend`]: registration, login, staff management and
//!   read-only endpoint probes
//! - [`SuiteKind::Investigate`]: the 422 investigation matrix and the
//!   concurrent staff-creation burst
//! - [`SuiteKind::Frontend`]: the requests the web frontend issues

mod backend;
mod frontend;
mod investigate;

use std::fmt;
use std::str::FromStr;

use apiprobe_domain::{
    AuthMode, BodyPredicate, DEFAULT_BURST_SIZE, DEFAULT_TOKEN_KEY, Expectation, RequestTemplate,
    Scenario, Suite, TestCase,
};
use serde_json::{Value, json};

/// Inputs shared by every built-in suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteSettings {
    /// Account used for registration and login.
    pub username: String,
    /// Password of that account.
    pub password: String,
    /// Full name sent on registration.
    pub full_name: String,
    /// Organization sent on registration.
    pub organization_name: String,
    /// Slug probed on the public business endpoint.
    pub business_slug: String,
    /// JSON key holding the token in the login response.
    pub token_key: String,
    /// Number of concurrent requests in the burst.
    pub burst_size: usize,
    /// Short per-run tag that keeps generated usernames unique.
    pub run_tag: String,
}

impl SuiteSettings {
    /// Staff username unique to this run, e.g. `staff-0a1b2c3d@example.com`.
    #[must_use]
    pub fn unique_username(&self, prefix: &str) -> String {
        format!("{prefix}-{}@example.com", self.run_tag)
    }

    fn login(&self) -> Scenario {
        Scenario::Login {
            case: TestCase::new(
                "Login",
                RequestTemplate::post_form(
                    "/token",
                    [
                        ("username", self.username.as_str()),
                        ("password", self.password.as_str()),
                    ],
                )
                .with_auth(AuthMode::Anonymous),
                Expectation::exact(200),
            ),
            token_key: self.token_key.clone(),
        }
    }
}

impl Default for SuiteSettings {
    fn default() -> Self {
        Self {
            username: "testadmin@example.com".to_string(),
            password: "testpass123".to_string(),
            full_name: "Test Admin".to_string(),
            organization_name: "Test Organization".to_string(),
            business_slug: "test-slug".to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            burst_size: DEFAULT_BURST_SIZE,
            run_tag: apiprobe_domain::generate_run_tag(),
        }
    }
}

/// The built-in suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteKind {
    /// Endpoint contract checks.
    Backend,
    /// 422 investigation.
    Investigate,
    /// Frontend request simulation.
    Frontend,
}

impl SuiteKind {
    /// Every suite, in the order `all` runs them.
    pub const ALL: [Self; 3] = [Self::Backend, Self::Investigate, Self::Frontend];

    /// Suite name as used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Backend => "backend",
            Self::Investigate => "investigate",
            Self::Frontend => "frontend",
        }
    }

    /// Builds the suite.
    #[must_use]
    pub fn build(self, settings: &SuiteSettings) -> Suite {
        match self {
            Self::Backend => backend::suite(settings),
            Self::Investigate => investigate::suite(settings),
            Self::Frontend => frontend::suite(settings),
        }
    }
}

impl fmt::Display for SuiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SuiteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown suite: {s}"))
    }
}

fn staff_payload(username: &str, password: &str, full_name: &str) -> Value {
    json!({
        "username": username,
        "password": password,
        "full_name": full_name,
    })
}

fn staff_template(body: Value) -> RequestTemplate {
    RequestTemplate::post_json("/staff/add", body).with_auth(AuthMode::Required)
}

/// 200, or 400 because the account exists from an earlier run.
fn created_or_registered() -> Expectation {
    Expectation::exact(200).or_status_when(
        400,
        BodyPredicate::detail_contains_ignore_case("already registered"),
    )
}

fn token_check(name: &str) -> TestCase {
    TestCase::new(
        name,
        RequestTemplate::get("/users").with_auth(AuthMode::Required),
        Expectation::exact(200).with_body(BodyPredicate::IsJsonArray),
    )
    .halting()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_suite_kind_parsing() {
        assert_eq!("backend".parse::<SuiteKind>(), Ok(SuiteKind::Backend));
        assert_eq!("Frontend".parse::<SuiteKind>(), Ok(SuiteKind::Frontend));
        assert!("all".parse::<SuiteKind>().is_err());
        assert_eq!(SuiteKind::Investigate.to_string(), "investigate");
    }

    #[test]
    fn test_every_suite_starts_with_login() {
        let settings = SuiteSettings::default();
        for kind in SuiteKind::ALL {
            let suite = kind.build(&settings);
            assert_eq!(suite.name, kind.name());
            let first_login = suite
                .scenarios
                .iter()
                .position(|s| matches!(s, Scenario::Login { .. }));
            assert!(first_login.is_some(), "{kind} has no login");
        }
    }

    #[test]
    fn test_usernames_differ_between_runs() {
        let a = SuiteSettings {
            run_tag: "aaaa0001".to_string(),
            ..SuiteSettings::default()
        };
        let b = SuiteSettings {
            run_tag: "aaaa0002".to_string(),
            ..SuiteSettings::default()
        };
        assert_eq!(a.unique_username("staff"), "staff-aaaa0001@example.com");
        assert!(a.unique_username("staff") != b.unique_username("staff"));
    }

    #[test]
    fn test_login_uses_form_and_configured_key() {
        let settings = SuiteSettings {
            token_key: "token".to_string(),
            ..SuiteSettings::default()
        };
        let Scenario::Login { case, token_key } = settings.login() else {
            unreachable!("login() builds a login scenario");
        };
        assert_eq!(token_key, "token");
        assert_eq!(
            case.request.effective_content_type(),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(case.request.auth, AuthMode::Anonymous);
    }
}
