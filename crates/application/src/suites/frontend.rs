//! Replays the staff-creation request exactly as the web frontend sends it.

use apiprobe_domain::{
    Expectation, PayloadVariant, Scenario, StatusExpectation, Suite, TestCase,
};
use serde_json::json;

use super::{SuiteSettings, created_or_registered, staff_payload, staff_template, token_check};

pub(super) fn suite(settings: &SuiteSettings) -> Suite {
    let frontend_request = staff_template(staff_payload(
        &settings.unique_username("newfrontendstaff"),
        "staffpass123",
        "New Frontend Staff",
    ))
    .with_header("Content-Type", "application/json");

    Suite::new("frontend")
        .with(settings.login())
        .with_case(token_check("Token validity"))
        .with_case(TestCase::new(
            "Frontend staff add",
            frontend_request,
            created_or_registered(),
        ))
        .with(Scenario::Matrix {
            name: "Payload formats".to_string(),
            template: staff_template(json!({})).with_header("Content-Type", "application/json"),
            expect: created_or_registered(),
            variants: vec![
                PayloadVariant::json(
                    "valid payload",
                    staff_payload(&settings.unique_username("format"), "pass123", "Test User 1"),
                ),
                PayloadVariant::json("empty strings", staff_payload("", "", ""))
                    .expecting(Expectation::status(StatusExpectation::client_error())),
                PayloadVariant::json(
                    "missing full_name",
                    json!({"username": settings.unique_username("nofullname"), "password": "pass123"}),
                )
                .expecting(Expectation::exact(422)),
                PayloadVariant::json(
                    "extra fields",
                    json!({
                        "username": settings.unique_username("extra"),
                        "password": "pass123",
                        "full_name": "Test User 3",
                        "extra_field": "should be ignored",
                    }),
                ),
            ],
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiprobe_domain::AuthMode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_frontend_request_carries_explicit_headers() {
        let settings = SuiteSettings {
            run_tag: "12345678".to_string(),
            ..SuiteSettings::default()
        };
        let suite = suite(&settings);
        let Some(Scenario::Case(case)) = suite.scenarios.get(2) else {
            unreachable!("third scenario is the frontend request");
        };

        assert_eq!(case.name, "Frontend staff add");
        assert_eq!(case.request.headers.get("content-type"), Some("application/json"));
        assert_eq!(case.request.auth, AuthMode::Required);
        assert_eq!(suite.expected_results(), 1 + 1 + 1 + 4);
    }
}
