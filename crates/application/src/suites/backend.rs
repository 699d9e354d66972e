//! Endpoint contract checks.

use apiprobe_domain::{
    AuthMode, BodyPredicate, Expectation, PayloadVariant, RequestTemplate, Scenario,
    StatusExpectation, Suite, TestCase,
};
use serde_json::json;

use super::{SuiteSettings, created_or_registered, staff_payload, staff_template, token_check};

pub(super) fn suite(settings: &SuiteSettings) -> Suite {
    let register = RequestTemplate::post_json(
        "/register",
        json!({
            "username": settings.username,
            "password": settings.password,
            "full_name": settings.full_name,
            "organization_name": settings.organization_name,
        }),
    )
    .with_auth(AuthMode::Anonymous);

    let staff_username = settings.unique_username("staff");
    let duplicate_username = settings.unique_username("duplicate");

    Suite::new("backend")
        .with_case(TestCase::new("Register User", register, created_or_registered()).halting())
        .with(settings.login())
        .with_case(token_check("Get Users"))
        .with_case(TestCase::new(
            "Add Staff (valid data)",
            staff_template(staff_payload(&staff_username, "staffpass123", "Valid Staff")),
            created_or_registered(),
        ))
        .with(missing_fields())
        .with(invalid_data())
        .with(Scenario::Duplicate {
            name: "Add Staff (duplicate)".to_string(),
            template: staff_template(staff_payload(
                &duplicate_username,
                "staffpass123",
                "Duplicate Staff",
            )),
        })
        .with_case(TestCase::new(
            "Add Staff (no auth)",
            staff_template(staff_payload(
                &settings.unique_username("noauth"),
                "staffpass123",
                "No Auth Staff",
            ))
            .with_auth(AuthMode::Anonymous),
            Expectation::exact(401),
        ))
        .with_case(TestCase::new(
            "Health Check (Root)",
            RequestTemplate::get("/"),
            Expectation::reachable(),
        ))
        .with_case(TestCase::new(
            "Services Endpoint",
            RequestTemplate::get("/services"),
            Expectation::reachable(),
        ))
        .with_case(TestCase::new(
            "Public Business Endpoint",
            RequestTemplate::get(format!("/public/business/{}", settings.business_slug)),
            Expectation::reachable().or_status_when(
                404,
                BodyPredicate::AnyOf(vec![
                    BodyPredicate::detail_contains("İşletme bulunamadı"),
                    BodyPredicate::detail_contains_ignore_case("business"),
                ]),
            ),
        ))
}

/// Every combination lacking at least one required field.
fn missing_fields() -> Scenario {
    let variants = [
        ("empty object", json!({})),
        ("missing username", json!({"password": "pw123", "full_name": "No Username"})),
        ("missing password", json!({"username": "nopass@example.com", "full_name": "No Password"})),
        ("missing full_name", json!({"username": "noname@example.com", "password": "pw123"})),
        ("username only", json!({"username": "onlyuser@example.com"})),
        ("password only", json!({"password": "pw123"})),
        ("full_name only", json!({"full_name": "Only Name"})),
    ];

    Scenario::Matrix {
        name: "Add Staff (missing fields)".to_string(),
        template: staff_template(json!({})),
        expect: Expectation::exact(422),
        variants: variants
            .into_iter()
            .map(|(label, body)| PayloadVariant::json(label, body))
            .collect(),
    }
}

fn invalid_data() -> Scenario {
    Scenario::Matrix {
        name: "Add Staff (invalid data)".to_string(),
        template: staff_template(json!({})),
        expect: Expectation::exact(422),
        variants: vec![
            PayloadVariant::json(
                "wrong types",
                json!({"username": 123, "password": 456, "full_name": 789}),
            ),
            PayloadVariant::json(
                "null values",
                json!({"username": null, "password": null, "full_name": null}),
            ),
            PayloadVariant::json(
                "empty strings",
                json!({"username": "", "password": "", "full_name": ""}),
            )
            .expecting(Expectation::status(StatusExpectation::client_error())),
        ],
    }
}
