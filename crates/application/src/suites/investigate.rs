//! 422 investigation: payload variations and the concurrent burst.

use apiprobe_domain::{Expectation, PayloadVariant, RequestBody, Scenario, Suite};
use serde_json::json;

use super::{SuiteSettings, staff_payload, staff_template};

/// Statuses that count as handled: created, or rejected as a duplicate.
fn handled() -> Expectation {
    Expectation::one_of([200, 400])
}

pub(super) fn suite(settings: &SuiteSettings) -> Suite {
    Suite::new("investigate")
        .with(settings.login())
        .with(variations(settings))
        .with(Scenario::Burst {
            name: "Concurrent staff add".to_string(),
            template: staff_template(json!({
                "username": settings.unique_username("concurrent-{n}"),
                "password": "testpass123",
                "full_name": "Concurrent User {n}",
            })),
            expect: handled(),
            size: settings.burst_size,
        })
}

fn variations(settings: &SuiteSettings) -> Scenario {
    let valid = |prefix: &str| staff_payload(&settings.unique_username(prefix), "testpass123", "Test User");
    let no_content_type = valid("no-content-type").to_string();

    Scenario::Matrix {
        name: "Staff add variations".to_string(),
        template: staff_template(json!({})),
        expect: handled(),
        variants: vec![
            PayloadVariant::json("standard valid request", valid("standard")),
            PayloadVariant::json("empty string values", staff_payload("", "", "")),
            PayloadVariant::json(
                "null values",
                json!({"username": null, "password": null, "full_name": null}),
            )
            .expecting(Expectation::exact(422)),
            PayloadVariant::json(
                "missing fields",
                json!({"username": settings.unique_username("partial")}),
            )
            .expecting(Expectation::exact(422)),
            PayloadVariant::json(
                "wrong data types",
                json!({"username": 123, "password": 456, "full_name": 789}),
            )
            .expecting(Expectation::exact(422)),
            PayloadVariant::json(
                "invalid email format",
                staff_payload("not-an-email", "testpass123", "Test User"),
            ),
            PayloadVariant::json(
                "very long strings",
                staff_payload(
                    &format!("{}@example.com", "a".repeat(1000)),
                    &"b".repeat(1000),
                    &"c".repeat(1000),
                ),
            ),
            PayloadVariant::json(
                "special characters",
                staff_payload(
                    "test+special@example.com",
                    "pass!@#$%^&*()",
                    "Test Üser Çağlar Şahin",
                ),
            ),
            PayloadVariant::json("wrong content type", valid("wrong-content-type"))
                .with_header("Content-Type", "application/x-www-form-urlencoded"),
            PayloadVariant::new("no content type", RequestBody::raw(None, no_content_type)),
        ],
    }
}
