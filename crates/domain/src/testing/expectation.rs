//! Expected outcome of a case and its evaluation.

use super::{BodyPredicate, StatusExpectation};
use crate::error::CaseError;
use crate::response::Response;

/// A status that is acceptable only when its body check holds.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalStatus {
    /// The status code.
    pub status: u16,
    /// What the body must show for the status to count as a pass.
    pub predicate: BodyPredicate,
}

/// What a case expects from the server.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expectation {
    /// Statuses that pass outright (subject to `body`).
    pub status: StatusExpectation,
    /// Check applied when `status` matches.
    pub body: Option<BodyPredicate>,
    /// Extra statuses accepted only with a matching body.
    pub conditional: Vec<ConditionalStatus>,
}

impl Expectation {
    /// Expects the given status set.
    #[must_use]
    pub const fn status(status: StatusExpectation) -> Self {
        Self {
            status,
            body: None,
            conditional: Vec::new(),
        }
    }

    /// Expects exactly `code`.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::status(StatusExpectation::Exact(code))
    }

    /// Expects any of `codes`.
    #[must_use]
    pub fn one_of(codes: impl IntoIterator<Item = u16>) -> Self {
        Self::status(StatusExpectation::one_of(codes))
    }

    /// Expects the endpoint to exist.
    #[must_use]
    pub const fn reachable() -> Self {
        Self::status(StatusExpectation::Reachable)
    }

    /// Adds a body check for matching statuses.
    #[must_use]
    pub fn with_body(mut self, predicate: BodyPredicate) -> Self {
        self.body = Some(predicate);
        self
    }

    /// Also accepts `status` when `predicate` holds.
    #[must_use]
    pub fn or_status_when(mut self, status: u16, predicate: BodyPredicate) -> Self {
        self.conditional.push(ConditionalStatus { status, predicate });
        self
    }

    /// Human-readable description of the accepted outcomes.
    #[must_use]
    pub fn description(&self) -> String {
        let mut out = format!("status {}", self.status.description());
        if let Some(body) = &self.body {
            out.push_str(&format!(" with {}", body.description()));
        }
        for rule in &self.conditional {
            out.push_str(&format!(
                ", or {} with {}",
                rule.status,
                rule.predicate.description()
            ));
        }
        out
    }

    /// Evaluates a response.
    ///
    /// On success returns a short detail line for the progress stream.
    ///
    /// # Errors
    ///
    /// [`CaseError::UnexpectedStatus`] when no rule accepts the status. A
    /// conditional status whose body check fails is not accepted either;
    /// the failed checks are appended to the expected description.
    /// [`CaseError::BodyPredicate`] when a status in the main set matched
    /// but its body check did not hold.
    pub fn evaluate(&self, response: &Response) -> Result<String, CaseError> {
        let status = response.status_code();

        if self.status.matches(status) {
            return match &self.body {
                None => Ok(format!("status {}", response.status)),
                Some(predicate) => predicate
                    .evaluate(response)
                    .map(|()| format!("status {}, {}", response.status, predicate.description()))
                    .map_err(|reason| CaseError::BodyPredicate { status, reason }),
            };
        }

        let mut rules = self
            .conditional
            .iter()
            .filter(|rule| rule.status == status)
            .peekable();
        if rules.peek().is_none() {
            return Err(CaseError::UnexpectedStatus {
                expected: self.description(),
                actual: status,
            });
        }

        let mut reasons = Vec::new();
        for rule in rules {
            match rule.predicate.evaluate(response) {
                Ok(()) => {
                    return Ok(format!(
                        "status {} accepted: {}",
                        response.status,
                        rule.predicate.description()
                    ));
                }
                Err(reason) => reasons.push(reason),
            }
        }
        Err(CaseError::UnexpectedStatus {
            expected: format!("{} [{}]", self.description(), reasons.join("; ")),
            actual: status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn staff_add() -> Expectation {
        Expectation::exact(200)
            .or_status_when(400, BodyPredicate::detail_contains("already registered"))
    }

    #[test]
    fn test_status_in_set_passes() {
        let response = Response::json(200, json!({"id": "1"}));
        assert!(staff_add().evaluate(&response).is_ok());
    }

    #[test]
    fn test_conditional_status_with_matching_body_passes() {
        let response = Response::json(400, json!({"detail": "Username already registered"}));
        let detail = staff_add().evaluate(&response).unwrap_or_default();
        assert!(detail.contains("accepted"));
    }

    #[test]
    fn test_conditional_status_with_other_body_is_unexpected_status() {
        let response = Response::json(400, json!({"detail": "Password too short"}));
        let err = staff_add().evaluate(&response).err();
        assert_eq!(
            err.as_ref().map(CaseError::kind),
            Some(FailureKind::UnexpectedStatus)
        );
        let expected = match err {
            Some(CaseError::UnexpectedStatus {
                expected,
                actual: 400,
            }) => expected,
            other => unreachable!("{other:?}"),
        };
        assert!(
            expected.starts_with("status = 200, or 400 with detail contains 'already registered' ["),
            "{expected}"
        );
        assert!(expected.contains("Password too short"), "{expected}");
    }

    #[test]
    fn test_unexpected_status() {
        let response = Response::json(422, json!({"detail": []}));
        let err = staff_add().evaluate(&response).err();
        assert_eq!(
            err,
            Some(CaseError::UnexpectedStatus {
                expected: "status = 200, or 400 with detail contains 'already registered'"
                    .to_string(),
                actual: 422,
            })
        );
    }

    #[test]
    fn test_body_predicate_on_matching_status() {
        let expectation = Expectation::exact(200).with_body(BodyPredicate::IsJsonArray);
        assert!(
            expectation
                .evaluate(&Response::json(200, json!([])))
                .is_ok()
        );
        assert!(matches!(
            expectation.evaluate(&Response::json(200, json!({}))),
            Err(CaseError::BodyPredicate { status: 200, .. })
        ));
    }

    #[test]
    fn test_reachable_with_tolerated_not_found() {
        let expectation = Expectation::reachable()
            .or_status_when(404, BodyPredicate::detail_contains_ignore_case("business"));

        assert!(
            expectation
                .evaluate(&Response::json(401, json!({})))
                .is_ok()
        );
        assert!(
            expectation
                .evaluate(&Response::json(404, json!({"detail": "Business not found"})))
                .is_ok()
        );
        assert!(
            expectation
                .evaluate(&Response::json(404, json!({"detail": "Not Found"})))
                .is_err()
        );
        assert!(matches!(
            expectation.evaluate(&Response::text(500, "boom")),
            Err(CaseError::UnexpectedStatus { actual: 500, .. })
        ));
    }
}
