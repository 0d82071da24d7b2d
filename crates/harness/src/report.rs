//! Status assertions and human-readable response logging

use tracing::{error, info};

use crate::{
    errors::AssertionFailure,
    models::{ExpectedStatus, Outcome, SmokeCase},
};

/// Maximum characters of the first body line shown on success
pub const PREVIEW_LIMIT: usize = 150;

/// First line of `body`, capped at [`PREVIEW_LIMIT`] characters
pub fn preview(body: &str) -> &str {
    let first_line = body.lines().next().unwrap_or("");
    match first_line.char_indices().nth(PREVIEW_LIMIT) {
        Some((cut, _)) => &first_line[..cut],
        None => first_line,
    }
}

/// Label used for status checks made outside a named case
pub const UNNAMED_CHECK: &str = "status check";

/// Check the observed status against the acceptable set
pub fn assert_expected(outcome: &Outcome, expected: &ExpectedStatus) -> Result<(), AssertionFailure> {
    check_status(UNNAMED_CHECK, outcome, expected)?;
    info!(
        url = %outcome.url,
        status = outcome.status,
        preview = preview(&outcome.body),
        "Request succeeded"
    );
    Ok(())
}

/// Status check plus the case's optional non-empty body requirement
pub fn assert_case(outcome: &Outcome, case: &SmokeCase) -> Result<(), AssertionFailure> {
    check_status(case.name(), outcome, &case.expected)?;

    if case.require_non_empty_body && outcome.body.trim().is_empty() {
        error!(case = %case.name(), url = %outcome.url, "Response body is empty");
        return Err(AssertionFailure::EmptyBody {
            name: case.name().to_string(),
            url: outcome.url.clone(),
        });
    }

    info!(
        case = %case.name(),
        url = %outcome.url,
        status = outcome.status,
        preview = preview(&outcome.body),
        "Request succeeded"
    );
    Ok(())
}

fn check_status(
    name: &str,
    outcome: &Outcome,
    expected: &ExpectedStatus,
) -> Result<(), AssertionFailure> {
    if expected.contains(outcome.status) {
        return Ok(());
    }

    error!(
        case = name,
        url = %outcome.url,
        expected = %expected,
        status = outcome.status,
        body = %outcome.body,
        "Unexpected response status"
    );
    Err(AssertionFailure::UnexpectedStatus {
        name: name.to_string(),
        url: outcome.url.clone(),
        expected: expected.clone(),
        actual: outcome.status,
        body: outcome.body.clone(),
    })
}
