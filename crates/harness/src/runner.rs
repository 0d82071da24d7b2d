use tracing::{error, info};

use crate::{
    client::ApiClient,
    errors::SmokeError,
    models::{Credentials, Outcome, SmokeCase},
    report,
};

/// Run one case: login (when required), dispatch, assert.
///
/// Each call performs its own login; tokens are never shared between cases.
pub async fn run_case(
    client: &ApiClient,
    credentials: &Credentials,
    case: &SmokeCase,
) -> Result<Outcome, SmokeError> {
    let token = if case.descriptor.requires_auth {
        Some(client.login(credentials).await?)
    } else {
        None
    };

    let outcome = client.send(&case.descriptor, token.as_ref()).await?;
    report::assert_case(&outcome, case)?;
    Ok(outcome)
}

#[derive(Debug)]
pub struct CaseResult {
    pub name: String,
    pub result: Result<Outcome, SmokeError>,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Results of a sequential run over many cases
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub results: Vec<CaseResult>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &SmokeError)> {
        self.results
            .iter()
            .filter_map(|r| r.result.as_ref().err().map(|e| (r.name.as_str(), e)))
    }

    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} total",
            self.passed(),
            self.failed(),
            self.results.len()
        )
    }
}

/// Run every case in order; a failing case never stops the next one
pub async fn run_suite(
    client: &ApiClient,
    credentials: &Credentials,
    cases: &[SmokeCase],
) -> SuiteReport {
    let mut suite = SuiteReport::default();

    for case in cases {
        let result = run_case(client, credentials, case).await;
        if let Err(e) = &result {
            error!(case = %case.name(), error = %e, "Smoke case failed");
        }
        suite.results.push(CaseResult {
            name: case.name().to_string(),
            result,
        });
    }

    if suite.is_success() {
        info!(summary = %suite.summary(), "Smoke suite finished");
    } else {
        error!(summary = %suite.summary(), "Smoke suite finished with failures");
    }
    suite
}
