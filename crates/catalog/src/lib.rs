// Smoke Case Catalog
//
// Declarative list of the payment platform endpoints exercised by the smoke
// suites, grouped by dashboard area:
// - dashboard: overview and analytics pages
// - customers: customer list, analytics and risk management
// - payments: deposits, withdrawals and fraud analysis
// - configurator: branding, cashier providers and translations
// - developers: API clients and webhooks
//
// Cases only describe requests; running them is the harness crate's job.

pub mod configurator;
pub mod customers;
pub mod dashboard;
pub mod developers;
pub mod payments;
pub mod window;

use chrono::{DateTime, Utc};
use config::TargetsConfig;
use harness::{RequestDescriptor, SmokeCase};

pub use window::ReportingWindow;

/// Frontend locale bundle; public and shared by most pages
pub fn locale_file(targets: &TargetsConfig) -> SmokeCase {
    SmokeCase::new(RequestDescriptor::get(
        "shared.locale",
        targets.asset_url("/assets/locale/en-US.json"),
    ))
}

/// Every case in the catalog, with reporting windows ending now
pub fn all_cases(targets: &TargetsConfig) -> Vec<SmokeCase> {
    all_cases_at(targets, Utc::now())
}

/// Every case in the catalog, with reporting windows ending at `now`.
///
/// Cases shared between areas appear once.
pub fn all_cases_at(targets: &TargetsConfig, now: DateTime<Utc>) -> Vec<SmokeCase> {
    let areas = [
        dashboard::overview(targets, now),
        dashboard::analytics(targets, now),
        customers::cases(targets, now),
        payments::cases(targets),
        configurator::cases(targets),
        developers::cases(targets),
    ];

    let mut cases: Vec<SmokeCase> = Vec::new();
    for case in areas.into_iter().flatten() {
        if !cases.contains(&case) {
            cases.push(case);
        }
    }
    cases
}
