use config::TargetsConfig;
use harness::{RequestDescriptor, SmokeCase};
use serde_json::{json, Value};

/// First page of a transaction listing, newest first
pub fn page_request() -> Value {
    json!({"page": 0, "size": 20, "sort": "createdAt", "direction": "desc"})
}

fn get(targets: &TargetsConfig, name: &str, path: &str) -> RequestDescriptor {
    RequestDescriptor::get(format!("payments.{name}"), targets.api_url(path)).authorized()
}

fn post(targets: &TargetsConfig, name: &str, path: &str, body: Value) -> RequestDescriptor {
    RequestDescriptor::post(format!("payments.{name}"), targets.api_url(path), body).authorized()
}

/// Deposits, withdrawals and fraud analysis pages
pub fn cases(targets: &TargetsConfig) -> Vec<SmokeCase> {
    [
        post(targets, "deposits", "/api/v1/transaction/deposits", page_request()),
        post(targets, "withdrawals", "/api/v1/transaction/withdrawals", page_request()),
        get(targets, "fraud-analysis", "/api/v1/fraud/analysis"),
        get(targets, "fraud-analyses", "/api/v1/fraud-analyses")
            .query("page", "0")
            .query("size", "20")
            .query("sort", "createdAt,desc"),
        get(targets, "fraud-statistics", "/api/v1/fraud-analyses/statistics"),
        get(
            targets,
            "high-risk-visitors",
            "/api/v1/fraud-analyses/high-risk-visitors",
        )
        .query("minRiskScore", "10")
        .query("page", "0")
        .query("size", "20"),
    ]
    .into_iter()
    .map(SmokeCase::new)
    .collect()
}
