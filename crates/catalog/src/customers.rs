use chrono::{DateTime, Utc};
use config::TargetsConfig;
use harness::{RequestDescriptor, SmokeCase};

use crate::{locale_file, window::ReportingWindow};

fn get(targets: &TargetsConfig, name: &str, path: &str) -> RequestDescriptor {
    RequestDescriptor::get(format!("customers.{name}"), targets.api_url(path)).authorized()
}

fn by_risk(targets: &TargetsConfig, name: &str, level: &str) -> RequestDescriptor {
    get(targets, name, "/api/v1/customers")
        .query("riskLevel", level)
        .query("size", "10")
        .query("sortBy", "riskScore")
        .query("sortDirection", "DESC")
}

/// Customer list, analytics and risk management pages
pub fn cases(targets: &TargetsConfig, now: DateTime<Utc>) -> Vec<SmokeCase> {
    let window = ReportingWindow::last_days(now, 30);

    vec![
        locale_file(targets),
        SmokeCase::new(get(targets, "analytics", "/api/v1/customers/analytics")),
        SmokeCase::new(window.apply(get(
            targets,
            "analytics-window",
            "/api/v1/customers/analytics",
        )))
        .non_empty_body(),
        SmokeCase::new(
            get(targets, "list", "/api/v1/customers")
                .query("page", "0")
                .query("size", "20")
                .query("sortBy", "createdAt")
                .query("sortDirection", "DESC"),
        ),
        SmokeCase::new(
            get(targets, "top-revenue", "/api/v1/customers")
                .query("size", "10")
                .query("sortBy", "totalRevenue")
                .query("sortDirection", "DESC"),
        )
        .non_empty_body(),
        SmokeCase::new(
            get(targets, "ws-info", "/api/ws/customers/info")
                .query("t", now.timestamp_millis().to_string()),
        ),
        SmokeCase::new(by_risk(targets, "high-risk", "HIGH")),
        SmokeCase::new(by_risk(targets, "critical-risk", "CRITICAL")),
    ]
}
