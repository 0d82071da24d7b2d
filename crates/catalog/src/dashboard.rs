use chrono::{DateTime, Utc};
use config::TargetsConfig;
use harness::{RequestDescriptor, SmokeCase};

use crate::{locale_file, window::ReportingWindow};

/// Overview page: last week of headline numbers
pub fn overview(targets: &TargetsConfig, now: DateTime<Utc>) -> Vec<SmokeCase> {
    let window = ReportingWindow::last_days(now, 7);
    let endpoint = |name: &str, path: &str| {
        let descriptor = RequestDescriptor::get(format!("dashboard.overview.{name}"), targets.api_url(path))
            .query("type", "all")
            .authorized();
        SmokeCase::new(window.apply(descriptor))
    };

    vec![
        locale_file(targets),
        endpoint("status-counts", "/api/v1/analytics/status-counts"),
        endpoint(
            "currencies-successful",
            "/api/v1/analytics/currencies/successful-transactions",
        ),
        endpoint("customers-unique", "/api/v1/analytics/customers/unique"),
    ]
}

/// Analytics page: last month of metrics and time series
pub fn analytics(targets: &TargetsConfig, now: DateTime<Utc>) -> Vec<SmokeCase> {
    let window = ReportingWindow::last_days(now, 30);
    let get = |name: &str, path: &str| {
        RequestDescriptor::get(format!("dashboard.analytics.{name}"), targets.api_url(path)).authorized()
    };
    let time_series = |metric: &str| {
        get(
            &format!("time-series-{}", metric.replace('_', "-")),
            "/api/v1/analytics/metrics/time-series",
        )
        .query("groupBy", "day")
        .query("metric", metric)
        .query("type", "all")
    };

    [
        get("status-counts", "/api/v1/analytics/status-counts").query("type", "all"),
        get("summary", "/api/v1/analytics/summary"),
        time_series("volume"),
        time_series("count"),
        time_series("success_rate"),
        get("providers", "/api/v1/analytics/providers").query("type", "all"),
    ]
    .into_iter()
    .map(|descriptor| SmokeCase::new(window.apply(descriptor)))
    .collect()
}
