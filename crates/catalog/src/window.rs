use chrono::{DateTime, Duration, SecondsFormat, Utc};
use harness::RequestDescriptor;

/// Date range passed to the analytics endpoints as `startDate`/`endDate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportingWindow {
    /// The `days` days leading up to `now`
    pub fn last_days(now: DateTime<Utc>, days: i64) -> Self {
        Self {
            start: now - Duration::days(days),
            end: now,
        }
    }

    /// Millisecond-precision UTC timestamp, e.g. `2025-09-27T10:08:41.958Z`
    fn format(instant: DateTime<Utc>) -> String {
        instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn start_param(&self) -> String {
        Self::format(self.start)
    }

    pub fn end_param(&self) -> String {
        Self::format(self.end)
    }

    /// Append `startDate` and `endDate` to a descriptor
    pub fn apply(&self, descriptor: RequestDescriptor) -> RequestDescriptor {
        descriptor
            .query("startDate", self.start_param())
            .query("endDate", self.end_param())
    }
}
