use config::TargetsConfig;
use harness::{RequestDescriptor, SmokeCase};

use crate::locale_file;

/// API clients and webhooks pages
pub fn cases(targets: &TargetsConfig) -> Vec<SmokeCase> {
    vec![
        SmokeCase::new(
            RequestDescriptor::get("developers.api-clients", targets.api_url("/api/v1/clients"))
                .authorized(),
        ),
        locale_file(targets),
    ]
}
