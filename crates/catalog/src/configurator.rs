use config::TargetsConfig;
use harness::{ExpectedStatus, RequestDescriptor, SmokeCase};
use serde_json::json;

use crate::locale_file;

/// Branding, cashier provider and translation pages
pub fn cases(targets: &TargetsConfig) -> Vec<SmokeCase> {
    let get = |name: &str, path: &str| {
        RequestDescriptor::get(format!("configurator.{name}"), targets.api_url(path)).authorized()
    };

    vec![
        locale_file(targets),
        SmokeCase::new(get("branding-v2", "/api/v1/merchants/current/branding/v2")),
        SmokeCase::new(
            RequestDescriptor::post(
                "configurator.validate-colors",
                targets.api_url("/api/v1/merchants/branding/validate-colors"),
                json!({"primaryColor": "#1E90FF", "secondaryColor": "#FFFFFF"}),
            )
            .authorized(),
        ),
        SmokeCase::new(RequestDescriptor::get(
            "configurator.translations-file",
            targets.translation_url("/assets/translations/en.json"),
        )),
        // Third-party service, answers 204 when it has nothing to report
        SmokeCase::new(RequestDescriptor::get(
            "configurator.fingerprint",
            targets.fingerprint_url.clone(),
        ))
        .expecting(ExpectedStatus::any_of(&[200, 204])),
        SmokeCase::new(get("cashier-psps", "/api/v1/cashier-psps")),
        SmokeCase::new(
            get("translation-keys", "/api/v1/translations/keys")
                .query("page", "0")
                .query("size", "20")
                .query("sort", "keyCode,asc"),
        ),
    ]
}
