//! Authenticated API smoke-test harness
//!
//! Every smoke case follows the same linear path:
//!
//! 1. **Login** (only for authorized requests): POST credentials, read the
//!    `token` field from the JSON response.
//! 2. **Dispatch**: send the described request with `Accept: application/json`
//!    and, when required, `Authorization: Bearer <token>`.
//! 3. **Assert**: compare the status with the acceptable set and log a short
//!    preview or the full error body.
//!
//! # Usage
//!
//! ```rust,ignore
//! use harness::{ApiClient, Credentials, RequestDescriptor, SmokeCase};
//!
//! async fn example(config: config::HarnessConfig) -> Result<(), harness::SmokeError> {
//!     let client = ApiClient::from_config(&config)?;
//!     let credentials = Credentials::from(&config.credentials);
//!     let case = SmokeCase::new(
//!         RequestDescriptor::get("api-clients", config.targets.api_url("/api/v1/clients"))
//!             .authorized(),
//!     );
//!
//!     harness::run_case(&client, &credentials, &case).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod errors;
pub mod logging;
pub mod models;
pub mod report;
pub mod runner;

pub use client::ApiClient;
pub use errors::{AssertionFailure, DispatchError, LoginError, SmokeError};
pub use logging::init_tracing;
pub use models::{
    Credentials, ExpectedStatus, HttpMethod, Outcome, RequestDescriptor, SessionToken, SmokeCase,
};
pub use report::{assert_case, assert_expected, preview};
pub use runner::{run_case, run_suite, CaseResult, SuiteReport};
