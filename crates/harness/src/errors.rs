use thiserror::Error;

use crate::models::ExpectedStatus;

/// Failures while obtaining a session token
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Username and password must both be non-empty")]
    MissingCredentials,
    #[error("Login failed with HTTP {status}: {body}")]
    Authentication { status: u16, body: String },
    #[error("Token not found in login response: {0}")]
    TokenExtraction(String),
    #[error("Login request failed: {0}")]
    Transport(String),
}

/// Failures before any HTTP response was received
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
    #[error("Invalid request for {url}: {message}")]
    InvalidRequest { url: String, message: String },
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

/// A response arrived but did not satisfy the case
#[derive(Debug, Error)]
pub enum AssertionFailure {
    #[error("{name} ({url}): expected status in {expected}, got {actual}. Body: {body}")]
    UnexpectedStatus {
        name: String,
        url: String,
        expected: ExpectedStatus,
        actual: u16,
        body: String,
    },
    #[error("{name} ({url}): response body is empty")]
    EmptyBody { name: String, url: String },
}

/// Any failure that aborts a single smoke case
#[derive(Debug, Error)]
pub enum SmokeError {
    #[error(transparent)]
    Login(#[from] LoginError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),
}
