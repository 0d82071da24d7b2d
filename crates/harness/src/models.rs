use std::{collections::BTreeSet, fmt};

use serde::Serialize;

// ============================================================================
// Credentials & Session
// ============================================================================

/// Username/password pair posted to the login endpoint
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

impl From<&config::CredentialsConfig> for Credentials {
    fn from(config: &config::CredentialsConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer token returned by a successful login
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

// ============================================================================
// Request Descriptor
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// One request to send: where, how, with what body, and whether it needs a token.
///
/// Descriptors are immutable once built; the builder methods consume `self`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub name: String,
    pub url: String,
    pub method: HttpMethod,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub requires_auth: bool,
}

impl RequestDescriptor {
    /// Public GET request without a body
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            method: HttpMethod::Get,
            query: Vec::new(),
            body: None,
            requires_auth: false,
        }
    }

    /// POST request carrying a JSON body
    pub fn post(name: impl Into<String>, url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            method: HttpMethod::Post,
            query: Vec::new(),
            body: Some(body),
            requires_auth: false,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn authorized(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }
}

// ============================================================================
// Expectations & Outcomes
// ============================================================================

/// Non-empty set of acceptable HTTP status codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedStatus(BTreeSet<u16>);

impl ExpectedStatus {
    /// The usual expectation: exactly HTTP 200
    pub fn ok() -> Self {
        Self(BTreeSet::from([200]))
    }

    /// Accept any of the given codes. An empty slice falls back to `{200}`.
    pub fn any_of(codes: &[u16]) -> Self {
        if codes.is_empty() {
            return Self::ok();
        }
        Self(codes.iter().copied().collect())
    }

    pub fn contains(&self, status: u16) -> bool {
        self.0.contains(&status)
    }
}

impl Default for ExpectedStatus {
    fn default() -> Self {
        Self::ok()
    }
}

impl fmt::Display for ExpectedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<String> = self.0.iter().map(u16::to_string).collect();
        write!(f, "{{{}}}", codes.join(", "))
    }
}

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ============================================================================
// Smoke Case
// ============================================================================

/// Declarative test case: a request plus what counts as a pass
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeCase {
    pub descriptor: RequestDescriptor,
    pub expected: ExpectedStatus,
    /// Also fail when the body is blank or whitespace
    pub require_non_empty_body: bool,
}

impl SmokeCase {
    pub fn new(descriptor: RequestDescriptor) -> Self {
        Self {
            descriptor,
            expected: ExpectedStatus::ok(),
            require_non_empty_body: false,
        }
    }

    pub fn expecting(mut self, expected: ExpectedStatus) -> Self {
        self.expected = expected;
        self
    }

    pub fn non_empty_body(mut self) -> Self {
        self.require_non_empty_body = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}
