use std::time::Duration;

use reqwest::{
    header::{HeaderValue, ACCEPT, AUTHORIZATION},
    Client, StatusCode,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    errors::{DispatchError, LoginError},
    models::{Credentials, Outcome, RequestDescriptor, SessionToken},
};

const APPLICATION_JSON: &str = "application/json";

/// HTTP client shared by login and dispatch
///
/// Holds no session state: every call to [`ApiClient::login`] yields a fresh
/// token and callers pass it explicitly to [`ApiClient::send`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    login_url: String,
}

impl ApiClient {
    /// Create a client with the configured connect/read timeouts
    pub fn new(http: &config::HttpConfig, login_url: impl Into<String>) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
            .read_timeout(Duration::from_secs(http.read_timeout_secs))
            .build()
            .map_err(|e| DispatchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            login_url: login_url.into(),
        })
    }

    /// Build a client straight from the harness configuration
    pub fn from_config(config: &config::HarnessConfig) -> Result<Self, DispatchError> {
        Self::new(&config.http, config.targets.login_url())
    }

    /// POST credentials to the login endpoint and extract the bearer token
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken, LoginError> {
        if !credentials.is_complete() {
            return Err(LoginError::MissingCredentials);
        }

        debug!(url = %self.login_url, username = %credentials.username, "Logging in");

        let response = self
            .client
            .post(&self.login_url)
            .header(ACCEPT, HeaderValue::from_static(APPLICATION_JSON))
            .json(credentials)
            .send()
            .await
            .map_err(|e| LoginError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LoginError::Transport(format!("Failed to read login response: {e}")))?;

        if status != StatusCode::OK {
            return Err(LoginError::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        let token = extract_token(&body)?;
        info!(username = %credentials.username, "Logged in successfully, token acquired");
        Ok(token)
    }

    /// Send one request and capture its status and body
    ///
    /// HTTP-level failures are returned as an [`Outcome`]; only transport
    /// faults and malformed requests are errors.
    pub async fn send(
        &self,
        descriptor: &RequestDescriptor,
        token: Option<&SessionToken>,
    ) -> Result<Outcome, DispatchError> {
        let mut request = self
            .client
            .request(descriptor.method.into(), &descriptor.url)
            .header(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

        if !descriptor.query.is_empty() {
            request = request.query(&descriptor.query);
        }

        // `json` also sets Content-Type: application/json
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }

        if descriptor.requires_auth {
            match token {
                Some(token) => request = request.header(AUTHORIZATION, token.bearer()),
                None => warn!(
                    case = %descriptor.name,
                    url = %descriptor.url,
                    "Authorized request dispatched without a token"
                ),
            }
        }

        debug!(
            case = %descriptor.name,
            method = %descriptor.method,
            url = %descriptor.url,
            "Dispatching request"
        );

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                DispatchError::InvalidRequest {
                    url: descriptor.url.clone(),
                    message: e.to_string(),
                }
            } else {
                DispatchError::Transport {
                    url: descriptor.url.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        let url = response.url().to_string();
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| DispatchError::Transport {
            url: url.clone(),
            message: format!("Failed to read response body: {e}"),
        })?;

        Ok(Outcome { url, status, body })
    }
}

/// Look up the `token` field of a login response
pub(crate) fn extract_token(body: &str) -> Result<SessionToken, LoginError> {
    let value: Value =
        serde_json::from_str(body).map_err(|_| LoginError::TokenExtraction(body.to_string()))?;

    match value.get("token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(SessionToken::new(token)),
        _ => Err(LoginError::TokenExtraction(body.to_string())),
    }
}
