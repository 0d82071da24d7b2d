//! Login, dispatch and assertion against a local mock server
//!
//! Run with: `cargo test -p harness --test client_flow -- --nocapture`

use std::time::Duration;

use config::{HttpConfig, LoggingConfig};
use harness::{
    assert_expected, run_case, run_suite, ApiClient, AssertionFailure, Credentials,
    DispatchError, ExpectedStatus, LoginError, RequestDescriptor, SessionToken, SmokeCase,
    SmokeError,
};
use httpmock::prelude::*;
use serde_json::json;

const LOGIN_PATH: &str = "/api/v1/auth/login";

fn create_test_client(server: &MockServer) -> ApiClient {
    harness::init_tracing(&LoggingConfig::default());
    ApiClient::new(&HttpConfig::default(), server.url(LOGIN_PATH)).expect("client should build")
}

fn test_credentials() -> Credentials {
    Credentials::new("sa", "123456")
}

fn lacks_header(req: &HttpMockRequest, name: &str) -> bool {
    req.headers
        .as_ref()
        .map_or(true, |headers| !headers.iter().any(|(key, _)| key.eq_ignore_ascii_case(name)))
}

fn without_authorization(req: &HttpMockRequest) -> bool {
    lacks_header(req, "authorization")
}

fn without_content_type(req: &HttpMockRequest) -> bool {
    lacks_header(req, "content-type")
}

async fn mock_login<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
    let token = token.to_string();
    server
        .mock_async(move |when, then| {
            when.method(POST)
                .path(LOGIN_PATH)
                .header("content-type", "application/json")
                .json_body(json!({"username": "sa", "password": "123456"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"token": token, "type": "Bearer"}));
        })
        .await
}

// ============================================
// Login
// ============================================

#[tokio::test]
async fn test_login_returns_token() {
    let server = MockServer::start_async().await;
    let login = mock_login(&server, "abc123").await;
    let client = create_test_client(&server);

    let token = client.login(&test_credentials()).await.unwrap();

    assert_eq!(token.as_str(), "abc123");
    login.assert_async().await;
}

#[tokio::test]
async fn test_login_non_200_is_authentication_error() {
    let server = MockServer::start_async().await;
    let login = server
        .mock_async(|when, then| {
            when.method(POST).path(LOGIN_PATH);
            then.status(401).body("{\"error\":\"Bad credentials\"}");
        })
        .await;
    let client = create_test_client(&server);

    let err = client.login(&test_credentials()).await.unwrap_err();

    match err {
        LoginError::Authentication { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Bad credentials"));
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
    login.assert_async().await;
}

#[tokio::test]
async fn test_login_without_token_field_is_extraction_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(LOGIN_PATH);
            then.status(200).json_body(json!({"user": {"id": 1}}));
        })
        .await;
    let client = create_test_client(&server);

    let err = client.login(&test_credentials()).await.unwrap_err();
    assert!(matches!(err, LoginError::TokenExtraction(_)));
}

#[tokio::test]
async fn test_login_with_empty_credentials_sends_nothing() {
    let server = MockServer::start_async().await;
    let login = mock_login(&server, "abc123").await;
    let client = create_test_client(&server);

    let err = client
        .login(&Credentials::new("sa", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::MissingCredentials));
    assert_eq!(login.hits_async().await, 0);
}

#[tokio::test]
async fn test_login_connection_refused_is_transport_error() {
    let client = ApiClient::new(&HttpConfig::default(), "http://127.0.0.1:1/api/v1/auth/login")
        .unwrap();

    let err = client.login(&test_credentials()).await.unwrap_err();
    assert!(matches!(err, LoginError::Transport(_)));
}

// ============================================
// Dispatch
// ============================================

#[tokio::test]
async fn test_public_get_has_no_auth_or_content_type() {
    let server = MockServer::start_async().await;
    let locale = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/assets/locale/en-US.json")
                .header("accept", "application/json")
                .matches(without_authorization)
                .matches(without_content_type);
            then.status(200).body("{\"common\":{\"save\":\"Save\"}}");
        })
        .await;
    let client = create_test_client(&server);

    let descriptor = RequestDescriptor::get("locale", server.url("/assets/locale/en-US.json"));
    let outcome = client.send(&descriptor, None).await.unwrap();

    assert_eq!(outcome.status, 200);
    assert_eq!(outcome.body, "{\"common\":{\"save\":\"Save\"}}");
    locale.assert_async().await;
}

#[tokio::test]
async fn test_authorized_request_without_token_omits_header() {
    let server = MockServer::start_async().await;
    let clients = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/clients")
                .matches(without_authorization);
            then.status(401);
        })
        .await;
    let client = create_test_client(&server);

    let descriptor =
        RequestDescriptor::get("api-clients", server.url("/api/v1/clients")).authorized();
    let outcome = client.send(&descriptor, None).await.unwrap();

    assert_eq!(outcome.status, 401);
    clients.assert_async().await;
}

#[tokio::test]
async fn test_public_request_ignores_supplied_token() {
    let server = MockServer::start_async().await;
    let translations = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/assets/translations/en.json")
                .matches(without_authorization);
            then.status(200).body("{}");
        })
        .await;
    let client = create_test_client(&server);

    let descriptor =
        RequestDescriptor::get("translations", server.url("/assets/translations/en.json"));
    let token = SessionToken::new("abc123");
    client.send(&descriptor, Some(&token)).await.unwrap();

    translations.assert_async().await;
}

#[tokio::test]
async fn test_authorized_post_sends_bearer_and_json_body() {
    let server = MockServer::start_async().await;
    let deposits = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/transaction/deposits")
                .header("authorization", "Bearer abc123")
                .header("accept", "application/json")
                .header("content-type", "application/json")
                .json_body(json!({
                    "page": 0,
                    "size": 20,
                    "sort": "createdAt",
                    "direction": "desc"
                }));
            then.status(200).body("{\"content\":[],\"totalElements\":0}");
        })
        .await;
    let client = create_test_client(&server);

    let descriptor = RequestDescriptor::post(
        "deposits",
        server.url("/api/v1/transaction/deposits"),
        json!({"page": 0, "size": 20, "sort": "createdAt", "direction": "desc"}),
    )
    .authorized();
    let outcome = client
        .send(&descriptor, Some(&SessionToken::new("abc123")))
        .await
        .unwrap();

    assert_eq!(outcome.status, 200);
    deposits.assert_async().await;
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let server = MockServer::start_async().await;
    let keys = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/translations/keys")
                .query_param("page", "0")
                .query_param("size", "20")
                .query_param("sort", "keyCode,asc");
            then.status(200).body("[]");
        })
        .await;
    let client = create_test_client(&server);

    let descriptor = RequestDescriptor::get("translation-keys", server.url("/api/v1/translations/keys"))
        .query("page", "0")
        .query("size", "20")
        .query("sort", "keyCode,asc");
    let outcome = client.send(&descriptor, None).await.unwrap();

    assert_eq!(outcome.status, 200);
    assert!(outcome.url.contains("sort=keyCode%2Casc"));
    keys.assert_async().await;
}

#[tokio::test]
async fn test_404_is_an_outcome_not_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/missing");
            then.status(404).body("{\"error\":\"Not Found\"}");
        })
        .await;
    let client = create_test_client(&server);

    let descriptor = RequestDescriptor::get("missing", server.url("/api/v1/missing"));
    let outcome = client.send(&descriptor, None).await.unwrap();

    assert_eq!(outcome.status, 404);
    let failure = assert_expected(&outcome, &ExpectedStatus::ok()).unwrap_err();
    assert!(matches!(
        failure,
        AssertionFailure::UnexpectedStatus { actual: 404, .. }
    ));
}

#[tokio::test]
async fn test_200_and_204_both_satisfy_lenient_expectation() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fingerprint/ok");
            then.status(200).body("{}");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fingerprint/empty");
            then.status(204);
        })
        .await;
    let client = create_test_client(&server);
    let expected = ExpectedStatus::any_of(&[200, 204]);

    for path in ["/fingerprint/ok", "/fingerprint/empty"] {
        let descriptor = RequestDescriptor::get("fingerprint", server.url(path));
        let outcome = client.send(&descriptor, None).await.unwrap();
        assert!(assert_expected(&outcome, &expected).is_ok(), "{path} should pass");
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = ApiClient::new(&HttpConfig::default(), "http://127.0.0.1:1/login").unwrap();

    let descriptor = RequestDescriptor::get("unreachable", "http://127.0.0.1:1/api/v1/clients");
    let err = client.send(&descriptor, None).await.unwrap_err();

    assert!(matches!(err, DispatchError::Transport { .. }));
}

#[tokio::test]
async fn test_malformed_url_is_invalid_request() {
    let client = ApiClient::new(&HttpConfig::default(), "http://127.0.0.1:1/login").unwrap();

    let descriptor = RequestDescriptor::get("broken", "not a url");
    let err = client.send(&descriptor, None).await.unwrap_err();

    assert!(matches!(err, DispatchError::InvalidRequest { .. }));
}

#[tokio::test]
async fn test_read_timeout_is_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_secs(3));
        })
        .await;
    let http = HttpConfig {
        connect_timeout_secs: 1,
        read_timeout_secs: 1,
    };
    let client = ApiClient::new(&http, server.url(LOGIN_PATH)).unwrap();

    let descriptor = RequestDescriptor::get("slow", server.url("/slow"));
    let err = client.send(&descriptor, None).await.unwrap_err();

    assert!(matches!(err, DispatchError::Transport { .. }));
}

// ============================================
// Runner
// ============================================

#[tokio::test]
async fn test_run_case_logs_in_before_authorized_dispatch() {
    let server = MockServer::start_async().await;
    let login = mock_login(&server, "fresh-token").await;
    let branding = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/merchants/current/branding/v2")
                .header("authorization", "Bearer fresh-token");
            then.status(200).body("{\"primaryColor\":\"#1E90FF\"}");
        })
        .await;
    let client = create_test_client(&server);

    let case = SmokeCase::new(
        RequestDescriptor::get(
            "branding-v2",
            server.url("/api/v1/merchants/current/branding/v2"),
        )
        .authorized(),
    );
    let outcome = run_case(&client, &test_credentials(), &case).await.unwrap();

    assert_eq!(outcome.status, 200);
    login.assert_async().await;
    branding.assert_async().await;
}

#[tokio::test]
async fn test_run_case_skips_login_for_public_endpoint() {
    let server = MockServer::start_async().await;
    let login = mock_login(&server, "abc123").await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/assets/locale/en-US.json");
            then.status(200).body("{}");
        })
        .await;
    let client = create_test_client(&server);

    let case = SmokeCase::new(RequestDescriptor::get(
        "locale",
        server.url("/assets/locale/en-US.json"),
    ));
    run_case(&client, &test_credentials(), &case).await.unwrap();

    assert_eq!(login.hits_async().await, 0);
}

#[tokio::test]
async fn test_run_case_login_failure_prevents_dispatch() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(LOGIN_PATH);
            then.status(500).body("upstream down");
        })
        .await;
    let resource = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/cashier-psps");
            then.status(200);
        })
        .await;
    let client = create_test_client(&server);

    let case = SmokeCase::new(
        RequestDescriptor::get("cashier-psps", server.url("/api/v1/cashier-psps")).authorized(),
    );
    let err = run_case(&client, &test_credentials(), &case).await.unwrap_err();

    assert!(matches!(
        err,
        SmokeError::Login(LoginError::Authentication { status: 500, .. })
    ));
    assert_eq!(resource.hits_async().await, 0);
}

#[tokio::test]
async fn test_run_case_empty_body_check() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/customers");
            then.status(200).body("   ");
        })
        .await;
    let client = create_test_client(&server);

    let case = SmokeCase::new(RequestDescriptor::get(
        "customers",
        server.url("/api/v1/customers"),
    ))
    .non_empty_body();
    let err = run_case(&client, &test_credentials(), &case).await.unwrap_err();

    assert!(matches!(
        err,
        SmokeError::Assertion(AssertionFailure::EmptyBody { .. })
    ));
}

#[tokio::test]
async fn test_run_suite_continues_after_failure_and_logs_in_per_case() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let login = mock_login(&server, "abc123").await;
    let withdrawals = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/transaction/withdrawals");
            then.status(404).body("{\"error\":\"Not Found\"}");
        })
        .await;
    let clients = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/clients")
                .header("authorization", "Bearer abc123");
            then.status(200).body("[]");
        })
        .await;
    let client = create_test_client(&server);

    let cases = vec![
        SmokeCase::new(
            RequestDescriptor::post(
                "withdrawals",
                server.url("/api/v1/transaction/withdrawals"),
                json!({"page": 0, "size": 20, "sort": "createdAt", "direction": "desc"}),
            )
            .authorized(),
        ),
        SmokeCase::new(
            RequestDescriptor::get("api-clients", server.url("/api/v1/clients")).authorized(),
        ),
    ];
    let report = run_suite(&client, &test_credentials(), &cases).await;

    assert_eq!(report.passed(), 1);
    assert_eq!(report.failed(), 1);
    assert!(!report.is_success());
    assert_eq!(report.summary(), "1 passed, 1 failed, 2 total");

    let failures: Vec<_> = report.failures().map(|(name, _)| name).collect();
    assert_eq!(failures, vec!["withdrawals"]);

    assert_eq!(login.hits_async().await, 2);
    withdrawals.assert_async().await;
    clients.assert_async().await;
    Ok(())
}
