//! Integration tests for `HttpCivicInfoClient` using HTTP stubbing.

mod common;

use std::time::Duration;

use civicinfo::civic::{
    ApiFailure, CivicInfoClient, DecodeError, FailureKind, HttpCivicInfoClient, LookupError,
    TransportError,
};
use common::fixture;
use common::http_mock::MockHttpServer;
use serde_json::json;

const ADDRESS: &str = "2145 Whisper Way Reston, VA";

/// Test a successful lookup against the full sample response.
#[tokio::test]
async fn test_lookup_success() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .with_query("key", "test-api-key")
        .with_query("address", ADDRESS)
        .respond_with_json(fixture("representatives_va.json"))
        .mount()
        .await;

    let client = HttpCivicInfoClient::new(server.url(), "test-api-key");

    let response = client
        .lookup_representatives(ADDRESS)
        .await
        .expect("should succeed");

    assert_eq!(response.divisions.len(), 7);
    let virginia = response
        .division("ocd-division/country:us/state:va")
        .expect("virginia division");
    assert_eq!(virginia.offices().len(), 4);
}

/// Test a bad API key arriving as a 400 with a Google error envelope.
#[tokio::test]
async fn test_invalid_api_key() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .respond_with_status(400)
        .with_json_response(json!({
            "error": {
                "message": "Bad Request",
                "code": 400,
                "errors": [{"message": "Bad Request", "domain": "usageLimits", "reason": "keyInvalid"}]
            }
        }))
        .mount()
        .await;

    let client = HttpCivicInfoClient::new(server.url(), "fakeout");

    let err = client.lookup_representatives(ADDRESS).await.unwrap_err();

    assert_eq!(err.kind(), Some(FailureKind::InvalidApiKey));
}

/// Test a coded backend error body on a 503.
#[tokio::test]
async fn test_backend_error() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .respond_with_status(503)
        .with_json_response(json!({
            "code": 503,
            "errors": [{"reason": "backendError", "domain": "global", "message": "Backend Error"}]
        }))
        .mount()
        .await;

    let client = HttpCivicInfoClient::new(server.url(), "test-api-key");

    let err = client.lookup_representatives(ADDRESS).await.unwrap_err();

    assert!(matches!(
        err,
        LookupError::Decode(DecodeError::Api(ApiFailure::BackendError { .. }))
    ));
}

/// Test a status-style failure on a 200 response.
#[tokio::test]
async fn test_status_failure() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .respond_with_json(json!({"status": "addressUnparseable"}))
        .mount()
        .await;

    let client = HttpCivicInfoClient::new(server.url(), "test-api-key");

    let err = client.lookup_representatives("&$*!?_").await.unwrap_err();

    assert_eq!(err.kind(), Some(FailureKind::AddressUnparseable));
    assert!(err.kind().is_some_and(FailureKind::is_address_problem));
}

/// Test a non-JSON error page is reported as a transport failure.
#[tokio::test]
async fn test_non_json_error_body() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .respond_with_status(502)
        .respond_with_body("<html>Bad Gateway</html>")
        .mount()
        .await;

    let client = HttpCivicInfoClient::new(server.url(), "test-api-key");

    let err = client.lookup_representatives(ADDRESS).await.unwrap_err();

    assert!(matches!(
        err,
        LookupError::Transport(TransportError::Status { status: 502, .. })
    ));
    assert_eq!(err.kind(), None);
}

/// Test a 200 whose body is not JSON.
#[tokio::test]
async fn test_invalid_json_body() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .respond_with_body("not json")
        .mount()
        .await;

    let client = HttpCivicInfoClient::new(server.url(), "test-api-key");

    let err = client.fetch_representatives(ADDRESS).await.unwrap_err();

    assert!(matches!(err, TransportError::InvalidJson(_)));
}

/// Test timeout handling using response delay.
#[tokio::test]
async fn test_request_timeout() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .respond_with_json(json!({"status": "success", "divisions": {}}))
        .respond_with_delay(Duration::from_secs(5))
        .mount()
        .await;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .expect("client build");

    let client = HttpCivicInfoClient::with_client(http_client, server.url(), "test-api-key");

    let result = client.lookup_representatives(ADDRESS).await;

    assert!(matches!(
        result,
        Err(LookupError::Transport(TransportError::Request(_)))
    ));
}

/// Test the configured User-Agent reaches the server and exactly one request is made.
#[tokio::test]
async fn test_single_request_with_user_agent() {
    let server = MockHttpServer::start().await;

    server
        .expect_get("/representatives")
        .with_header("user-agent", "civicinfo-rs (gzip)")
        .respond_with_json(json!({"status": "internalLookupFailure"}))
        .expect_times(1)
        .mount()
        .await;

    let http_client = reqwest::Client::builder()
        .user_agent("civicinfo-rs (gzip)")
        .build()
        .expect("client build");
    let client = HttpCivicInfoClient::with_client(http_client, server.url(), "test-api-key");

    let err = client.lookup_representatives(ADDRESS).await.unwrap_err();
    assert_eq!(err.kind(), Some(FailureKind::InternalLookupFailure));

    server.verify().await;
}
