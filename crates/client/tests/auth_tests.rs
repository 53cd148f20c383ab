//! Login endpoint tests.

mod common;

use common::*;
use wiremock::matchers::{body_json, method, path};

#[tokio::test]
async fn test_login_returns_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/login"))
        .and(body_json(serde_json::json!({
            "username": "admin",
            "password": "fixture-password"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("auth/login.json")))
        .expect(1)
        .mount(&server)
        .await;

    let session = client_for(&server).login().await.unwrap();
    assert_eq!(
        session.token(),
        "eyJhbGciOiJIUzI1NiJ9.fixture-access-token"
    );
    assert!(!session.is_expired());
}

#[tokio::test]
async fn test_login_rejected_is_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "msg": "Bad credentials"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).login().await.unwrap_err();
    match err {
        ClientError::AuthFailed(msg) => assert_eq!(msg, "Bad credentials"),
        other => panic!("expected AuthFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_without_token_is_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "Bearer"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).login().await.unwrap_err();
    assert!(matches!(err, ClientError::AuthFailed(_)));
}
