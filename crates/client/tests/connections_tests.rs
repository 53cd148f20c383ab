//! Connection endpoint tests.
//!
//! # Invariants
//! - 401 always surfaces as `ClientError::Unauthorized`, never retried here
//! - A not-found details lookup decodes the status but no payload

mod common;

use common::*;
use saviynt_client::{
    ConnectionDetails, CreateOrUpdateConnectionRequest, GetConnectionDetailsRequest,
    ListConnectionsParams,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};

#[tokio::test]
async fn test_get_connection_details_rest_variant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/v5/getConnectionDetails"))
        .and(header("authorization", "Bearer tok-1"))
        .and(body_partial_json(json!({"connectionname": "acc_rest_1"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("connections/rest_details.json")),
        )
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .get_connection_details("tok-1", &GetConnectionDetailsRequest::by_name("acc_rest_1"))
        .await
        .unwrap();

    assert!(resp.status.is_success());
    let Some(ConnectionDetails::Rest(payload)) = resp.details else {
        panic!("expected REST payload");
    };
    assert_eq!(payload.base.connection_key, Some(101));
    assert_eq!(payload.timeout_config().unwrap().read_timeout, Some(60));
}

#[tokio::test]
async fn test_get_connection_details_by_key_sends_key_as_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/v5/getConnectionDetails"))
        .and(body_partial_json(json!({"connectionkey": "202"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("connections/ad_details.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .get_connection_details("tok-1", &GetConnectionDetailsRequest::by_key(202))
        .await
        .unwrap();
    assert_eq!(resp.details.map(|d| d.connection_type()), Some("AD"));
}

#[tokio::test]
async fn test_unauthorized_is_distinguished() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/v5/getConnectionDetails"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_connection_details("stale", &GetConnectionDetailsRequest::by_name("x"))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_unauthorized_keeps_envelope_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/v5/getConnectionDetails"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errorCode": "1",
            "msg": "Token expired"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_connection_details("stale", &GetConnectionDetailsRequest::by_name("x"))
        .await
        .unwrap_err();
    match err {
        ClientError::Unauthorized { message, .. } => assert_eq!(message, "Token expired"),
        other => panic!("expected Unauthorized, got {:?}", other),
    }
}

#[tokio::test]
async fn test_undecodable_success_body_is_not_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/v5/getConnectionDetails"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_connection_details("token", &GetConnectionDetailsRequest::by_name("x"))
        .await
        .unwrap_err();
    assert!(!err.is_unauthorized());
    assert!(matches!(err, ClientError::InvalidResponse(_)), "{err:?}");
}

#[tokio::test]
async fn test_precondition_failed_is_api_error_with_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/v5/getConnectionDetails"))
        .respond_with(
            ResponseTemplate::new(412).set_body_json(load_fixture("connections/not_found.json")),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_connection_details("tok-1", &GetConnectionDetailsRequest::by_name("missing"))
        .await
        .unwrap_err();
    match err {
        ClientError::ApiError {
            status, message, ..
        } => {
            assert_eq!(status, 412);
            assert_eq!(message, "Connection not found");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_in_body_has_no_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/v5/getConnectionDetails"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("connections/not_found.json")),
        )
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .get_connection_details("tok-1", &GetConnectionDetailsRequest::by_name("missing"))
        .await
        .unwrap();
    assert_eq!(resp.status.error_code, 1);
    assert!(resp.details.is_none());
}

#[tokio::test]
async fn test_create_or_update_sends_discriminator_and_attributes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/v5/createOrUpdateConnection"))
        .and(body_partial_json(json!({
            "connectiontype": "REST",
            "connectionName": "acc_rest_1",
            "ImportUserJSON": "{\"foo\":1}"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("connections/create_success.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut body = CreateOrUpdateConnectionRequest::new("REST", "acc_rest_1");
    body.attributes
        .insert("ImportUserJSON".to_string(), json!("{\"foo\":1}"));

    let resp = client_for(&server)
        .create_or_update_connection("tok-1", &body)
        .await
        .unwrap();
    assert!(resp.status.is_success());
    assert_eq!(resp.connection_key, Some(101));
}

#[tokio::test]
async fn test_list_connections_forwards_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ECM/api/v5/getConnections"))
        .and(query_param("connectiontype", "REST"))
        .and(query_param("max", "25"))
        .and(query_param("offset", "5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("connections/list.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let params = ListConnectionsParams {
        connection_type: Some("REST".to_string()),
        max: Some(25),
        offset: Some(5),
        ..Default::default()
    };
    let resp = client_for(&server)
        .list_connections("tok-1", &params)
        .await
        .unwrap();
    assert_eq!(resp.total_count, Some(3));
    assert_eq!(resp.connection_list.len(), 3);
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ECM/api/v5/getConnections"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_connections("tok-1", &ListConnectionsParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}
