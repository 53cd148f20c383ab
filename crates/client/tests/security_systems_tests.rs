//! Security-system endpoint tests.

mod common;

use common::*;
use saviynt_client::{
    CreateSecuritySystemRequest, ListSecuritySystemsParams, UpdateSecuritySystemRequest,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};

#[tokio::test]
async fn test_create_sends_only_create_subset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/v5/createSecuritySystem"))
        .and(body_json(json!({"systemname": "ss1", "displayName": "SS One"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("security_systems/create_success.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = CreateSecuritySystemRequest {
        systemname: "ss1".to_string(),
        display_name: "SS One".to_string(),
        ..Default::default()
    };
    let resp = client_for(&server)
        .create_security_system("tok-1", &body)
        .await
        .unwrap();
    assert!(resp.status.is_success());
}

#[tokio::test]
async fn test_update_reports_server_error_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ECM/api/v5/updateSecuritySystem"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": "1",
            "msg": "Invalid workflow"
        })))
        .mount(&server)
        .await;

    let body = UpdateSecuritySystemRequest {
        base: CreateSecuritySystemRequest {
            systemname: "ss1".to_string(),
            display_name: "SS One".to_string(),
            ..Default::default()
        },
        policy_rule: Some("Default Policy".to_string()),
        ..Default::default()
    };
    let resp = client_for(&server)
        .update_security_system("tok-1", &body)
        .await
        .unwrap();
    assert_eq!(resp.status.error_code, 1);
    assert_eq!(resp.status.msg, "Invalid workflow");
}

#[tokio::test]
async fn test_list_by_systemname() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ECM/api/v5/getSecuritySystems"))
        .and(query_param("systemname", "ss1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("security_systems/list.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .list_security_systems("tok-1", &ListSecuritySystemsParams::by_name("ss1"))
        .await
        .unwrap();
    assert_eq!(resp.security_systems.len(), 1);
    assert_eq!(
        resp.security_systems[0].display_name.as_deref(),
        Some("SS One")
    );
}
