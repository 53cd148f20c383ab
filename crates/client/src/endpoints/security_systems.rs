//! Security-system endpoints.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::{decode_json, send_request, v5_url};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{
    CreateSecuritySystemRequest, ListSecuritySystemsParams, SecuritySystemListResponse,
    SecuritySystemResponse, UpdateSecuritySystemRequest,
};

const CREATE: &str = "/createSecuritySystem";
const UPDATE: &str = "/updateSecuritySystem";
const LIST: &str = "/getSecuritySystems";

/// Create a security system with the create-accepted subset of fields.
pub async fn create_security_system(
    client: &Client,
    base_url: &str,
    token: &str,
    body: &CreateSecuritySystemRequest,
    metrics: Option<&MetricsCollector>,
) -> Result<SecuritySystemResponse> {
    debug!(systemname = %body.systemname, "Creating security system");
    let builder = client
        .post(v5_url(base_url, CREATE))
        .bearer_auth(token)
        .json(body);
    let response = send_request(builder, CREATE, "POST", metrics).await?;
    decode_json(response).await
}

/// Update a security system with the full field set.
pub async fn update_security_system(
    client: &Client,
    base_url: &str,
    token: &str,
    body: &UpdateSecuritySystemRequest,
    metrics: Option<&MetricsCollector>,
) -> Result<SecuritySystemResponse> {
    debug!(systemname = %body.base.systemname, "Updating security system");
    let builder = client
        .post(v5_url(base_url, UPDATE))
        .bearer_auth(token)
        .json(body);
    let response = send_request(builder, UPDATE, "POST", metrics).await?;
    decode_json(response).await
}

/// List security systems with optional filters and paging.
pub async fn list_security_systems(
    client: &Client,
    base_url: &str,
    token: &str,
    params: &ListSecuritySystemsParams,
    metrics: Option<&MetricsCollector>,
) -> Result<SecuritySystemListResponse> {
    let builder = client
        .get(v5_url(base_url, LIST))
        .bearer_auth(token)
        .query(&params.to_query());
    let response = send_request(builder, LIST, "GET", metrics).await?;
    decode_json(response).await
}
