//! Connection endpoints.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::endpoints::{decode_json, send_request, v5_url};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{
    ConnectionDetailsResponse, ConnectionListResponse, CreateOrUpdateConnectionRequest,
    CreateOrUpdateConnectionResponse, GetConnectionDetailsRequest, ListConnectionsParams,
};

const CREATE_OR_UPDATE: &str = "/createOrUpdateConnection";
const GET_DETAILS: &str = "/getConnectionDetails";
const LIST: &str = "/getConnections";

/// Create a connection, or update it when the name already exists.
pub async fn create_or_update_connection(
    client: &Client,
    base_url: &str,
    token: &str,
    body: &CreateOrUpdateConnectionRequest,
    metrics: Option<&MetricsCollector>,
) -> Result<CreateOrUpdateConnectionResponse> {
    debug!(
        connection_type = %body.connection_type,
        connection_name = %body.connection_name,
        fields = ?body.field_names(),
        "Sending createOrUpdateConnection"
    );

    let builder = client
        .post(v5_url(base_url, CREATE_OR_UPDATE))
        .bearer_auth(token)
        .json(body);
    let response = send_request(builder, CREATE_OR_UPDATE, "POST", metrics).await?;
    decode_json(response).await
}

/// Fetch one connection by name or key.
///
/// The body is decoded into the tagged details variant only when the status
/// envelope reports success.
pub async fn get_connection_details(
    client: &Client,
    base_url: &str,
    token: &str,
    request: &GetConnectionDetailsRequest,
    metrics: Option<&MetricsCollector>,
) -> Result<ConnectionDetailsResponse> {
    debug!(
        connection_name = ?request.connection_name,
        connection_key = ?request.connection_key,
        "Fetching connection details"
    );

    let builder = client
        .post(v5_url(base_url, GET_DETAILS))
        .bearer_auth(token)
        .json(request);
    let response = send_request(builder, GET_DETAILS, "POST", metrics).await?;
    let value: Value = decode_json(response).await?;
    ConnectionDetailsResponse::from_value(value).map_err(|e| {
        ClientError::InvalidResponse(format!("failed to decode connection details: {}", e))
    })
}

/// List connections with optional filters and paging.
pub async fn list_connections(
    client: &Client,
    base_url: &str,
    token: &str,
    params: &ListConnectionsParams,
    metrics: Option<&MetricsCollector>,
) -> Result<ConnectionListResponse> {
    let builder = client
        .get(v5_url(base_url, LIST))
        .bearer_auth(token)
        .query(&params.to_query());
    let response = send_request(builder, LIST, "GET", metrics).await?;
    decode_json(response).await
}
