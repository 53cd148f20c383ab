//! Authentication endpoint.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use crate::endpoints::{LOGIN_PATH, decode_json, send_request};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::LoginResponse;

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

/// Log in to Saviynt with username and password.
///
/// Any rejection of the credentials, including HTTP 401, surfaces as
/// [`ClientError::AuthFailed`].
pub async fn login(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &SecretString,
    metrics: Option<&MetricsCollector>,
) -> Result<LoginResponse> {
    debug!(username = %username, "Logging in to Saviynt");

    let url = format!("{}{}", base_url, LOGIN_PATH);
    let builder = client.post(&url).json(&LoginBody {
        username,
        password: password.expose_secret(),
    });

    let response = match send_request(builder, LOGIN_PATH, "POST", metrics).await {
        Ok(resp) => resp,
        Err(ClientError::Unauthorized { message, .. }) => {
            return Err(ClientError::AuthFailed(message));
        }
        Err(ClientError::ApiError {
            status, message, ..
        }) if status == 400 || status == 403 => {
            return Err(ClientError::AuthFailed(message));
        }
        Err(e) => return Err(e),
    };

    decode_json(response)
        .await
        .map_err(|_| ClientError::AuthFailed("login response missing access_token".to_string()))
}
