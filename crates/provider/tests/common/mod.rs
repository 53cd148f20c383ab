//! Shared helpers for provider integration tests.
//!
//! # Invariants
//! - Every test gets its own `MockServer`; nothing is shared across tests.
//! - Logins are counted so refresh behavior can be asserted.
//!
//! # What this does NOT handle
//! - Endpoint mocks; tests mount the ones they need.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use saviynt_config::ProviderConfig;
use saviynt_provider::Provider;
use secrecy::SecretString;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub use saviynt_client::testing::load_fixture;

pub const DETAILS_PATH: &str = "/ECM/api/v5/getConnectionDetails";
pub const CREATE_OR_UPDATE_PATH: &str = "/ECM/api/v5/createOrUpdateConnection";
pub const LIST_CONNECTIONS_PATH: &str = "/ECM/api/v5/getConnections";
pub const CREATE_SS_PATH: &str = "/ECM/api/v5/createSecuritySystem";
pub const UPDATE_SS_PATH: &str = "/ECM/api/v5/updateSecuritySystem";
pub const LIST_SS_PATH: &str = "/ECM/api/v5/getSecuritySystems";

/// Login responder that counts every call and issues `token-<n>`.
struct CountingLogin(Arc<AtomicUsize>);

impl Respond for CountingLogin {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        let mut body = load_fixture("auth/login.json");
        body["access_token"] = serde_json::Value::String(format!("token-{n}"));
        ResponseTemplate::new(200).set_body_json(body)
    }
}

/// Start a server with a counting login endpoint.
pub async fn start_server() -> (MockServer, Arc<AtomicUsize>) {
    let server = MockServer::start().await;
    let logins = Arc::new(AtomicUsize::new(0));
    Mock::given(method("POST"))
        .and(path("/ECM/api/login"))
        .respond_with(CountingLogin(logins.clone()))
        .mount(&server)
        .await;
    (server, logins)
}

pub fn config_for(server: &MockServer, saviynt_version: Option<&str>) -> ProviderConfig {
    ProviderConfig {
        server_url: server.uri(),
        username: "admin".to_string(),
        password: SecretString::new("fixture-password".to_string().into()),
        saviynt_version: saviynt_version.map(str::to_string),
        timeout: Duration::from_secs(10),
        skip_verify: false,
    }
}

/// Configure a provider against the mock server.
pub async fn provider_for(server: &MockServer) -> Provider {
    Provider::configure(config_for(server, Some("25.1")))
        .await
        .expect("provider should configure")
}

pub fn json_response(fixture: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(load_fixture(fixture))
}

/// Details lookup for `name` answering with `fixture`.
pub async fn mount_details(server: &MockServer, name: &str, fixture: &str) {
    Mock::given(method("POST"))
        .and(path(DETAILS_PATH))
        .and(body_partial_json(serde_json::json!({ "connectionname": name })))
        .respond_with(json_response(fixture))
        .mount(server)
        .await;
}

/// Details lookup for `name` answering "not found" once, then `fixture`.
pub async fn mount_absent_then_details(server: &MockServer, name: &str, fixture: &str) {
    Mock::given(method("POST"))
        .and(path(DETAILS_PATH))
        .and(body_partial_json(serde_json::json!({ "connectionname": name })))
        .respond_with(json_response("connections/not_found.json"))
        .up_to_n_times(1)
        .mount(server)
        .await;
    mount_details(server, name, fixture).await;
}

/// Bodies of every request the server received on `endpoint`.
pub async fn bodies_sent_to(server: &MockServer, endpoint: &str) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == endpoint)
        .filter_map(|r| serde_json::from_slice(&r.body).ok())
        .collect()
}

/// In-memory log sink for `tracing_subscriber::fmt`.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut inner) = self.0.lock() {
            inner.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Capture every log record at DEBUG level on the current thread.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}
