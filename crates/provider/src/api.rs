//! Shared handle to the Saviynt API used by every resource and data source.

use std::future::Future;
use std::sync::Arc;

use saviynt_client::{ClientError, SaviyntClient};

use crate::cancellation::CancellationToken;
use crate::retry::{AuthRetryError, Credentials, with_auth_retry};

/// Client, credentials and server version, cloned into each resource.
#[derive(Debug, Clone)]
pub struct ApiHandle {
    pub client: SaviyntClient,
    pub credentials: Arc<Credentials>,
    /// Saviynt server version from the provider block, when configured.
    pub saviynt_version: Option<String>,
}

impl ApiHandle {
    pub fn new(
        client: SaviyntClient,
        credentials: Arc<Credentials>,
        saviynt_version: Option<String>,
    ) -> Self {
        Self {
            client,
            credentials,
            saviynt_version,
        }
    }

    /// Run a token-consuming call through the 401 retry harness.
    pub async fn call<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        call: F,
    ) -> Result<T, AuthRetryError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        with_auth_retry(&self.credentials, cancel, call).await
    }
}
