//! Authenticated retry harness.
//!
//! Responsibilities:
//! - Hold the process-wide [`Credentials`]: base URL, current bearer session,
//!   refresh callback and plugin version.
//! - [`with_auth_retry`]: run a token-consuming closure, and on an explicit
//!   401 refresh the token and run it exactly once more.
//!
//! Does NOT handle:
//! - Transient-error retries. Nothing but a 401 is ever retried, and there is
//!   no backoff.
//! - Classifying responses; the closure decides what is a 401 by returning
//!   [`ClientError::Unauthorized`].
//!
//! Invariants:
//! - At most one refresh is in flight. A caller that loses the race to
//!   another refresher observes the new token instead of refreshing again.
//! - No retry is attempted after cancellation.
//! - A second 401 is fatal.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use saviynt_client::{ClientError, MetricsCollector, SaviyntClient, Session};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cancellation::CancellationToken;

/// Boxed future returned by a [`TokenRefresher`].
pub type RefreshFuture<'a> = Pin<Box<dyn Future<Output = Result<Session, ClientError>> + Send + 'a>>;

/// Produces a fresh session when the current token is rejected.
pub trait TokenRefresher: Send + Sync {
    fn refresh(&self) -> RefreshFuture<'_>;
}

/// Refreshes by logging in again with the configured credentials.
#[derive(Debug, Clone)]
pub struct LoginRefresher {
    client: SaviyntClient,
}

impl LoginRefresher {
    pub fn new(client: SaviyntClient) -> Self {
        Self { client }
    }
}

impl TokenRefresher for LoginRefresher {
    fn refresh(&self) -> RefreshFuture<'_> {
        Box::pin(self.client.login())
    }
}

impl<F, Fut> TokenRefresher for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Session, ClientError>> + Send + 'static,
{
    fn refresh(&self) -> RefreshFuture<'_> {
        Box::pin((self)())
    }
}

struct TokenState {
    session: Session,
    generation: u64,
}

/// Process-wide credentials record.
pub struct Credentials {
    base_url: String,
    plugin_version: String,
    state: RwLock<TokenState>,
    refresh_lock: Mutex<()>,
    refresher: Arc<dyn TokenRefresher>,
    refresh_count: AtomicU64,
    metrics: Option<MetricsCollector>,
}

impl Credentials {
    pub fn new(
        base_url: impl Into<String>,
        plugin_version: impl Into<String>,
        session: Session,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            plugin_version: plugin_version.into(),
            state: RwLock::new(TokenState {
                session,
                generation: 0,
            }),
            refresh_lock: Mutex::new(()),
            refresher,
            refresh_count: AtomicU64::new(0),
            metrics: None,
        }
    }

    /// Record refreshes in `saviynt_auth_refresh_total`.
    pub fn with_metrics(mut self, metrics: Option<MetricsCollector>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn plugin_version(&self) -> &str {
        &self.plugin_version
    }

    /// Number of refreshes performed so far.
    pub fn refresh_count(&self) -> u64 {
        self.refresh_count.load(Ordering::SeqCst)
    }

    /// Current token and the generation it belongs to.
    pub async fn current(&self) -> (String, u64) {
        let state = self.state.read().await;
        (state.session.token().to_string(), state.generation)
    }

    /// Refresh the token unless someone already did since `seen_generation`.
    pub async fn refresh_after(&self, seen_generation: u64) -> Result<String, ClientError> {
        let _guard = self.refresh_lock.lock().await;

        {
            let state = self.state.read().await;
            if state.generation != seen_generation {
                debug!(
                    generation = state.generation,
                    "token already refreshed by a concurrent caller"
                );
                return Ok(state.session.token().to_string());
            }
        }

        info!("refreshing Saviynt bearer token");
        let session = match self.refresher.refresh().await {
            Ok(session) => session,
            Err(e) => {
                if let Some(m) = &self.metrics {
                    m.record_auth_refresh("failure");
                }
                warn!(error = %e, "token refresh failed");
                return Err(e);
            }
        };
        if let Some(m) = &self.metrics {
            m.record_auth_refresh("success");
        }
        self.refresh_count.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.write().await;
        state.session = session;
        state.generation += 1;
        Ok(state.session.token().to_string())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("plugin_version", &self.plugin_version)
            .field("refresh_count", &self.refresh_count())
            .finish()
    }
}

/// Failure of a harness-wrapped call.
#[derive(Debug, Error)]
pub enum AuthRetryError {
    /// A non-401 error from the closure, returned unwrapped.
    #[error(transparent)]
    Client(ClientError),
    /// The refreshed token was rejected as well.
    #[error("unauthorized after token refresh: {0}")]
    Unauthorized(ClientError),
    /// The refresh callback itself failed.
    #[error("token refresh failed: {0}")]
    RefreshFailed(ClientError),
    /// The host cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,
}

/// Run `call` with the current token, retrying once after a refresh on 401.
pub async fn with_auth_retry<T, F, Fut>(
    credentials: &Credentials,
    cancel: &CancellationToken,
    mut call: F,
) -> Result<T, AuthRetryError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let (token, generation) = credentials.current().await;

    let first = cancel
        .run(call(token))
        .await
        .ok_or(AuthRetryError::Cancelled)?;
    let err = match first {
        Ok(value) => return Ok(value),
        Err(e) if e.is_unauthorized() => e,
        Err(e) => return Err(AuthRetryError::Client(e)),
    };

    debug!(error = %err, "received 401, refreshing token before retrying once");
    if cancel.is_cancelled() {
        return Err(AuthRetryError::Cancelled);
    }

    let token = cancel
        .run(credentials.refresh_after(generation))
        .await
        .ok_or(AuthRetryError::Cancelled)?
        .map_err(AuthRetryError::RefreshFailed)?;

    match cancel
        .run(call(token))
        .await
        .ok_or(AuthRetryError::Cancelled)?
    {
        Ok(value) => Ok(value),
        Err(e) if e.is_unauthorized() => Err(AuthRetryError::Unauthorized(e)),
        Err(e) => Err(AuthRetryError::Client(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use std::sync::atomic::AtomicUsize;

    fn session(token: &str) -> Session {
        Session::new(SecretString::new(token.to_string().into()), None)
    }

    fn counting_refresher(counter: Arc<AtomicUsize>) -> Arc<dyn TokenRefresher> {
        Arc::new(move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(session(&format!("token-{}", n)))
            }
        })
    }

    fn unauthorized() -> ClientError {
        ClientError::Unauthorized {
            url: "u".to_string(),
            message: "expired".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_does_not_refresh() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let creds = Credentials::new("b", "v", session("token-0"), counting_refresher(refreshes.clone()));
        let out = with_auth_retry(&creds, &CancellationToken::new(), |token| async move {
            Ok::<_, ClientError>(token)
        })
        .await
        .unwrap();
        assert_eq!(out, "token-0");
        assert_eq!(refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_single_401_refreshes_once_and_retries() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let creds = Credentials::new("b", "v", session("token-0"), counting_refresher(refreshes.clone()));
        let calls = AtomicUsize::new(0);
        let out = with_auth_retry(&creds, &CancellationToken::new(), |token| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 { Err(unauthorized()) } else { Ok(token) }
            }
        })
        .await
        .unwrap();
        assert_eq!(out, "token-1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(creds.refresh_count(), 1);
    }

    #[tokio::test]
    async fn test_second_401_is_fatal() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let creds = Credentials::new("b", "v", session("token-0"), counting_refresher(refreshes.clone()));
        let err = with_auth_retry(&creds, &CancellationToken::new(), |_token| async {
            Err::<(), _>(unauthorized())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AuthRetryError::Unauthorized(_)));
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_401_is_not_retried() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let creds = Credentials::new("b", "v", session("token-0"), counting_refresher(refreshes.clone()));
        let calls = AtomicUsize::new(0);
        let err = with_auth_retry(&creds, &CancellationToken::new(), |_token| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err::<(), _>(ClientError::ApiError {
                    status: 503,
                    url: "u".to_string(),
                    message: "down".to_string(),
                })
            }
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AuthRetryError::Client(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancelled_before_call() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let creds = Credentials::new("b", "v", session("token-0"), counting_refresher(refreshes.clone()));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = with_auth_retry(&creds, &cancel, |_token| async { Err::<(), _>(unauthorized()) })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthRetryError::Cancelled));
        assert_eq!(refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_401s_refresh_once() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let creds = Credentials::new("b", "v", session("token-0"), counting_refresher(refreshes.clone()));
        let cancel = CancellationToken::new();
        let call = |token: String| async move {
            tokio::task::yield_now().await;
            if token == "token-0" { Err(unauthorized()) } else { Ok(token) }
        };
        let (a, b, c) = tokio::join!(
            with_auth_retry(&creds, &cancel, call),
            with_auth_retry(&creds, &cancel, call),
            with_auth_retry(&creds, &cancel, call),
        );
        assert_eq!(a.unwrap(), "token-1");
        assert_eq!(b.unwrap(), "token-1");
        assert_eq!(c.unwrap(), "token-1");
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_failure_is_reported() {
        let refresher: Arc<dyn TokenRefresher> = Arc::new(|| async {
            Err(ClientError::AuthFailed("bad credentials".to_string()))
        });
        let creds = Credentials::new("b", "v", session("token-0"), refresher);
        let err = with_auth_retry(&creds, &CancellationToken::new(), |_token| async {
            Err::<(), _>(unauthorized())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AuthRetryError::RefreshFailed(_)));
    }
}
