//! Process-wide subscriber installation.
//!
//! Lives in its own test binary: the subscriber stays installed for the
//! rest of the process.

use saviynt_client::tracing::OTLP_ENDPOINT_ENV;
use saviynt_provider::Provider;

#[test]
fn test_init_tracing_installs_once() {
    let guard = temp_env::with_var(OTLP_ENDPOINT_ENV, None::<&str>, || {
        Provider::init_tracing(true)
    })
    .expect("first install succeeds");

    tracing::info!(target: "saviynt_provider", "subscriber installed");
    assert!(Provider::init_tracing(false).is_err());
    guard.shutdown();
}
