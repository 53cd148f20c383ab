//! Property-based tests for server URL normalization.
//!
//! Test coverage:
//! - Any valid tenant URL, with or without trailing slashes, normalizes to a
//!   URL without a trailing slash.
//! - Bare host names are promoted to `https://`.

use proptest::prelude::*;
use saviynt_config::ConfigLoader;

fn tenant_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{2,20}".prop_map(|name| format!("{}.saviyntcloud.com", name))
}

proptest! {
    #[test]
    fn prop_trailing_slashes_are_removed(host in tenant_strategy(), slashes in 0usize..4) {
        let raw = format!("https://{}{}", host, "/".repeat(slashes));
        let config = ConfigLoader::new()
            .with_server_url(raw)
            .with_username("admin")
            .with_password("pw")
            .build()
            .unwrap();
        prop_assert_eq!(config.server_url, format!("https://{}", host));
    }

    #[test]
    fn prop_bare_host_promoted_to_https(host in tenant_strategy()) {
        let config = ConfigLoader::new()
            .with_server_url(host.clone())
            .with_username("admin")
            .with_password("pw")
            .build()
            .unwrap();
        prop_assert_eq!(config.server_url, format!("https://{}", host));
    }
}
