//! Listing data sources for connections and security systems.
//!
//! Responsibilities:
//! - Paginated, filtered enumeration via `getConnections` and
//!   `getSecuritySystems`.
//! - Flat projection of every list item; no per-item detail calls.
//! - Authenticate-gated redaction of `results`.
//!
//! Does NOT handle:
//! - Fetching connection attributes (the list endpoint does not return them).
//!
//! Invariants:
//! - `connection_type` filtering is also applied client-side, so results
//!   only ever contain the requested type.
//! - With `authenticate = false`, `results` is empty and a warning is emitted.

use saviynt_client::{
    ConnectionListItem, ListConnectionsParams, ListSecuritySystemsParams, SecuritySystemDetails,
};
use saviynt_config::constants::MAX_LIST_PAGE_SIZE;
use tracing::debug;

use crate::api::ApiHandle;
use crate::cancellation::CancellationToken;
use crate::context::{Operation, OperationContext, Scope};
use crate::data_source::authenticate_gate;
use crate::diagnostics::Outcome;
use crate::errors::{ErrorCategory, Result};

/// Filters of the connections listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionsQuery {
    pub connection_name: Option<String>,
    pub connection_type: Option<String>,
    pub max: Option<u32>,
    pub offset: Option<u32>,
    pub authenticate: bool,
}

/// One connection as listed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionSummary {
    pub connection_name: Option<String>,
    pub connection_type: Option<String>,
    pub connection_key: Option<i64>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub defaultsavroles: Option<String>,
    pub email_template: Option<String>,
    pub created_by: Option<String>,
    pub created_on: Option<String>,
    pub updated_by: Option<String>,
    pub updated_on: Option<String>,
}

impl From<ConnectionListItem> for ConnectionSummary {
    fn from(item: ConnectionListItem) -> Self {
        Self {
            connection_name: item.connection_name,
            connection_type: item.connection_type,
            connection_key: item.connection_key,
            description: item.description,
            status: item.status,
            defaultsavroles: item.defaultsavroles,
            email_template: item.email_template,
            created_by: item.created_by,
            created_on: item.created_on,
            updated_by: item.updated_by,
            updated_on: item.updated_on,
        }
    }
}

/// State of a listing data source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingState<T> {
    pub results: Vec<T>,
    pub display_count: Option<i64>,
    pub total_count: Option<i64>,
    pub msg: String,
    pub error_code: String,
    pub authenticate: bool,
}

/// Filters of the security-systems listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecuritySystemsQuery {
    pub systemname: Option<String>,
    pub connection_name: Option<String>,
    pub connection_type: Option<String>,
    pub max: Option<u32>,
    pub offset: Option<u32>,
    pub authenticate: bool,
}

/// One security system as listed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecuritySystemSummary {
    pub systemname: Option<String>,
    pub display_name: Option<String>,
    pub hostname: Option<String>,
    pub port: Option<String>,
    pub connectionname: Option<String>,
    pub connection_type: Option<String>,
    pub access_add_workflow: Option<String>,
    pub access_remove_workflow: Option<String>,
    pub automated_provisioning: Option<String>,
    pub use_open_connector: Option<String>,
    pub provisioning_connection: Option<String>,
    pub service_desk_connection: Option<String>,
    pub policy_rule: Option<String>,
    pub instant_provision: Option<String>,
    pub status: Option<String>,
    pub created_by: Option<String>,
    pub created_on: Option<String>,
    pub updated_by: Option<String>,
    pub updated_on: Option<String>,
}

impl From<SecuritySystemDetails> for SecuritySystemSummary {
    fn from(d: SecuritySystemDetails) -> Self {
        Self {
            systemname: d.systemname,
            display_name: d.display_name,
            hostname: d.hostname,
            port: d.port,
            connectionname: d.connectionname,
            connection_type: d.connection_type,
            access_add_workflow: d.access_add_workflow,
            access_remove_workflow: d.access_remove_workflow,
            automated_provisioning: d.automated_provisioning,
            use_open_connector: d.use_open_connector,
            provisioning_connection: d.provisioning_connection,
            service_desk_connection: d.service_desk_connection,
            policy_rule: d.policy_rule,
            instant_provision: d.instant_provision,
            status: d.status,
            created_by: d.created_by,
            created_on: d.created_on,
            updated_by: d.updated_by,
            updated_on: d.updated_on,
        }
    }
}

fn check_page(ctx: &OperationContext, max: Option<u32>) -> Result<()> {
    match max {
        Some(0) => Err(ctx.error(
            ErrorCategory::ConfigExtraction,
            "max must be greater than 0",
        )),
        Some(m) if m > MAX_LIST_PAGE_SIZE => Err(ctx.error(
            ErrorCategory::ConfigExtraction,
            format!("max must not exceed {}", MAX_LIST_PAGE_SIZE),
        )),
        _ => Ok(()),
    }
}

fn type_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual.is_some_and(|a| a.eq_ignore_ascii_case(w)),
    }
}

/// `saviynt_connections_datasource`.
#[derive(Debug, Clone)]
pub struct ConnectionsDataSource {
    api: ApiHandle,
}

impl ConnectionsDataSource {
    pub fn new(api: ApiHandle) -> Self {
        Self { api }
    }

    pub async fn read(
        &self,
        query: &ConnectionsQuery,
        cancel: &CancellationToken,
    ) -> Result<Outcome<ListingState<ConnectionSummary>>> {
        let ctx = OperationContext::begin(
            Scope::connections_listing(),
            Operation::DataSourceRead,
            query.connection_name.clone().unwrap_or_default(),
        );
        check_page(&ctx, query.max)?;

        let params = ListConnectionsParams {
            connection_name: query.connection_name.clone(),
            connection_type: query.connection_type.clone(),
            max: query.max,
            offset: query.offset,
        };
        let params = &params;
        let client = &self.api.client;
        let response = self
            .api
            .call(cancel, move |token| async move {
                client.list_connections(&token, params).await
            })
            .await
            .map_err(|e| ctx.retry_error(ErrorCategory::ReadFailed, e))?;
        if !response.status.is_success() {
            return Err(ctx.error(
                ErrorCategory::ReadFailed,
                format!(
                    "failed to list connections (errorCode {}): {}",
                    response.status.error_code, response.status.msg
                ),
            ));
        }

        let wanted = query.connection_type.as_deref();
        let results: Vec<ConnectionSummary> = response
            .connection_list
            .into_iter()
            .filter(|item| type_matches(wanted, item.connection_type.as_deref()))
            .map(ConnectionSummary::from)
            .collect();
        debug!(count = results.len(), "connections listed");

        let state = ListingState {
            display_count: Some(results.len() as i64),
            results: if query.authenticate { results } else { Vec::new() },
            total_count: response.total_count,
            msg: ctx.sanitize(&response.status.msg),
            error_code: response.status.error_code.to_string(),
            authenticate: query.authenticate,
        };
        let warning = authenticate_gate(query.authenticate, "connection results");
        ctx.finish();
        Ok(Outcome::with_warnings(state, vec![warning]))
    }
}

/// `saviynt_security_systems_datasource`.
#[derive(Debug, Clone)]
pub struct SecuritySystemsDataSource {
    api: ApiHandle,
}

impl SecuritySystemsDataSource {
    pub fn new(api: ApiHandle) -> Self {
        Self { api }
    }

    pub async fn read(
        &self,
        query: &SecuritySystemsQuery,
        cancel: &CancellationToken,
    ) -> Result<Outcome<ListingState<SecuritySystemSummary>>> {
        let ctx = OperationContext::begin(
            Scope::security_system(),
            Operation::DataSourceRead,
            query.systemname.clone().unwrap_or_default(),
        );
        check_page(&ctx, query.max)?;

        let params = ListSecuritySystemsParams {
            systemname: query.systemname.clone(),
            connection_name: query.connection_name.clone(),
            connection_type: query.connection_type.clone(),
            max: query.max,
            offset: query.offset,
        };
        let params = &params;
        let client = &self.api.client;
        let response = self
            .api
            .call(cancel, move |token| async move {
                client.list_security_systems(&token, params).await
            })
            .await
            .map_err(|e| ctx.retry_error(ErrorCategory::ReadFailed, e))?;
        if !response.status.is_success() {
            return Err(ctx.error(
                ErrorCategory::ReadFailed,
                format!(
                    "failed to list security systems (errorCode {}): {}",
                    response.status.error_code, response.status.msg
                ),
            ));
        }

        let wanted = query.connection_type.as_deref();
        let results: Vec<SecuritySystemSummary> = response
            .security_systems
            .into_iter()
            .filter(|s| type_matches(wanted, s.connection_type.as_deref()))
            .map(SecuritySystemSummary::from)
            .collect();

        let state = ListingState {
            display_count: Some(results.len() as i64),
            results: if query.authenticate { results } else { Vec::new() },
            total_count: response.total_count,
            msg: ctx.sanitize(&response.status.msg),
            error_code: response.status.error_code.to_string(),
            authenticate: query.authenticate,
        };
        let warning = authenticate_gate(query.authenticate, "security system results");
        ctx.finish();
        Ok(Outcome::with_warnings(state, vec![warning]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_filter_is_case_insensitive() {
        assert!(type_matches(None, None));
        assert!(type_matches(Some("REST"), Some("rest")));
        assert!(!type_matches(Some("REST"), Some("AD")));
        assert!(!type_matches(Some("REST"), None));
    }

    #[test]
    fn test_list_item_projection() {
        let item = ConnectionListItem {
            connection_name: Some("acc_rest_1".to_string()),
            connection_type: Some("REST".to_string()),
            connection_key: Some(101),
            ..Default::default()
        };
        let summary = ConnectionSummary::from(item);
        assert_eq!(summary.connection_key, Some(101));
        assert_eq!(summary.connection_type.as_deref(), Some("REST"));
    }
}
