//! Single-connector data source and the authenticate gate.
//!
//! Responsibilities:
//! - Look one connection up by name or key and project it into a flat
//!   state with a `connection_attributes` map.
//! - [`authenticate_gate`]: the warning every read-side data source emits
//!   for its `authenticate` flag.
//!
//! Does NOT handle:
//! - Listing (see `listing.rs`).
//!
//! Invariants:
//! - Redaction happens after mapping; `authenticate` never changes what is
//!   requested from the server.
//! - Secret attributes are absent from `connection_attributes` even when
//!   `authenticate` is true.

use std::collections::BTreeMap;

use saviynt_client::GetConnectionDetailsRequest;

use crate::api::ApiHandle;
use crate::cancellation::CancellationToken;
use crate::context::{Operation, OperationContext, Scope};
use crate::descriptor::Descriptor;
use crate::diagnostics::{Diagnostic, Outcome};
use crate::engine::{WRONG_KIND_MSG, display_message, state_value};
use crate::errors::{ErrorCategory, Result};
use crate::value::{Attr, AttrValue};

/// Warning for the `authenticate` flag of a read-side data source.
///
/// `subject` names what is gated, e.g. "connection attributes".
pub fn authenticate_gate(authenticate: bool, subject: &str) -> Diagnostic {
    if authenticate {
        Diagnostic::warning(
            format!("Sensitive {subject} included"),
            format!(
                "authenticate = true: {subject} are stored in state. \
                 Protect the state file accordingly."
            ),
        )
    } else {
        Diagnostic::warning(
            format!("{} hidden", capitalize(subject)),
            format!("authenticate = false: {subject} were removed from state. Set authenticate = true to include them."),
        )
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Inputs of a single-connector data source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionQuery {
    pub connection_name: Option<String>,
    pub connection_key: Option<i64>,
    pub authenticate: bool,
}

impl ConnectionQuery {
    pub fn by_name(name: impl Into<String>, authenticate: bool) -> Self {
        Self {
            connection_name: Some(name.into()),
            connection_key: None,
            authenticate,
        }
    }

    pub fn by_key(key: i64, authenticate: bool) -> Self {
        Self {
            connection_name: None,
            connection_key: Some(key),
            authenticate,
        }
    }
}

/// State of a single-connector data source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionDataState {
    pub id: String,
    pub connection_key: Option<i64>,
    pub connection_name: Option<String>,
    pub connection_type: String,
    pub description: Option<String>,
    pub defaultsavroles: Option<String>,
    pub email_template: Option<String>,
    pub created_by: Option<String>,
    pub created_on: Option<String>,
    pub updated_by: Option<String>,
    pub updated_on: Option<String>,
    pub status: Option<String>,
    pub msg: String,
    pub error_code: String,
    pub authenticate: bool,
    /// Non-secret kind attributes; `None` when `authenticate` is false.
    pub connection_attributes: Option<BTreeMap<String, Attr<AttrValue>>>,
}

/// `saviynt_<kind>_connection_datasource`.
#[derive(Debug, Clone)]
pub struct ConnectionDataSource {
    descriptor: &'static Descriptor,
    api: ApiHandle,
}

impl ConnectionDataSource {
    pub fn new(descriptor: &'static Descriptor, api: ApiHandle) -> Self {
        Self { descriptor, api }
    }

    pub fn descriptor(&self) -> &'static Descriptor {
        self.descriptor
    }

    pub async fn read(
        &self,
        query: &ConnectionQuery,
        cancel: &CancellationToken,
    ) -> Result<Outcome<ConnectionDataState>> {
        let label = match (&query.connection_name, query.connection_key) {
            (Some(name), _) => name.clone(),
            (None, Some(key)) => key.to_string(),
            (None, None) => String::new(),
        };
        let ctx = OperationContext::begin(
            Scope::connector(self.descriptor),
            Operation::DataSourceRead,
            &label,
        )
        .with_sanitizer(self.descriptor.sanitizer());

        let request = match (&query.connection_name, query.connection_key) {
            (Some(name), _) if !name.trim().is_empty() => {
                GetConnectionDetailsRequest::by_name(name.trim())
            }
            (_, Some(key)) => GetConnectionDetailsRequest::by_key(key),
            _ => {
                return Err(ctx.error(
                    ErrorCategory::MissingIdentifier,
                    "either connection_name or connection_key must be set",
                ));
            }
        };

        let state = self.fetch(&ctx, &request, query.authenticate, cancel).await?;
        let warning = authenticate_gate(query.authenticate, "connection attributes");
        ctx.finish();
        Ok(Outcome::with_warnings(state, vec![warning]))
    }

    async fn fetch(
        &self,
        ctx: &OperationContext,
        request: &GetConnectionDetailsRequest,
        authenticate: bool,
        cancel: &CancellationToken,
    ) -> Result<ConnectionDataState> {
        let client = &self.api.client;
        let response = self
            .api
            .call(cancel, move |token| async move {
                client.get_connection_details(&token, request).await
            })
            .await
            .map_err(|e| ctx.retry_error(ErrorCategory::ReadFailed, e))?;

        if !response.status.is_success() {
            return Err(ctx.error(
                ErrorCategory::ReadFailed,
                format!(
                    "failed to read connection (errorCode {}): {}",
                    response.status.error_code, response.status.msg
                ),
            ));
        }
        let details = response
            .details
            .as_ref()
            .ok_or_else(|| ctx.error(ErrorCategory::ApiError, WRONG_KIND_MSG))?;
        let payload = self.descriptor.select(details).ok_or_else(|| {
            ctx.error(
                ErrorCategory::ApiError,
                format!(
                    "{}: expected {}, server returned {}",
                    WRONG_KIND_MSG,
                    self.descriptor.transport_type_name,
                    details.connection_type()
                ),
            )
        })?;

        let base = &payload.base;
        let attributes: BTreeMap<String, Attr<AttrValue>> = self
            .descriptor
            .attributes
            .iter()
            .filter(|spec| !spec.secret)
            .map(|spec| (spec.logical_name.to_string(), state_value(spec, payload)))
            .collect();

        let id = match (base.connection_key, &base.connection_name) {
            (Some(key), _) => self.descriptor.surface_id(key),
            (None, Some(name)) => format!("{}-{}", self.descriptor.id_prefix, name),
            (None, None) => self.descriptor.id_prefix.to_string(),
        };

        Ok(ConnectionDataState {
            id,
            connection_key: base.connection_key,
            connection_name: base.connection_name.clone(),
            connection_type: self.descriptor.transport_type_name.to_string(),
            description: base.description.clone(),
            defaultsavroles: base.defaultsavroles.clone(),
            email_template: base.email_template.clone(),
            created_by: base.created_by.clone(),
            created_on: base.created_on.clone(),
            updated_by: base.updated_by.clone(),
            updated_on: base.updated_on.clone(),
            status: base.status.clone(),
            msg: ctx.sanitize(&display_message(&response.status.msg)),
            error_code: response.status.error_code.to_string(),
            authenticate,
            connection_attributes: authenticate.then_some(attributes),
        })
    }
}
