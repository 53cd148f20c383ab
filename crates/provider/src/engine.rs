//! Generic connector reconciliation engine.
//!
//! Responsibilities:
//! - Create, Read, Update, Import and Delete for any connector kind, driven
//!   entirely by the kind's [`Descriptor`].
//! - Map plans to `createOrUpdateConnection` bodies and connection-details
//!   payloads back to state.
//! - Enforce duplicate-name idempotency on Create, name and type
//!   immutability on Update, and the post-update re-read.
//!
//! Does NOT handle:
//! - Token refresh (see `retry.rs`); every transport call goes through
//!   [`ApiHandle::call`].
//! - Authenticate-gated redaction (see `data_source.rs`).
//!
//! Invariants:
//! - Secrets are read from the config channel only, exist in the request
//!   body for one call and are null in every returned state.
//! - A rejected Update (name or type change) makes no transport call.
//! - Surface ids are always `<idPrefix>-<connectionKey>`.

use saviynt_client::{
    ApiStatus, ConnectionPayload, ConnectionTimeoutConfig, CreateOrUpdateConnectionRequest,
    GetConnectionDetailsRequest,
};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::ApiHandle;
use crate::cancellation::CancellationToken;
use crate::context::{Operation, OperationContext, Scope};
use crate::descriptor::{AttributeSpec, Descriptor, SemanticType};
use crate::diagnostics::Outcome;
use crate::errors::{ErrorCategory, Result};
use crate::model::{ConnectorConfig, ConnectorModel};
use crate::retry::AuthRetryError;
use crate::value::{
    Attr, AttrValue, NullPolicy, json_to_bool, json_to_i64, json_to_string, secret_from_wire,
    string_from_wire, string_to_wire,
};

/// Literal message Saviynt returns for a healthy connection.
const SERVER_SUCCESS_MSG: &str = "success";
/// What the host sees instead of [`SERVER_SUCCESS_MSG`].
pub const CONNECTION_SUCCESSFUL_MSG: &str = "Connection Successful";

pub const NAME_IMMUTABLE_MSG: &str = "Connection name cannot be updated";
pub const TYPE_IMMUTABLE_MSG: &str = "Connection type cannot be updated";
pub const WRONG_KIND_MSG: &str = "unable to verify connection type";

/// Map the server's status message for display.
pub(crate) fn display_message(msg: &str) -> String {
    if msg == SERVER_SUCCESS_MSG {
        CONNECTION_SUCCESSFUL_MSG.to_string()
    } else {
        msg.to_string()
    }
}

/// One connector resource type, bound to its descriptor.
#[derive(Debug, Clone)]
pub struct ConnectorResource {
    descriptor: &'static Descriptor,
    api: ApiHandle,
}

impl ConnectorResource {
    pub fn new(descriptor: &'static Descriptor, api: ApiHandle) -> Self {
        Self { descriptor, api }
    }

    pub fn descriptor(&self) -> &'static Descriptor {
        self.descriptor
    }

    fn context(
        &self,
        operation: Operation,
        name: &str,
        config: Option<&ConnectorConfig>,
    ) -> OperationContext {
        let mut sanitizer = self.descriptor.sanitizer();
        if let Some(config) = config {
            sanitizer = sanitizer.with_values(config.secret_values());
        }
        OperationContext::begin(Scope::connector(self.descriptor), operation, name)
            .with_sanitizer(sanitizer)
    }

    /// Create the connection. Fails with `DuplicateName` if it already exists.
    pub async fn create(
        &self,
        plan: ConnectorModel,
        config: &ConnectorConfig,
        cancel: &CancellationToken,
    ) -> Result<Outcome<ConnectorModel>> {
        let name = plan.name().unwrap_or_default().to_string();
        let ctx = self.context(Operation::Create, &name, Some(config));
        if name.is_empty() {
            return Err(ctx.error(
                ErrorCategory::PlanExtraction,
                "connection_name is required",
            ));
        }
        self.check_plan_type(&ctx, &plan)?;
        self.check_required(&ctx, &plan, config)?;

        if self.exists(&ctx, &name, cancel).await? {
            return Err(ctx.error(
                ErrorCategory::DuplicateName,
                format!(
                    "a connection named '{}' already exists; import it instead of creating it",
                    name
                ),
            ));
        }

        let body = self.build_body(&ctx, &plan, config, false)?;
        let response = self
            .send(&ctx, &body, cancel)
            .await
            .map_err(|e| ctx.retry_error(ErrorCategory::CreateFailed, e))?;
        if !response.status.is_success() {
            return Err(ctx.error(
                ErrorCategory::CreateFailed,
                format!(
                    "server rejected the connection (errorCode {}): {}",
                    response.status.error_code, response.status.msg
                ),
            ));
        }

        let state = match response.connection_key {
            Some(key) => self.state_from_plan(plan, key, &response.status),
            None => {
                debug!("create response carried no connection key; reading it back");
                self.fetch(&ctx, &name, cancel, ErrorCategory::ReadFailed)
                    .await?
            }
        };
        info!(connection_key = ?state.connection_key.value(), "connection created");
        ctx.finish();
        Ok(Outcome::new(state))
    }

    /// Refresh state from the server.
    pub async fn read(
        &self,
        state: &ConnectorModel,
        cancel: &CancellationToken,
    ) -> Result<Outcome<ConnectorModel>> {
        let name = state.name().unwrap_or_default().to_string();
        let ctx = self.context(Operation::Read, &name, None);
        if name.is_empty() {
            return Err(ctx.error(
                ErrorCategory::StateExtraction,
                "connection_name is missing from state",
            ));
        }
        let fresh = self
            .fetch(&ctx, &name, cancel, ErrorCategory::ReadFailed)
            .await?;
        ctx.finish();
        Ok(Outcome::new(fresh))
    }

    /// Apply a changed plan, then re-read to canonicalize.
    pub async fn update(
        &self,
        state: &ConnectorModel,
        plan: ConnectorModel,
        config: &ConnectorConfig,
        cancel: &CancellationToken,
    ) -> Result<Outcome<ConnectorModel>> {
        let state_name = state.name().unwrap_or_default().to_string();
        let ctx = self.context(Operation::Update, &state_name, Some(config));
        if state_name.is_empty() {
            return Err(ctx.error(
                ErrorCategory::StateExtraction,
                "connection_name is missing from state",
            ));
        }

        let mut plan = plan;
        match plan.name().map(str::to_string) {
            Some(planned) if planned != state_name => {
                return Err(ctx.error(ErrorCategory::NameImmutable, NAME_IMMUTABLE_MSG));
            }
            Some(_) => {}
            None => plan.connection_name = Attr::Value(state_name.clone()),
        }
        if let (Some(planned), Some(current)) =
            (plan.connection_type.as_deref(), state.connection_type.as_deref())
            && !planned.eq_ignore_ascii_case(current)
        {
            return Err(ctx.error(ErrorCategory::TypeImmutable, TYPE_IMMUTABLE_MSG));
        }
        self.check_plan_type(&ctx, &plan)?;

        let body = self.build_body(&ctx, &plan, config, true)?;
        let response = self
            .send(&ctx, &body, cancel)
            .await
            .map_err(|e| ctx.retry_error(ErrorCategory::UpdateFailed, e))?;
        if !response.status.is_success() {
            return Err(ctx.error(
                ErrorCategory::UpdateFailed,
                format!(
                    "server rejected the update (errorCode {}): {}",
                    response.status.error_code, response.status.msg
                ),
            ));
        }

        let fresh = self
            .fetch(&ctx, &state_name, cancel, ErrorCategory::StateUpdate)
            .await?;
        info!("connection updated");
        ctx.finish();
        Ok(Outcome::new(fresh))
    }

    /// Import an existing connection by name.
    pub async fn import(
        &self,
        connection_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Outcome<ConnectorModel>> {
        let name = connection_name.trim();
        let ctx = self.context(Operation::Import, name, None);
        if name.is_empty() {
            return Err(ctx.error(
                ErrorCategory::MissingIdentifier,
                "import requires the connection name",
            ));
        }
        let state = self
            .fetch(&ctx, name, cancel, ErrorCategory::ReadFailed)
            .await?;
        ctx.finish();
        Ok(Outcome::new(state))
    }

    /// Delete is refused unless the host runs acceptance tests, in which
    /// case only local state is dropped.
    pub fn delete(&self, state: &ConnectorModel) -> Result<Outcome<()>> {
        let ctx = self.context(Operation::Delete, state.name().unwrap_or_default(), None);
        if saviynt_config::is_acceptance_test() {
            info!("acceptance test mode: dropping local state only");
            ctx.finish();
            return Ok(Outcome::new(()));
        }
        Err(ctx.error(
            ErrorCategory::DeleteRefused,
            "deleting a connection is not supported by the Saviynt API; \
             remove it from the Saviynt console and then from state",
        ))
    }

    /// Probe for an existing connection. Only cancellation is fatal.
    async fn exists(
        &self,
        ctx: &OperationContext,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        let client = &self.api.client;
        let request = GetConnectionDetailsRequest::by_name(name);
        let request = &request;
        let probe = self
            .api
            .call(cancel, move |token| async move {
                client.get_connection_details(&token, request).await
            })
            .await;
        match probe {
            Ok(response) => Ok(response.status.is_success()),
            Err(AuthRetryError::Cancelled) => Err(ctx.retry_error(
                ErrorCategory::CreateFailed,
                AuthRetryError::Cancelled,
            )),
            Err(e) => {
                debug!(error = %ctx.sanitize(&e.to_string()), "existence probe failed; treating as absent");
                Ok(false)
            }
        }
    }

    async fn send(
        &self,
        ctx: &OperationContext,
        body: &CreateOrUpdateConnectionRequest,
        cancel: &CancellationToken,
    ) -> std::result::Result<saviynt_client::CreateOrUpdateConnectionResponse, AuthRetryError>
    {
        ctx.span().in_scope(|| {
            debug!(fields = ?body.field_names(), "sending createOrUpdateConnection");
        });
        let client = &self.api.client;
        self.api
            .call(cancel, move |token| async move {
                client.create_or_update_connection(&token, body).await
            })
            .await
    }

    /// Read a connection by name and map it to state.
    async fn fetch(
        &self,
        ctx: &OperationContext,
        name: &str,
        cancel: &CancellationToken,
        category: ErrorCategory,
    ) -> Result<ConnectorModel> {
        let client = &self.api.client;
        let request = GetConnectionDetailsRequest::by_name(name);
        let request = &request;
        let response = self
            .api
            .call(cancel, move |token| async move {
                client.get_connection_details(&token, request).await
            })
            .await
            .map_err(|e| ctx.retry_error(category, e))?;

        if !response.status.is_success() {
            return Err(ctx.error(
                category,
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
        Ok(self.state_from_payload(ctx, name, payload, &response.status))
    }

    fn check_plan_type(&self, ctx: &OperationContext, plan: &ConnectorModel) -> Result<()> {
        match plan.connection_type.as_deref() {
            Some(t) if !t.eq_ignore_ascii_case(self.descriptor.transport_type_name) => {
                Err(ctx.error(
                    ErrorCategory::PlanExtraction,
                    format!(
                        "connection_type '{}' does not match this resource (expected {})",
                        t, self.descriptor.transport_type_name
                    ),
                ))
            }
            _ => Ok(()),
        }
    }

    fn check_required(
        &self,
        ctx: &OperationContext,
        plan: &ConnectorModel,
        config: &ConnectorConfig,
    ) -> Result<()> {
        let missing: Vec<&str> = self
            .descriptor
            .required_attributes()
            .filter(|spec| {
                if spec.secret {
                    config.secret(spec.logical_name).is_none()
                } else {
                    !plan.attribute(spec.logical_name).is_set()
                }
            })
            .map(|spec| spec.logical_name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ctx.error(
                ErrorCategory::PlanExtraction,
                format!("missing required attributes: {}", missing.join(", ")),
            ))
        }
    }

    /// Build the create/update body from plan and config.
    ///
    /// On update, an unset vault trio is sent as three empty strings.
    fn build_body(
        &self,
        ctx: &OperationContext,
        plan: &ConnectorModel,
        config: &ConnectorConfig,
        is_update: bool,
    ) -> Result<CreateOrUpdateConnectionRequest> {
        if let Some(unknown) = plan
            .attributes
            .keys()
            .find(|k| self.descriptor.attribute(k).is_none())
        {
            return Err(ctx.error(
                ErrorCategory::PlanExtraction,
                format!(
                    "attribute '{}' is not supported by {} connections",
                    unknown, self.descriptor.display_name
                ),
            ));
        }

        let name = plan.name().unwrap_or_default();
        let mut body = CreateOrUpdateConnectionRequest::new(self.descriptor.transport_type_name, name);
        body.description = string_to_wire(&plan.description, NullPolicy::Omit);
        body.defaultsavroles = string_to_wire(&plan.defaultsavroles, NullPolicy::Omit);
        body.email_template = string_to_wire(&plan.email_template, NullPolicy::Omit);

        if is_update && !plan.has_vault_settings() {
            body.vault_connection = Some(String::new());
            body.vault_configuration = Some(String::new());
            body.save_in_vault = Some(String::new());
        } else {
            body.vault_connection = string_to_wire(&plan.vault_connection, NullPolicy::Omit);
            body.vault_configuration = string_to_wire(&plan.vault_configuration, NullPolicy::Omit);
            body.save_in_vault = string_to_wire(&plan.save_in_vault, NullPolicy::Omit);
        }

        for spec in self.descriptor.attributes {
            if spec.secret {
                if plan.attribute(spec.logical_name).is_set() {
                    debug!(attribute = spec.logical_name, "ignoring write-only value in plan");
                }
                if let Some(secret) = config.secret(spec.logical_name) {
                    body.attributes.insert(
                        spec.transport_name.to_string(),
                        Value::String(secret.expose_secret().to_string()),
                    );
                }
                continue;
            }
            let wire = match plan.attribute(spec.logical_name) {
                Attr::Unknown => None,
                Attr::Null => match spec.null_policy {
                    NullPolicy::Omit => None,
                    NullPolicy::EmptyString => Some(Value::String(String::new())),
                },
                Attr::Value(value) => Some(
                    wire_value(spec, value).map_err(|m| ctx.error(ErrorCategory::PlanExtraction, m))?,
                ),
            };
            if let Some(wire) = wire {
                body.attributes.insert(spec.transport_name.to_string(), wire);
            }
        }
        Ok(body)
    }

    /// State after a successful create: the plan with server-echoed fields.
    fn state_from_plan(&self, plan: ConnectorModel, key: i64, status: &ApiStatus) -> ConnectorModel {
        let mut state = ConnectorModel {
            id: Attr::Value(self.descriptor.surface_id(key)),
            connection_key: Attr::Value(key),
            connection_type: Attr::Value(self.descriptor.transport_type_name.to_string()),
            description: plan.description.known_or_null(),
            defaultsavroles: plan.defaultsavroles.known_or_null(),
            email_template: plan.email_template.known_or_null(),
            vault_connection: plan.vault_connection.known_or_null(),
            vault_configuration: plan.vault_configuration.known_or_null(),
            save_in_vault: plan.save_in_vault.known_or_null(),
            msg: Attr::Value(display_message(&status.msg)),
            error_code: Attr::Value(status.error_code.to_string()),
            connection_name: plan.connection_name,
            attributes: Default::default(),
        };
        let mut planned = plan.attributes;
        for spec in self.descriptor.attributes {
            let value = if spec.secret {
                secret_from_wire()
            } else {
                planned
                    .remove(spec.logical_name)
                    .unwrap_or_default()
                    .known_or_null()
            };
            state.set_attribute(spec.logical_name, value);
        }
        state
    }

    fn state_from_payload(
        &self,
        ctx: &OperationContext,
        name: &str,
        payload: &ConnectionPayload,
        status: &ApiStatus,
    ) -> ConnectorModel {
        let base = &payload.base;
        let key: Attr<i64> = base.connection_key.into();
        let mut state = ConnectorModel {
            id: key.clone().map(|k| self.descriptor.surface_id(k)),
            connection_key: key,
            connection_name: Attr::Value(
                base.connection_name.clone().unwrap_or_else(|| name.to_string()),
            ),
            connection_type: Attr::Value(self.descriptor.transport_type_name.to_string()),
            description: string_from_wire(base.description.as_deref()),
            defaultsavroles: string_from_wire(base.defaultsavroles.as_deref()),
            email_template: string_from_wire(base.email_template.as_deref()),
            vault_connection: string_from_wire(base.vault_connection.as_deref()),
            vault_configuration: string_from_wire(base.vault_configuration.as_deref()),
            save_in_vault: string_from_wire(base.save_in_vault.as_deref()),
            msg: Attr::Value(ctx.sanitize(&display_message(&status.msg))),
            error_code: Attr::Value(status.error_code.to_string()),
            attributes: Default::default(),
        };
        for spec in self.descriptor.attributes {
            state.set_attribute(spec.logical_name, state_value(spec, payload));
        }
        if state.id.is_null() {
            warn!("connection details carried no connection key");
        }
        state
    }
}

/// Plan value to wire value for one attribute.
fn wire_value(spec: &AttributeSpec, value: &AttrValue) -> std::result::Result<Value, String> {
    let mismatch = || {
        format!(
            "attribute '{}' expects a {:?} value",
            spec.logical_name, spec.semantic_type
        )
    };
    match (spec.semantic_type, value) {
        (SemanticType::String, AttrValue::String(s)) => Ok(Value::String(s.clone())),
        (SemanticType::String, AttrValue::Int64(n)) => Ok(Value::String(n.to_string())),
        (SemanticType::String, AttrValue::Bool(b)) => Ok(Value::String(b.to_string())),
        (SemanticType::Int64, AttrValue::Int64(n)) => Ok(Value::String(n.to_string())),
        (SemanticType::Int64, AttrValue::String(s)) if s.trim().parse::<i64>().is_ok() => {
            Ok(Value::String(s.trim().to_string()))
        }
        (SemanticType::Bool, AttrValue::Bool(b)) => Ok(Value::String(b.to_string())),
        (SemanticType::TimeoutConfig, AttrValue::Timeout(t)) => {
            serde_json::to_value(ConnectionTimeoutConfig::from(t)).map_err(|e| e.to_string())
        }
        _ => Err(mismatch()),
    }
}

/// Wire value to state for one attribute. Secrets are always null.
pub(crate) fn state_value(spec: &AttributeSpec, payload: &ConnectionPayload) -> Attr<AttrValue> {
    if spec.secret {
        return secret_from_wire();
    }
    match spec.semantic_type {
        SemanticType::TimeoutConfig => payload
            .timeout_config()
            .map(|t| AttrValue::Timeout(t.into()))
            .into(),
        SemanticType::String => payload
            .attribute(spec.transport_name)
            .and_then(json_to_string)
            .map(AttrValue::String)
            .into(),
        SemanticType::Int64 => payload
            .attribute(spec.transport_name)
            .and_then(json_to_i64)
            .map(AttrValue::Int64)
            .into(),
        SemanticType::Bool => payload
            .attribute(spec.transport_name)
            .and_then(json_to_bool)
            .map(AttrValue::Bool)
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ConnectorKind, descriptor};
    use crate::model::TimeoutConfig;
    use serde_json::json;

    #[test]
    fn test_display_message_translates_success_only() {
        assert_eq!(display_message("success"), CONNECTION_SUCCESSFUL_MSG);
        assert_eq!(display_message("Success"), "Success");
        assert_eq!(display_message("Connection not found"), "Connection not found");
    }

    #[test]
    fn test_wire_value_renders_scalars_as_strings() {
        let workday = descriptor(ConnectorKind::Workday);
        let page_size = workday.attribute("page_size").unwrap();
        assert_eq!(wire_value(page_size, &AttrValue::Int64(50)).unwrap(), json!("50"));
        assert!(wire_value(page_size, &AttrValue::from("fifty")).is_err());

        let use_oauth = workday.attribute("use_oauth").unwrap();
        assert_eq!(wire_value(use_oauth, &AttrValue::Bool(true)).unwrap(), json!("true"));
    }

    #[test]
    fn test_wire_value_timeout_uses_wire_names() {
        let rest = descriptor(ConnectorKind::Rest);
        let spec = rest.attribute("connection_timeout_config").unwrap();
        let value = AttrValue::Timeout(TimeoutConfig {
            read_timeout: Some(60),
            ..Default::default()
        });
        assert_eq!(wire_value(spec, &value).unwrap(), json!({"readTimeout": 60}));
    }

    #[test]
    fn test_state_value_never_echoes_secrets() {
        let ad = descriptor(ConnectorKind::Ad);
        let mut payload = ConnectionPayload::default();
        payload
            .attributes
            .insert("PASSWORD".to_string(), json!("should-never-be-read-back"));
        payload.attributes.insert("URL".to_string(), json!("ldaps://dc"));

        let password = ad.attribute("password").unwrap();
        assert_eq!(state_value(password, &payload), Attr::Null);
        let url = ad.attribute("url").unwrap();
        assert_eq!(state_value(url, &payload), Attr::Value(AttrValue::from("ldaps://dc")));
        let base = ad.attribute("base").unwrap();
        assert_eq!(state_value(base, &payload), Attr::Null);
    }
}
