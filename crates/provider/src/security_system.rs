//! Security-system lifecycle.
//!
//! Responsibilities:
//! - Create in two phases: `createSecuritySystem` with the subset that
//!   endpoint accepts, then `updateSecuritySystem` with the full set.
//! - Read through `getSecuritySystems` filtered by `systemname`.
//! - Update, Import and Delete with the same rules as connectors.
//! - Gate version-dependent attributes on the configured Saviynt version.
//!
//! Does NOT handle:
//! - The security-systems listing data source (see `listing.rs`).
//!
//! Invariants:
//! - Probe, create and follow-up update run strictly in that order.
//! - A failure after the create phase succeeded, cancellation included, is
//!   reported as `PartialProvisioning`.
//! - `systemname` never changes after Create.

use saviynt_client::{
    CreateSecuritySystemRequest, ListSecuritySystemsParams, SecuritySystemDetails,
    SecuritySystemResponse, UpdateSecuritySystemRequest,
};
use tracing::{info, warn};

use crate::api::ApiHandle;
use crate::cancellation::CancellationToken;
use crate::context::{Operation, OperationContext, Scope};
use crate::diagnostics::{Diagnostic, Outcome};
use crate::errors::{ErrorCategory, ProviderError, Result};
use crate::retry::AuthRetryError;
use crate::value::{Attr, NullPolicy, string_from_wire, string_to_wire};

/// Prefix of security-system surface ids.
pub const ID_PREFIX: &str = "security-system";

/// Last Saviynt release that rejects `instant_provision`.
const INSTANT_PROVISION_MAX_UNSUPPORTED: (u32, u32) = (24, 3);

pub const SYSTEMNAME_IMMUTABLE_MSG: &str = "Security system name cannot be updated";

/// Plan or state of a security system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecuritySystemModel {
    /// `security-system-<systemname>`.
    pub id: Attr<String>,
    pub systemname: Attr<String>,
    pub display_name: Attr<String>,
    pub hostname: Attr<String>,
    pub port: Attr<String>,
    pub connectionname: Attr<String>,
    pub connection_type: Attr<String>,
    pub access_add_workflow: Attr<String>,
    pub access_remove_workflow: Attr<String>,
    pub add_service_account_workflow: Attr<String>,
    pub remove_service_account_workflow: Attr<String>,
    pub automated_provisioning: Attr<String>,
    pub use_open_connector: Attr<String>,
    pub reconciliation_field: Attr<String>,
    pub provisioning_connection: Attr<String>,
    pub service_desk_connection: Attr<String>,
    pub status: Attr<String>,
    // Accepted by the update endpoint only.
    pub connectionparameters: Attr<String>,
    pub instant_provision: Attr<bool>,
    pub provisioning_tries: Attr<String>,
    pub provisioning_comments: Attr<String>,
    pub proposed_account_owners_workflow: Attr<String>,
    pub firefighterid_workflow: Attr<String>,
    pub firefighterid_request_access_workflow: Attr<String>,
    pub policy_rule: Attr<String>,
    pub policy_rule_service_account: Attr<String>,
    pub inherent_sod_report_fields: Attr<Vec<String>>,
    pub external_risk_connection_json: Attr<String>,
    pub manage_entity: Attr<String>,
    pub persistent_data: Attr<String>,
    pub default_system: Attr<String>,
    pub msg: Attr<String>,
    pub error_code: Attr<String>,
}

impl SecuritySystemModel {
    pub fn new(systemname: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            systemname: Attr::Value(systemname.into()),
            display_name: Attr::Value(display_name.into()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.systemname.as_deref()
    }

    /// Identity-only state for a system the create phase produced but the
    /// update phase did not finish. Everything else is left to the next Read.
    pub fn identity(&self) -> Self {
        Self {
            id: Attr::Value(surface_id(self.name().unwrap_or_default())),
            systemname: self.systemname.clone(),
            display_name: self.display_name.clone(),
            ..Self::default()
        }
    }

    fn create_body(&self) -> CreateSecuritySystemRequest {
        let s = |attr: &Attr<String>| string_to_wire(attr, NullPolicy::Omit);
        CreateSecuritySystemRequest {
            systemname: self.systemname.as_deref().unwrap_or_default().to_string(),
            display_name: self.display_name.as_deref().unwrap_or_default().to_string(),
            hostname: s(&self.hostname),
            port: s(&self.port),
            connectionname: s(&self.connectionname),
            connection_type: s(&self.connection_type),
            access_add_workflow: s(&self.access_add_workflow),
            access_remove_workflow: s(&self.access_remove_workflow),
            add_service_account_workflow: s(&self.add_service_account_workflow),
            remove_service_account_workflow: s(&self.remove_service_account_workflow),
            automated_provisioning: s(&self.automated_provisioning),
            use_open_connector: s(&self.use_open_connector),
            reconciliation_field: s(&self.reconciliation_field),
            provisioning_connection: s(&self.provisioning_connection),
            service_desk_connection: s(&self.service_desk_connection),
            status: s(&self.status),
        }
    }

    fn update_body(&self) -> UpdateSecuritySystemRequest {
        let s = |attr: &Attr<String>| string_to_wire(attr, NullPolicy::Omit);
        UpdateSecuritySystemRequest {
            base: self.create_body(),
            connectionparameters: s(&self.connectionparameters),
            instant_provision: self.instant_provision.value().copied(),
            provisioning_tries: s(&self.provisioning_tries),
            provisioning_comments: s(&self.provisioning_comments),
            proposed_account_owners_workflow: s(&self.proposed_account_owners_workflow),
            firefighterid_workflow: s(&self.firefighterid_workflow),
            firefighterid_request_access_workflow: s(&self.firefighterid_request_access_workflow),
            policy_rule: s(&self.policy_rule),
            policy_rule_service_account: s(&self.policy_rule_service_account),
            inherent_sod_report_fields: self.inherent_sod_report_fields.value().cloned(),
            external_risk_connection_json: s(&self.external_risk_connection_json),
            manage_entity: s(&self.manage_entity),
            persistent_data: s(&self.persistent_data),
            default_system: s(&self.default_system),
        }
    }

    fn from_details(d: SecuritySystemDetails, msg: &str, error_code: i64) -> Self {
        let s = |v: Option<String>| string_from_wire(v.as_deref());
        let systemname = s(d.systemname);
        Self {
            id: systemname.clone().map(|n| surface_id(&n)),
            systemname,
            display_name: s(d.display_name),
            hostname: s(d.hostname),
            port: s(d.port),
            connectionname: s(d.connectionname),
            connection_type: s(d.connection_type),
            access_add_workflow: s(d.access_add_workflow),
            access_remove_workflow: s(d.access_remove_workflow),
            add_service_account_workflow: s(d.add_service_account_workflow),
            remove_service_account_workflow: s(d.remove_service_account_workflow),
            automated_provisioning: s(d.automated_provisioning),
            use_open_connector: s(d.use_open_connector),
            reconciliation_field: s(d.reconciliation_field),
            provisioning_connection: s(d.provisioning_connection),
            service_desk_connection: s(d.service_desk_connection),
            status: s(d.status),
            connectionparameters: s(d.connectionparameters),
            instant_provision: d
                .instant_provision
                .as_deref()
                .and_then(parse_bool)
                .into(),
            provisioning_tries: s(d.provisioning_tries),
            provisioning_comments: s(d.provisioning_comments),
            proposed_account_owners_workflow: s(d.proposed_account_owners_workflow),
            firefighterid_workflow: s(d.firefighterid_workflow),
            firefighterid_request_access_workflow: s(d.firefighterid_request_access_workflow),
            policy_rule: s(d.policy_rule),
            policy_rule_service_account: s(d.policy_rule_service_account),
            inherent_sod_report_fields: d.inherent_sod_report_fields.into(),
            external_risk_connection_json: s(d.external_risk_connection_json),
            manage_entity: s(d.manage_entity),
            persistent_data: s(d.persistent_data),
            default_system: s(d.default_system),
            msg: Attr::Value(msg.to_string()),
            error_code: Attr::Value(error_code.to_string()),
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// `security-system-<systemname>`.
pub fn surface_id(systemname: &str) -> String {
    format!("{}-{}", ID_PREFIX, systemname)
}

/// Whether the configured server version accepts a gated attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSupport {
    Supported,
    Unsupported,
    /// No version configured, or one that does not parse.
    Unknown,
}

/// `(major, minor)` from strings like `24.4`, `v25.1.0` or `25.1-SP1`.
fn parse_version(version: &str) -> Option<(u32, u32)> {
    let version = version.trim().trim_start_matches(['v', 'V']);
    let mut parts = version.split(|c: char| !c.is_ascii_digit());
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().and_then(|m| m.parse().ok()).unwrap_or(0);
    Some((major, minor))
}

pub fn instant_provision_support(version: Option<&str>) -> VersionSupport {
    match version.and_then(parse_version) {
        None => VersionSupport::Unknown,
        Some(v) if v > INSTANT_PROVISION_MAX_UNSUPPORTED => VersionSupport::Supported,
        Some(_) => VersionSupport::Unsupported,
    }
}

/// `saviynt_security_system_resource`.
#[derive(Debug, Clone)]
pub struct SecuritySystemResource {
    api: ApiHandle,
}

impl SecuritySystemResource {
    pub fn new(api: ApiHandle) -> Self {
        Self { api }
    }

    fn context(&self, operation: Operation, name: &str) -> OperationContext {
        OperationContext::begin(Scope::security_system(), operation, name)
    }

    pub async fn create(
        &self,
        plan: SecuritySystemModel,
        cancel: &CancellationToken,
    ) -> Result<Outcome<SecuritySystemModel>> {
        let name = plan.name().unwrap_or_default().to_string();
        let ctx = self.context(Operation::Create, &name);
        if name.is_empty() || !plan.display_name.is_set() {
            return Err(ctx.error(
                ErrorCategory::PlanExtraction,
                "systemname and display_name are required",
            ));
        }
        let warnings = self.check_version(&ctx, &plan)?;

        if let Lookup::Found(..) = self.lookup(&ctx, &name, cancel).await? {
            return Err(ctx.error(
                ErrorCategory::DuplicateName,
                format!(
                    "a security system named '{}' already exists; import it instead of creating it",
                    name
                ),
            ));
        }

        if cancel.is_cancelled() {
            return Err(ctx.retry_error(ErrorCategory::CreateFailed, AuthRetryError::Cancelled));
        }
        let create_body = plan.create_body();
        let create_body = &create_body;
        let client = &self.api.client;
        // Once dispatched the create runs to completion; a host cancel is
        // observed afterwards and reported as partial provisioning.
        let created = self
            .api
            .call(&CancellationToken::new(), move |token| async move {
                client.create_security_system(&token, create_body).await
            })
            .await
            .map_err(|e| ctx.retry_error(ErrorCategory::CreateFailed, e))?;
        if !created.status.is_success() {
            return Err(ctx.error(
                ErrorCategory::CreateFailed,
                format!(
                    "server rejected the security system (errorCode {}): {}",
                    created.status.error_code, created.status.msg
                ),
            ));
        }
        info!("security system created; applying full attribute set");

        if cancel.is_cancelled() {
            return Err(self.partial(&ctx, &name, "the operation was cancelled"));
        }
        match self.send_update(&plan, cancel).await {
            Ok(resp) if resp.status.is_success() => {}
            Ok(resp) => {
                let reason = format!(
                    "update rejected (errorCode {}): {}",
                    resp.status.error_code, resp.status.msg
                );
                return Err(self.partial(&ctx, &name, &reason));
            }
            Err(AuthRetryError::Cancelled) => {
                return Err(self.partial(&ctx, &name, "the operation was cancelled"));
            }
            Err(e) => return Err(self.partial(&ctx, &name, &e.to_string())),
        }

        let state = self
            .fetch(&ctx, &name, cancel, ErrorCategory::StateUpdate)
            .await?;
        ctx.finish();
        Ok(Outcome::with_warnings(state, warnings))
    }

    pub async fn read(
        &self,
        state: &SecuritySystemModel,
        cancel: &CancellationToken,
    ) -> Result<Outcome<SecuritySystemModel>> {
        let name = state.name().unwrap_or_default().to_string();
        let ctx = self.context(Operation::Read, &name);
        if name.is_empty() {
            return Err(ctx.error(
                ErrorCategory::StateExtraction,
                "systemname is missing from state",
            ));
        }
        let fresh = self
            .fetch(&ctx, &name, cancel, ErrorCategory::ReadFailed)
            .await?;
        ctx.finish();
        Ok(Outcome::new(fresh))
    }

    pub async fn update(
        &self,
        state: &SecuritySystemModel,
        plan: SecuritySystemModel,
        cancel: &CancellationToken,
    ) -> Result<Outcome<SecuritySystemModel>> {
        let name = state.name().unwrap_or_default().to_string();
        let ctx = self.context(Operation::Update, &name);
        if name.is_empty() {
            return Err(ctx.error(
                ErrorCategory::StateExtraction,
                "systemname is missing from state",
            ));
        }
        let mut plan = plan;
        match plan.name().map(str::to_string) {
            Some(planned) if planned != name => {
                return Err(ctx.error(ErrorCategory::NameImmutable, SYSTEMNAME_IMMUTABLE_MSG));
            }
            Some(_) => {}
            None => plan.systemname = Attr::Value(name.clone()),
        }
        if !plan.display_name.is_set() {
            plan.display_name = state.display_name.clone();
        }
        let warnings = self.check_version(&ctx, &plan)?;

        let resp = self
            .send_update(&plan, cancel)
            .await
            .map_err(|e| ctx.retry_error(ErrorCategory::UpdateFailed, e))?;
        if !resp.status.is_success() {
            return Err(ctx.error(
                ErrorCategory::UpdateFailed,
                format!(
                    "server rejected the update (errorCode {}): {}",
                    resp.status.error_code, resp.status.msg
                ),
            ));
        }

        let fresh = self
            .fetch(&ctx, &name, cancel, ErrorCategory::StateUpdate)
            .await?;
        ctx.finish();
        Ok(Outcome::with_warnings(fresh, warnings))
    }

    pub async fn import(
        &self,
        systemname: &str,
        cancel: &CancellationToken,
    ) -> Result<Outcome<SecuritySystemModel>> {
        let name = systemname.trim();
        let ctx = self.context(Operation::Import, name);
        if name.is_empty() {
            return Err(ctx.error(
                ErrorCategory::MissingIdentifier,
                "import requires the systemname",
            ));
        }
        let state = self
            .fetch(&ctx, name, cancel, ErrorCategory::ReadFailed)
            .await?;
        ctx.finish();
        Ok(Outcome::new(state))
    }

    /// Refused unless the host runs acceptance tests.
    pub fn delete(&self, state: &SecuritySystemModel) -> Result<Outcome<()>> {
        let ctx = self.context(Operation::Delete, state.name().unwrap_or_default());
        if saviynt_config::is_acceptance_test() {
            info!("acceptance test mode: dropping local state only");
            ctx.finish();
            return Ok(Outcome::new(()));
        }
        Err(ctx.error(
            ErrorCategory::DeleteRefused,
            "deleting a security system is not supported by the Saviynt API; \
             remove it from the Saviynt console and then from state",
        ))
    }

    fn check_version(
        &self,
        ctx: &OperationContext,
        plan: &SecuritySystemModel,
    ) -> Result<Vec<Diagnostic>> {
        if !plan.instant_provision.is_set() {
            return Ok(Vec::new());
        }
        let version = self.api.saviynt_version.as_deref();
        match instant_provision_support(version) {
            VersionSupport::Supported => Ok(Vec::new()),
            VersionSupport::Unsupported => Err(ctx.error(
                ErrorCategory::UnsupportedVersion,
                format!(
                    "instant_provision requires Saviynt newer than {}.{}; configured version is {}",
                    INSTANT_PROVISION_MAX_UNSUPPORTED.0,
                    INSTANT_PROVISION_MAX_UNSUPPORTED.1,
                    version.unwrap_or_default()
                ),
            )),
            VersionSupport::Unknown => {
                warn!("Saviynt version unknown; sending instant_provision unchecked");
                Ok(vec![Diagnostic::warning(
                    "Saviynt version unknown",
                    "instant_provision is only accepted by Saviynt releases newer than 24.3. \
                     Set saviynt_version in the provider block to validate it before apply.",
                )])
            }
        }
    }

    fn partial(&self, ctx: &OperationContext, name: &str, reason: &str) -> ProviderError {
        ctx.error(
            ErrorCategory::PartialProvisioning,
            format!(
                "security system '{}' was created but applying the remaining attributes failed: {}. \
                 The next apply will complete it",
                name, reason
            ),
        )
    }

    async fn send_update(
        &self,
        plan: &SecuritySystemModel,
        cancel: &CancellationToken,
    ) -> std::result::Result<SecuritySystemResponse, AuthRetryError> {
        let body = plan.update_body();
        let body = &body;
        let client = &self.api.client;
        self.api
            .call(cancel, move |token| async move {
                client.update_security_system(&token, body).await
            })
            .await
    }

    /// Exact-name lookup.
    async fn lookup(
        &self,
        ctx: &OperationContext,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Lookup> {
        let params = ListSecuritySystemsParams::by_name(name);
        let params = &params;
        let client = &self.api.client;
        let response = self
            .api
            .call(cancel, move |token| async move {
                client.list_security_systems(&token, params).await
            })
            .await;
        let response = match response {
            Ok(r) => r,
            Err(AuthRetryError::Cancelled) => {
                return Err(ctx.retry_error(ErrorCategory::ReadFailed, AuthRetryError::Cancelled));
            }
            Err(e) if ctx.operation() == Operation::Create => {
                tracing::debug!(error = %e, "existence probe failed; treating as absent");
                return Ok(Lookup::Absent);
            }
            Err(e) => return Err(ctx.retry_error(ErrorCategory::ReadFailed, e)),
        };
        let msg = response.status.msg.clone();
        let code = response.status.error_code;
        if !response.status.is_success() {
            tracing::debug!(error_code = code, msg = %ctx.sanitize(&msg), "lookup rejected by server");
            return Ok(Lookup::Rejected { code, msg });
        }
        Ok(response
            .security_systems
            .into_iter()
            .find(|s| s.systemname.as_deref() == Some(name))
            .map_or(Lookup::Absent, |s| Lookup::Found(s, msg, code)))
    }

    async fn fetch(
        &self,
        ctx: &OperationContext,
        name: &str,
        cancel: &CancellationToken,
        category: ErrorCategory,
    ) -> Result<SecuritySystemModel> {
        match self.lookup(ctx, name, cancel).await? {
            Lookup::Found(details, msg, code) => Ok(SecuritySystemModel::from_details(
                details,
                &ctx.sanitize(&msg),
                code,
            )),
            Lookup::Absent => Err(ctx.error(
                category,
                format!("security system '{}' was not found", name),
            )),
            Lookup::Rejected { code, msg } => Err(ctx.error(
                category,
                format!(
                    "looking up security system '{}' failed (errorCode {}): {}",
                    name, code, msg
                ),
            )),
        }
    }
}

/// Result of an exact-name lookup.
enum Lookup {
    Found(SecuritySystemDetails, String, i64),
    Absent,
    /// The server answered with a non-zero `errorCode`.
    Rejected { code: i64, msg: String },
}
