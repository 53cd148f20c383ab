//! Security-system models for the Saviynt v5 security-system endpoints.
//!
//! The create endpoint accepts a strict subset of the fields the update
//! endpoint accepts, so the two request bodies are distinct types.

use serde::{Deserialize, Serialize};

use crate::models::common::ApiStatus;
use crate::serde_helpers::{opt_i64_from_string_or_number, opt_string_from_any};

/// Body of `POST /createSecuritySystem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateSecuritySystemRequest {
    pub systemname: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectionname: Option<String>,
    #[serde(rename = "connectionType", skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    #[serde(rename = "accessAddWorkflow", skip_serializing_if = "Option::is_none")]
    pub access_add_workflow: Option<String>,
    #[serde(rename = "accessRemoveWorkflow", skip_serializing_if = "Option::is_none")]
    pub access_remove_workflow: Option<String>,
    #[serde(
        rename = "addServiceAccountWorkflow",
        skip_serializing_if = "Option::is_none"
    )]
    pub add_service_account_workflow: Option<String>,
    #[serde(
        rename = "removeServiceAccountWorkflow",
        skip_serializing_if = "Option::is_none"
    )]
    pub remove_service_account_workflow: Option<String>,
    #[serde(rename = "automatedProvisioning", skip_serializing_if = "Option::is_none")]
    pub automated_provisioning: Option<String>,
    #[serde(rename = "useopenconnector", skip_serializing_if = "Option::is_none")]
    pub use_open_connector: Option<String>,
    #[serde(rename = "reconApplication", skip_serializing_if = "Option::is_none")]
    pub reconciliation_field: Option<String>,
    #[serde(rename = "provisioningConnection", skip_serializing_if = "Option::is_none")]
    pub provisioning_connection: Option<String>,
    #[serde(rename = "serviceDeskConnection", skip_serializing_if = "Option::is_none")]
    pub service_desk_connection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of `POST /updateSecuritySystem`: the create subset plus the
/// workflow, policy and provisioning fields only this endpoint accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateSecuritySystemRequest {
    #[serde(flatten)]
    pub base: CreateSecuritySystemRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectionparameters: Option<String>,
    #[serde(rename = "instantprovision", skip_serializing_if = "Option::is_none")]
    pub instant_provision: Option<bool>,
    #[serde(rename = "provisioningTries", skip_serializing_if = "Option::is_none")]
    pub provisioning_tries: Option<String>,
    #[serde(rename = "provisioningcomments", skip_serializing_if = "Option::is_none")]
    pub provisioning_comments: Option<String>,
    #[serde(
        rename = "proposedAccountOwnersworkflow",
        skip_serializing_if = "Option::is_none"
    )]
    pub proposed_account_owners_workflow: Option<String>,
    #[serde(rename = "firefighterIDWorkflow", skip_serializing_if = "Option::is_none")]
    pub firefighterid_workflow: Option<String>,
    #[serde(
        rename = "firefighteridRequestAccessWorkflow",
        skip_serializing_if = "Option::is_none"
    )]
    pub firefighterid_request_access_workflow: Option<String>,
    #[serde(rename = "policyRule", skip_serializing_if = "Option::is_none")]
    pub policy_rule: Option<String>,
    #[serde(
        rename = "policyRuleServiceAccount",
        skip_serializing_if = "Option::is_none"
    )]
    pub policy_rule_service_account: Option<String>,
    #[serde(rename = "inherentSODReportFields", skip_serializing_if = "Option::is_none")]
    pub inherent_sod_report_fields: Option<Vec<String>>,
    #[serde(
        rename = "externalRiskConnectionJson",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_risk_connection_json: Option<String>,
    #[serde(rename = "manageEntity", skip_serializing_if = "Option::is_none")]
    pub manage_entity: Option<String>,
    #[serde(rename = "persistentData", skip_serializing_if = "Option::is_none")]
    pub persistent_data: Option<String>,
    #[serde(rename = "defaultSystem", skip_serializing_if = "Option::is_none")]
    pub default_system: Option<String>,
}

/// Response of the create and update endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySystemResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
}

/// One security system as returned by `GET /getSecuritySystems`.
///
/// Saviynt is inconsistent about key casing across versions; every field
/// accepts both the camel-case and the all-lowercase spelling.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SecuritySystemDetails {
    #[serde(default)]
    pub systemname: Option<String>,
    #[serde(rename = "displayName", alias = "displayname", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default, deserialize_with = "opt_string_from_any")]
    pub port: Option<String>,
    #[serde(default)]
    pub connectionname: Option<String>,
    #[serde(rename = "connectionType", alias = "connectiontype", default)]
    pub connection_type: Option<String>,
    #[serde(rename = "accessAddWorkflow", alias = "accessaddworkflow", default)]
    pub access_add_workflow: Option<String>,
    #[serde(rename = "accessRemoveWorkflow", alias = "accessremoveworkflow", default)]
    pub access_remove_workflow: Option<String>,
    #[serde(
        rename = "addServiceAccountWorkflow",
        alias = "addserviceaccountworkflow",
        default
    )]
    pub add_service_account_workflow: Option<String>,
    #[serde(
        rename = "removeServiceAccountWorkflow",
        alias = "removeserviceaccountworkflow",
        default
    )]
    pub remove_service_account_workflow: Option<String>,
    #[serde(
        rename = "automatedProvisioning",
        alias = "automatedprovisioning",
        default,
        deserialize_with = "opt_string_from_any"
    )]
    pub automated_provisioning: Option<String>,
    #[serde(
        rename = "useopenconnector",
        alias = "useOpenConnector",
        default,
        deserialize_with = "opt_string_from_any"
    )]
    pub use_open_connector: Option<String>,
    #[serde(rename = "reconApplication", alias = "reconapplication", default)]
    pub reconciliation_field: Option<String>,
    #[serde(
        rename = "provisioningConnection",
        alias = "provisioningconnection",
        default
    )]
    pub provisioning_connection: Option<String>,
    #[serde(rename = "serviceDeskConnection", alias = "servicedeskconnection", default)]
    pub service_desk_connection: Option<String>,
    #[serde(default, deserialize_with = "opt_string_from_any")]
    pub status: Option<String>,
    #[serde(default)]
    pub connectionparameters: Option<String>,
    #[serde(
        rename = "instantprovision",
        alias = "instantProvision",
        default,
        deserialize_with = "opt_string_from_any"
    )]
    pub instant_provision: Option<String>,
    #[serde(
        rename = "provisioningTries",
        alias = "provisioningtries",
        default,
        deserialize_with = "opt_string_from_any"
    )]
    pub provisioning_tries: Option<String>,
    #[serde(rename = "provisioningcomments", alias = "provisioningComments", default)]
    pub provisioning_comments: Option<String>,
    #[serde(
        rename = "proposedAccountOwnersworkflow",
        alias = "proposedaccountownersworkflow",
        default
    )]
    pub proposed_account_owners_workflow: Option<String>,
    #[serde(rename = "firefighterIDWorkflow", alias = "firefighteridworkflow", default)]
    pub firefighterid_workflow: Option<String>,
    #[serde(
        rename = "firefighteridRequestAccessWorkflow",
        alias = "firefighteridrequestaccessworkflow",
        default
    )]
    pub firefighterid_request_access_workflow: Option<String>,
    #[serde(rename = "policyRule", alias = "policyrule", default)]
    pub policy_rule: Option<String>,
    #[serde(
        rename = "policyRuleServiceAccount",
        alias = "policyruleserviceaccount",
        default
    )]
    pub policy_rule_service_account: Option<String>,
    #[serde(
        rename = "inherentSODReportFields",
        alias = "inherentsodreportfields",
        default
    )]
    pub inherent_sod_report_fields: Option<Vec<String>>,
    #[serde(
        rename = "externalRiskConnectionJson",
        alias = "externalriskconnectionjson",
        default
    )]
    pub external_risk_connection_json: Option<String>,
    #[serde(
        rename = "manageEntity",
        alias = "manageentity",
        default,
        deserialize_with = "opt_string_from_any"
    )]
    pub manage_entity: Option<String>,
    #[serde(
        rename = "persistentData",
        alias = "persistentdata",
        default,
        deserialize_with = "opt_string_from_any"
    )]
    pub persistent_data: Option<String>,
    #[serde(
        rename = "defaultSystem",
        alias = "defaultsystem",
        default,
        deserialize_with = "opt_string_from_any"
    )]
    pub default_system: Option<String>,
    #[serde(rename = "createdBy", alias = "createdby", default)]
    pub created_by: Option<String>,
    #[serde(rename = "createdOn", alias = "createdon", default)]
    pub created_on: Option<String>,
    #[serde(rename = "updatedBy", alias = "updatedby", default)]
    pub updated_by: Option<String>,
    #[serde(rename = "updatedOn", alias = "updatedon", default)]
    pub updated_on: Option<String>,
}

/// Filters for `GET /getSecuritySystems`.
#[derive(Debug, Clone, Default)]
pub struct ListSecuritySystemsParams {
    pub systemname: Option<String>,
    pub connection_name: Option<String>,
    pub connection_type: Option<String>,
    pub max: Option<u32>,
    pub offset: Option<u32>,
}

impl ListSecuritySystemsParams {
    /// Lookup of a single system by name.
    pub fn by_name(systemname: impl Into<String>) -> Self {
        Self {
            systemname: Some(systemname.into()),
            ..Default::default()
        }
    }

    /// Query-string pairs for the set filters.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(name) = &self.systemname {
            query.push(("systemname", name.clone()));
        }
        if let Some(conn) = &self.connection_name {
            query.push(("connectionname", conn.clone()));
        }
        if let Some(kind) = &self.connection_type {
            query.push(("connectiontype", kind.clone()));
        }
        if let Some(max) = self.max {
            query.push(("max", max.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        query
    }
}

/// Response of `GET /getSecuritySystems`.
#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySystemListResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(
        rename = "securitySystemDetails",
        alias = "securitysystemdetails",
        default
    )]
    pub security_systems: Vec<SecuritySystemDetails>,
    #[serde(
        rename = "displayCount",
        alias = "displaycount",
        default,
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub display_count: Option<i64>,
    #[serde(
        rename = "totalCount",
        alias = "totalcount",
        default,
        deserialize_with = "opt_i64_from_string_or_number"
    )]
    pub total_count: Option<i64>,
}
