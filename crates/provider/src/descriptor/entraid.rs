use saviynt_client::{ConnectionDetails, ConnectionPayload};

use super::{AttributeSpec as A, ConnectorKind, Descriptor, TIMEOUT_CONFIG};

static ATTRIBUTES: &[A] = &[
    A::string("client_id", "CLIENT_ID", "Application (client) id.").required(),
    A::string("client_secret", "CLIENT_SECRET", "Application client secret.").secret(),
    A::string("access_token", "ACCESS_TOKEN", "Pre-issued access token.").secret(),
    A::string("aad_tenant_id", "AAD_TENANT_ID", "Directory (tenant) id.").required(),
    A::string("azure_mgmt_access_token", "AZURE_MGMT_ACCESS_TOKEN", "Management token.")
        .secret(),
    A::string("authentication_endpoint", "AUTHENTICATION_ENDPOINT", "Token endpoint."),
    A::string("microsoft_graph_endpoint", "MICROSOFT_GRAPH_ENDPOINT", "Graph endpoint."),
    A::string("azure_management_endpoint", "AZURE_MANAGEMENT_ENDPOINT", "ARM endpoint."),
    A::string("import_user_json", "ImportUserJSON", "User import definition."),
    A::string("create_users", "CREATEUSERS", "Whether to create users on import."),
    A::string("windows_connector_json", "WINDOWS_CONNECTOR_JSON", "Windows agent settings."),
    A::string("create_new_endpoints", "CREATE_NEW_ENDPOINTS", "Create endpoints on import."),
    A::string("managed_account_type", "MANAGED_ACCOUNT_TYPE", "Account types to manage."),
    A::string("account_attributes", "ACCOUNT_ATTRIBUTES", "Account attribute mapping."),
    A::string("account_import_fields", "ACCOUNT_IMPORT_FIELDS", "Fields fetched on import."),
    A::string("import_depth", "IMPORT_DEPTH", "Depth of group expansion."),
    A::string("entitlement_attribute", "ENTITLEMENT_ATTRIBUTE", "Entitlement attribute."),
    A::string("create_account_json", "CreateAccountJSON", "Create account call."),
    A::string("update_account_json", "UpdateAccountJSON", "Update account call."),
    A::string("enable_account_json", "EnableAccountJSON", "Enable account call."),
    A::string("disable_account_json", "DisableAccountJSON", "Disable account call."),
    A::string("add_access_json", "AddAccessJSON", "Grant access call."),
    A::string("remove_access_json", "RemoveAccessJSON", "Revoke access call."),
    A::string("update_user_json", "UpdateUserJSON", "Update user call."),
    A::string("change_pass_json", "ChangePassJSON", "Password change call."),
    A::string("remove_account_json", "RemoveAccountJSON", "Delete account call."),
    A::string("connection_json", "ConnectionJSON", "Connection settings.").secret(),
    A::string("create_group_json", "CreateGroupJSON", "Create group call."),
    A::string("update_group_json", "UpdateGroupJSON", "Update group call."),
    A::string("delete_group_json", "DeleteGroupJSON", "Delete group call."),
    A::string("entitlement_filter_json", "ENTITLEMENT_FILTER_JSON", "Entitlement filter."),
    A::string("status_threshold_config", "STATUS_THRESHOLD_CONFIG", "Status thresholds."),
    A::string("pam_config", "PAM_CONFIG", "Privileged access settings."),
    A::string("endpoints_filter", "ENDPOINTS_FILTER", "Endpoint filter for imports."),
    A::string("config_json", "ConfigJSON", "Connection-level configuration."),
    TIMEOUT_CONFIG,
];

fn select(details: &ConnectionDetails) -> Option<&ConnectionPayload> {
    match details {
        ConnectionDetails::EntraId(payload) => Some(payload),
        _ => None,
    }
}

pub(super) static DESCRIPTOR: Descriptor = Descriptor {
    kind: ConnectorKind::EntraId,
    display_name: "EntraID",
    type_name: "entraid",
    transport_type_name: "AzureAD",
    id_prefix: "ds-entraid",
    code_prefix: "ENTRAID",
    attributes: ATTRIBUTES,
    response_selector: select,
};
