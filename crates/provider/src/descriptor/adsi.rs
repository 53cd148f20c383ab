//! Active Directory through the ADSI agent (multi-forest).

use saviynt_client::{ConnectionDetails, ConnectionPayload};

use super::{AttributeSpec as A, ConnectorKind, Descriptor};

static ATTRIBUTES: &[A] = &[
    A::string("url", "URL", "URL of the ADSI agent.").required(),
    A::string("username", "USERNAME", "Service account used by the agent.").required(),
    A::string("password", "PASSWORD", "Service account password.").secret(),
    A::string("forestlist", "FORESTLIST", "Forests managed by this connection.").required(),
    A::string("connection_url", "CONNECTION_URL", "Agent endpoint for provisioning."),
    A::string("default_user_role", "DEFAULT_USER_ROLE", "Role assigned to imported users."),
    A::string("updateuserjson", "UPDATEUSERJSON", "Update user mapping."),
    A::string("endpoints_filter", "ENDPOINTS_FILTER", "Endpoint filter for imports."),
    A::string("searchfilter", "SEARCHFILTER", "LDAP filter for account import."),
    A::string("objectfilter", "OBJECTFILTER", "LDAP filter for user objects."),
    A::string("account_attribute", "ACCOUNT_ATTRIBUTE", "Account attribute mapping."),
    A::string("status_threshold_config", "STATUS_THRESHOLD_CONFIG", "Status thresholds."),
    A::string("entitlement_attribute", "ENTITLEMENT_ATTRIBUTE", "Group membership attribute."),
    A::string("user_attribute", "USER_ATTRIBUTE", "User attribute mapping."),
    A::string("group_search_base_dn", "GroupSearchBaseDN", "Search base DN for groups."),
    A::string("createaccountjson", "CREATEACCOUNTJSON", "Create account mapping."),
    A::string("updateaccountjson", "UPDATEACCOUNTJSON", "Update account mapping."),
    A::string("enableaccountjson", "ENABLEACCOUNTJSON", "Enable account mapping."),
    A::string("disableaccountjson", "DISABLEACCOUNTJSON", "Disable account mapping."),
    A::string("removeaccountjson", "REMOVEACCOUNTJSON", "Delete account mapping."),
    A::string("addaccessjson", "ADDACCESSJSON", "Grant access mapping."),
    A::string("removeaccessjson", "REMOVEACCESSJSON", "Revoke access mapping."),
    A::string("resetandchangepasswrdjson", "RESETANDCHANGEPASSWRDJSON", "Password reset."),
    A::string("pagesize", "PAGE_SIZE", "Import page size."),
    A::string("pam_config", "PAM_CONFIG", "Privileged access settings."),
];

fn select(details: &ConnectionDetails) -> Option<&ConnectionPayload> {
    match details {
        ConnectionDetails::Adsi(payload) => Some(payload),
        _ => None,
    }
}

pub(super) static DESCRIPTOR: Descriptor = Descriptor {
    kind: ConnectorKind::Adsi,
    display_name: "ADSI",
    type_name: "adsi",
    transport_type_name: "ADSI",
    id_prefix: "ds-adsi",
    code_prefix: "ADSI",
    attributes: ATTRIBUTES,
    response_selector: select,
};
