//! Active Directory over LDAP(S).

use saviynt_client::{ConnectionDetails, ConnectionPayload};

use super::{AttributeSpec as A, ConnectorKind, Descriptor};

static ATTRIBUTES: &[A] = &[
    A::string("url", "URL", "LDAP(S) URL of the directory server.").required(),
    A::string("username", "USERNAME", "Bind DN used by the connector."),
    A::string("password", "PASSWORD", "Bind password.").secret(),
    A::string("ldap_or_ad", "LDAP_OR_AD", "Directory flavour: AD or LDAP.").computed(),
    A::string("base", "BASE", "Search base DN for account import."),
    A::string("searchfilter", "SEARCHFILTER", "LDAP filter for account import."),
    A::string("objectfilter", "OBJECTFILTER", "LDAP filter for user objects."),
    A::string("account_attribute", "ACCOUNT_ATTRIBUTE", "Account attribute mapping."),
    A::string(
        "entitlement_attribute",
        "ENTITLEMENT_ATTRIBUTE",
        "Attribute holding group membership.",
    ),
    A::string("group_search_base_dn", "GroupSearchBaseDN", "Search base DN for groups."),
    A::string("group_import_mapping", "GroupImportMapping", "Group import mapping."),
    A::string("checkforunique", "CHECKFORUNIQUE", "Uniqueness checks on create."),
    A::string("create_account_json", "CREATEACCOUNTJSON", "Create account mapping."),
    A::string("update_account_json", "UPDATEACCOUNTJSON", "Update account mapping."),
    A::string("enable_account_json", "ENABLEACCOUNTJSON", "Enable account mapping."),
    A::string("disable_account_json", "DISABLEACCOUNTJSON", "Disable account mapping."),
    A::string("remove_account_action", "REMOVEACCOUNTACTION", "Action on account removal."),
    A::string("status_key_json", "STATUSKEYJSON", "Account status mapping."),
    A::string("page_size", "PAGE_SIZE", "LDAP paged-search page size."),
    A::string("set_random_password", "SETRANDOMPASSWORD", "Generate a random password."),
    A::string("password_min_length", "PASSWORD_MIN_LENGTH", "Minimum generated length."),
    A::string("password_max_length", "PASSWORD_MAX_LENGTH", "Maximum generated length."),
    A::string(
        "reset_and_change_passwrd_json",
        "RESETANDCHANGEPASSWRDJSON",
        "Password reset mapping.",
    ),
    A::string("pam_config", "PAM_CONFIG", "Privileged access settings."),
    A::string("config_json", "ConfigJSON", "Connection-level configuration."),
    A::string("org_base", "ORG_BASE", "Search base DN for organizations."),
    A::string("max_changenumber", "MAX_CHANGENUMBER", "Incremental import watermark."),
];

fn select(details: &ConnectionDetails) -> Option<&ConnectionPayload> {
    match details {
        ConnectionDetails::Ad(payload) => Some(payload),
        _ => None,
    }
}

pub(super) static DESCRIPTOR: Descriptor = Descriptor {
    kind: ConnectorKind::Ad,
    display_name: "AD",
    type_name: "ad",
    transport_type_name: "AD",
    id_prefix: "ds-ad",
    code_prefix: "AD",
    attributes: ATTRIBUTES,
    response_selector: select,
};
