//! Relational database over JDBC.

use saviynt_client::{ConnectionDetails, ConnectionPayload};

use super::{AttributeSpec as A, ConnectorKind, Descriptor};

static ATTRIBUTES: &[A] = &[
    A::string("url", "URL", "JDBC URL of the database.").required(),
    A::string("username", "USERNAME", "Database user.").required(),
    A::string("password", "PASSWORD", "Database password.").secret(),
    A::string("driver_name", "DRIVERNAME", "JDBC driver class.").required(),
    A::string("connection_properties", "CONNECTIONPROPERTIES", "Extra JDBC properties."),
    A::string("password_min_length", "PASSWORD_MIN_LENGTH", "Minimum generated length."),
    A::string("password_max_length", "PASSWORD_MAX_LENGTH", "Maximum generated length."),
    A::string("password_no_of_caps_alpha", "PASSWORD_NOOFCAPSALPHA", "Uppercase count."),
    A::string("password_no_of_digits", "PASSWORD_NOOFDIGITS", "Digit count."),
    A::string("password_no_of_spl_chars", "PASSWORD_NOOFSPLCHARS", "Special character count."),
    A::string("create_account_json", "CREATEACCOUNTJSON", "Create account statements."),
    A::string("update_account_json", "UPDATEACCOUNTJSON", "Update account statements."),
    A::string("grant_access_json", "GRANTACCESSJSON", "Grant access statements."),
    A::string("revoke_access_json", "REVOKEACCESSJSON", "Revoke access statements."),
    A::string("change_pass_json", "CHANGEPASSJSON", "Password change statements."),
    A::string("delete_account_json", "DELETEACCOUNTJSON", "Delete account statements."),
    A::string("enable_account_json", "ENABLEACCOUNTJSON", "Enable account statements."),
    A::string("disable_account_json", "DISABLEACCOUNTJSON", "Disable account statements."),
    A::string("account_exists_json", "ACCOUNTEXISTSJSON", "Account existence check."),
    A::string("update_user_json", "UPDATEUSERJSON", "Update user statements."),
    A::string("accounts_import", "ACCOUNTSIMPORT", "Account import query."),
    A::string("entitlement_value_import", "ENTITLEMENTVALUEIMPORT", "Entitlement import."),
    A::string("role_owner_import", "ROLEOWNERIMPORT", "Role owner import."),
    A::string("roles_import", "ROLESIMPORT", "Role import query."),
    A::string("system_import", "SYSTEMIMPORT", "System import query."),
    A::string("user_import", "USERIMPORT", "User import query."),
    A::string("modify_user_data_json", "MODIFYUSERDATAJSON", "User data transformation."),
    A::int64("max_pagination_size", "MAX_PAGINATION_SIZE", "Rows fetched per import page."),
    A::string("cli_command_json", "CLI_COMMAND_JSON", "Command-line hooks."),
    A::string("status_threshold_config", "STATUS_THRESHOLD_CONFIG", "Status thresholds."),
];

fn select(details: &ConnectionDetails) -> Option<&ConnectionPayload> {
    match details {
        ConnectionDetails::Db(payload) => Some(payload),
        _ => None,
    }
}

pub(super) static DESCRIPTOR: Descriptor = Descriptor {
    kind: ConnectorKind::Db,
    display_name: "DB",
    type_name: "db",
    transport_type_name: "DB",
    id_prefix: "ds-db",
    code_prefix: "DB",
    attributes: ATTRIBUTES,
    response_selector: select,
};
