//! SAP over JCo.

use saviynt_client::{ConnectionDetails, ConnectionPayload};

use super::{AttributeSpec as A, ConnectorKind, Descriptor};

static ATTRIBUTES: &[A] = &[
    A::string("message_server", "MESSAGESERVER", "Use a message server (load balancing)."),
    A::string("jco_ashost", "JCO_ASHOST", "Application server host."),
    A::string("jco_sysnr", "JCO_SYSNR", "System number."),
    A::string("jco_client", "JCO_CLIENT", "SAP client."),
    A::string("jco_user", "JCO_USER", "RFC user."),
    A::string("password", "PASSWORD", "RFC user password.").secret(),
    A::string("jco_lang", "JCO_LANG", "Logon language."),
    A::string("jco_r3name", "JCO_R3NAME", "System id for message-server logon."),
    A::string("jco_mshost", "JCO_MSHOST", "Message server host."),
    A::string("jco_msserv", "JCO_MSSERV", "Message server service."),
    A::string("jco_group", "JCO_GROUP", "Logon group."),
    A::string("snc_mode", "SNC_MODE", "Secure network communication mode."),
    A::string("snc_partnername", "SNC_PARTNERNAME", "SNC partner name."),
    A::string("snc_qop", "SNC_QOP", "SNC quality of protection."),
    A::string("snc_myname", "SNC_MYNAME", "SNC own name."),
    A::string("snc_lib", "SNC_LIB", "SNC library path."),
    A::string("tables", "TABLES", "Tables read on import."),
    A::string("system_name", "SYSTEMNAME", "Logical system name."),
    A::string("terminated_user_group", "TERMINATEDUSERGROUP", "Group for terminated users."),
    A::string("terminated_user_role_action", "TERMINATED_USER_ROLE_ACTION", "Role action."),
    A::string("create_account_json", "CREATEACCOUNTJSON", "Create account mapping."),
    A::string("update_account_json", "UPDATEACCOUNTJSON", "Update account mapping."),
    A::string("user_import_json", "USERIMPORTJSON", "User import mapping."),
    A::string("enforce_password_change", "ENFORCEPASSWORDCHANGE", "Force change on reset."),
    A::string("password_min_length", "PASSWORD_MIN_LENGTH", "Minimum generated length."),
    A::string("password_max_length", "PASSWORD_MAX_LENGTH", "Maximum generated length."),
    A::string("status_threshold_config", "STATUS_THRESHOLD_CONFIG", "Status thresholds."),
    A::string("config_json", "ConfigJSON", "Connection-level configuration."),
    A::string("pam_config", "PAM_CONFIG", "Privileged access settings."),
];

fn select(details: &ConnectionDetails) -> Option<&ConnectionPayload> {
    match details {
        ConnectionDetails::Sap(payload) => Some(payload),
        _ => None,
    }
}

pub(super) static DESCRIPTOR: Descriptor = Descriptor {
    kind: ConnectorKind::Sap,
    display_name: "SAP",
    type_name: "sap",
    transport_type_name: "SAP",
    id_prefix: "ds-sap",
    code_prefix: "SAP",
    attributes: ATTRIBUTES,
    response_selector: select,
};
