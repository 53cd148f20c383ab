//! Unix hosts over SSH.

use saviynt_client::{ConnectionDetails, ConnectionPayload};

use super::{AttributeSpec as A, ConnectorKind, Descriptor};

static ATTRIBUTES: &[A] = &[
    A::string("host_name", "HOST_NAME", "Host to connect to.").required(),
    A::string("port_number", "PORT_NUMBER", "SSH port.").required(),
    A::string("username", "USERNAME", "SSH user.").required(),
    A::string("password", "PASSWORD", "SSH password.").secret(),
    A::string("groups_file", "GROUPS_FILE", "Path of the groups file."),
    A::string("accounts_file", "ACCOUNTS_FILE", "Path of the accounts file."),
    A::string("shadow_file", "SHADOW_FILE", "Path of the shadow file."),
    A::string("passphrase", "PASSPHRASE", "Private key passphrase.").secret(),
    A::string("ssh_key", "SSH_KEY", "Private key.").secret(),
    A::string("provision_account_command", "PROVISION_ACCOUNT_COMMAND", "Create account."),
    A::string("deprovision_account_command", "DEPROVISION_ACCOUNT_COMMAND", "Delete account."),
    A::string("add_access_command", "ADD_ACCESS_COMMAND", "Grant access."),
    A::string("remove_access_command", "REMOVE_ACCESS_COMMAND", "Revoke access."),
    A::string("change_password_json", "CHANGE_PASSWRD_JSON", "Password change."),
    A::string("enable_account_command", "ENABLE_ACCOUNT_COMMAND", "Enable account."),
    A::string("disable_account_command", "DISABLE_ACCOUNT_COMMAND", "Disable account."),
    A::string("account_entitlement_mapping_command", "ACCOUNT_ENTITLEMENT_MAPPING_COMMAND", "Mapping."),
    A::string("passthrough_command", "PASSTHROUGH_COMMAND", "Pass-through command."),
    A::string("status_threshold_config", "STATUS_THRESHOLD_CONFIG", "Status thresholds."),
    A::string("custom_config_json", "CUSTOM_CONFIG_JSON", "Custom configuration."),
    A::string("pam_config", "PAM_CONFIG", "Privileged access settings."),
];

fn select(details: &ConnectionDetails) -> Option<&ConnectionPayload> {
    match details {
        ConnectionDetails::Unix(payload) => Some(payload),
        _ => None,
    }
}

pub(super) static DESCRIPTOR: Descriptor = Descriptor {
    kind: ConnectorKind::Unix,
    display_name: "Unix",
    type_name: "unix",
    transport_type_name: "Unix",
    id_prefix: "ds-unix",
    code_prefix: "UNIX",
    attributes: ATTRIBUTES,
    response_selector: select,
};
