//! REST connector: JSON-templated HTTP calls per provisioning action.

use saviynt_client::{ConnectionDetails, ConnectionPayload};

use super::{AttributeSpec as A, ConnectorKind, Descriptor, TIMEOUT_CONFIG};

static ATTRIBUTES: &[A] = &[
    A::string(
        "connection_json",
        "ConnectionJSON",
        "Authentication and base-URL settings, including credentials.",
    )
    .secret(),
    A::string("import_user_json", "ImportUserJSON", "User import call definition."),
    A::string(
        "import_account_ent_json",
        "ImportAccountEntJSON",
        "Account and entitlement import call definition.",
    ),
    A::string(
        "status_threshold_config",
        "STATUS_THRESHOLD_CONFIG",
        "Account status and threshold mapping.",
    ),
    A::string("create_account_json", "CreateAccountJSON", "Create account call."),
    A::string("update_account_json", "UpdateAccountJSON", "Update account call."),
    A::string("enable_account_json", "EnableAccountJSON", "Enable account call."),
    A::string("disable_account_json", "DisableAccountJSON", "Disable account call."),
    A::string("add_access_json", "AddAccessJSON", "Grant access call."),
    A::string("remove_access_json", "RemoveAccessJSON", "Revoke access call."),
    A::string("update_user_json", "UpdateUserJSON", "Update user call."),
    A::string("change_pass_json", "ChangePassJSON", "Password change call."),
    A::string("remove_account_json", "RemoveAccountJSON", "Delete account call."),
    A::string("ticket_status_json", "TicketStatusJSON", "Ticket status poll call."),
    A::string("create_ticket_json", "CreateTicketJSON", "Ticket creation call."),
    A::string("endpoints_filter", "ENDPOINTS_FILTER", "Endpoint filter for imports."),
    A::string("passwd_policy_json", "PasswdPolicyJSON", "Password policy."),
    A::string("config_json", "ConfigJSON", "Connection-level HTTP configuration."),
    A::string("add_ffid_access_json", "AddFFIDAccessJSON", "Grant firefighter access call."),
    A::string(
        "remove_ffid_access_json",
        "RemoveFFIDAccessJSON",
        "Revoke firefighter access call.",
    ),
    A::string("modify_user_data_json", "MODIFYUSERDATAJSON", "User data transformation."),
    A::string("send_otp_json", "SendOtpJSON", "One-time password delivery call."),
    A::string("validate_otp_json", "ValidateOtpJSON", "One-time password validation call."),
    A::string("pam_config", "PAM_CONFIG", "Privileged access settings."),
    A::string("pagination", "PAGINATION", "Pagination strategy for imports.").computed(),
    TIMEOUT_CONFIG,
];

fn select(details: &ConnectionDetails) -> Option<&ConnectionPayload> {
    match details {
        ConnectionDetails::Rest(payload) => Some(payload),
        _ => None,
    }
}

pub(super) static DESCRIPTOR: Descriptor = Descriptor {
    kind: ConnectorKind::Rest,
    display_name: "REST",
    type_name: "rest",
    transport_type_name: "REST",
    id_prefix: "ds-rest",
    code_prefix: "REST",
    attributes: ATTRIBUTES,
    response_selector: select,
};
