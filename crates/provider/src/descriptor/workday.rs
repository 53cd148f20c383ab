use saviynt_client::{ConnectionDetails, ConnectionPayload};

use super::{AttributeSpec as A, ConnectorKind, Descriptor, TIMEOUT_CONFIG};

static ATTRIBUTES: &[A] = &[
    A::string("base_url", "BASE_URL", "Workday tenant base URL."),
    A::string("api_version", "API_VERSION", "Workday web services version."),
    A::string("tenant_name", "TENANT_NAME", "Workday tenant name."),
    A::string("username", "USERNAME", "Integration system user."),
    A::string("password", "PASSWORD", "Integration system user password.").secret(),
    A::bool("use_oauth", "USE_OAUTH", "Authenticate with OAuth instead of basic auth."),
    A::string("client_id", "CLIENT_ID", "OAuth client id."),
    A::string("client_secret", "CLIENT_SECRET", "OAuth client secret.").secret(),
    A::string("refresh_token", "REFRESH_TOKEN", "OAuth refresh token.").secret(),
    A::int64("page_size", "PAGE_SIZE", "Records fetched per import page."),
    A::string("user_import_payload", "USER_IMPORT_PAYLOAD", "User import request."),
    A::string("user_import_mapping", "USER_IMPORT_MAPPING", "User import mapping."),
    A::string("account_import_payload", "ACCOUNT_IMPORT_PAYLOAD", "Account import request."),
    A::string("account_import_mapping", "ACCOUNT_IMPORT_MAPPING", "Account import mapping."),
    A::string("access_import_list", "ACCESS_IMPORT_LIST", "Access types to import."),
    A::string("raas_mapping_json", "RAAS_MAPPING_JSON", "Report-as-a-service mapping."),
    A::string("include_reference_descriptors", "INCLUDE_REFERENCE_DESCRIPTORS", "Descriptors."),
    A::string("use_enhanced_orgrole", "USE_ENHANCED_ORGROLE", "Enhanced org roles."),
    A::string("orgrole_import_payload", "ORGROLE_IMPORT_PAYLOAD", "Org role import request."),
    A::string("status_key_json", "STATUS_KEY_JSON", "Account status mapping."),
    A::string("create_account_payload", "CREATE_ACCOUNT_PAYLOAD", "Create account request."),
    A::string("update_account_payload", "UPDATE_ACCOUNT_PAYLOAD", "Update account request."),
    A::string("update_user_payload", "UPDATE_USER_PAYLOAD", "Update user request."),
    A::string("assign_orgrole_payload", "ASSIGN_ORGROLE_PAYLOAD", "Assign org role request."),
    A::string("remove_orgrole_payload", "REMOVE_ORGROLE_PAYLOAD", "Remove org role request."),
    A::string("pam_config", "PAM_CONFIG", "Privileged access settings."),
    A::string("modify_user_data_json", "MODIFYUSERDATAJSON", "User data transformation."),
    TIMEOUT_CONFIG,
];

fn select(details: &ConnectionDetails) -> Option<&ConnectionPayload> {
    match details {
        ConnectionDetails::Workday(payload) => Some(payload),
        _ => None,
    }
}

pub(super) static DESCRIPTOR: Descriptor = Descriptor {
    kind: ConnectorKind::Workday,
    display_name: "Workday",
    type_name: "workday",
    transport_type_name: "Workday",
    id_prefix: "ds-workday",
    code_prefix: "WORKDAY",
    attributes: ATTRIBUTES,
    response_selector: select,
};
