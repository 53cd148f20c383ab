use saviynt_client::{ConnectionDetails, ConnectionPayload};

use super::{AttributeSpec as A, ConnectorKind, Descriptor, TIMEOUT_CONFIG};

static ATTRIBUTES: &[A] = &[
    A::string("import_url", "IMPORTURL", "Okta org URL.").required(),
    A::string("auth_token", "AUTHTOKEN", "API token.").secret(),
    A::string("account_field_mappings", "ACCOUNTFIELDMAPPINGS", "Account field mapping."),
    A::string("user_field_mappings", "USERFIELDMAPPINGS", "User field mapping."),
    A::string("entitlement_types_mappings", "ENTITLEMENTTYPESMAPPINGS", "Entitlement types."),
    A::string("import_inactive_apps", "IMPORT_INACTIVE_APPS", "Import inactive apps."),
    A::string("okta_application_securitysystem", "OKTA_APPLICATION_SECURITYSYSTEM", "App system."),
    A::string("okta_groups_filter", "OKTA_GROUPS_FILTER", "Group filter."),
    A::string("appaccountfieldmappings", "APPACCOUNTFIELDMAPPINGS", "App account mapping."),
    A::string("status_threshold_config", "STATUS_THRESHOLD_CONFIG", "Status thresholds."),
    A::string("activate_endpoint", "ACTIVATE_ENDPOINT", "Activate imported endpoints."),
    A::string("config_json", "ConfigJSON", "Connection-level configuration."),
    A::string("pam_config", "PAM_CONFIG", "Privileged access settings."),
    A::string("modifyuserdatajson", "MODIFYUSERDATAJSON", "User data transformation."),
    TIMEOUT_CONFIG,
];

fn select(details: &ConnectionDetails) -> Option<&ConnectionPayload> {
    match details {
        ConnectionDetails::Okta(payload) => Some(payload),
        _ => None,
    }
}

pub(super) static DESCRIPTOR: Descriptor = Descriptor {
    kind: ConnectorKind::Okta,
    display_name: "Okta",
    type_name: "okta",
    transport_type_name: "Okta",
    id_prefix: "ds-okta",
    code_prefix: "OKTA",
    attributes: ATTRIBUTES,
    response_selector: select,
};
