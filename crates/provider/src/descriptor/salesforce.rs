use saviynt_client::{ConnectionDetails, ConnectionPayload};

use super::{AttributeSpec as A, ConnectorKind, Descriptor, TIMEOUT_CONFIG};

static ATTRIBUTES: &[A] = &[
    A::string("client_id", "CLIENT_ID", "Connected app consumer key."),
    A::string("client_secret", "CLIENT_SECRET", "Connected app consumer secret.").secret(),
    A::string("refresh_token", "REFRESH_TOKEN", "OAuth refresh token.").secret(),
    A::string("redirect_uri", "REDIRECT_URI", "OAuth redirect URI."),
    A::string("instance_url", "INSTANCE_URL", "Salesforce instance URL."),
    A::string("object_to_be_imported", "OBJECT_TO_BE_IMPORTED", "Objects to import."),
    A::string("feature_license_json", "FEATURE_LICENSE_JSON", "Feature license mapping."),
    A::string("custom_createaccount_url", "CUSTOM_CREATEACCOUNT_URL", "Create account URL."),
    A::string("createaccountjson", "CREATEACCOUNTJSON", "Create account mapping."),
    A::string("account_filter_query", "ACCOUNT_FILTER_QUERY", "Account filter query."),
    A::string("account_field_query", "ACCOUNT_FIELD_QUERY", "Account fields fetched."),
    A::string("field_mapping_json", "FIELD_MAPPING_JSON", "Field mapping."),
    A::string("modifyaccountjson", "MODIFYACCOUNTJSON", "Modify account mapping."),
    A::string("status_threshold_config", "STATUS_THRESHOLD_CONFIG", "Status thresholds."),
    A::string("customconfigjson", "CUSTOMCONFIGJSON", "Custom configuration."),
    A::string("pam_config", "PAM_CONFIG", "Privileged access settings."),
    TIMEOUT_CONFIG,
];

fn select(details: &ConnectionDetails) -> Option<&ConnectionPayload> {
    match details {
        ConnectionDetails::Salesforce(payload) => Some(payload),
        _ => None,
    }
}

pub(super) static DESCRIPTOR: Descriptor = Descriptor {
    kind: ConnectorKind::Salesforce,
    display_name: "Salesforce",
    type_name: "salesforce",
    transport_type_name: "SalesForce",
    id_prefix: "ds-salesforce",
    code_prefix: "SALESFORCE",
    attributes: ATTRIBUTES,
    response_selector: select,
};
