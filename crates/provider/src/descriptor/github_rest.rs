use saviynt_client::{ConnectionDetails, ConnectionPayload};

use super::{AttributeSpec as A, ConnectorKind, Descriptor, TIMEOUT_CONFIG};

static ATTRIBUTES: &[A] = &[
    A::string(
        "connection_json",
        "ConnectionJSON",
        "GitHub API base URL and token settings.",
    )
    .secret(),
    A::string("import_account_ent_json", "ImportAccountEntJSON", "Account import calls."),
    A::string("access_tokens", "ACCESS_TOKENS", "Personal access tokens.").secret(),
    A::string("organization_list", "ORGANIZATION_LIST", "Organizations to manage."),
    A::string("status_threshold_config", "STATUS_THRESHOLD_CONFIG", "Status thresholds."),
    TIMEOUT_CONFIG,
];

fn select(details: &ConnectionDetails) -> Option<&ConnectionPayload> {
    match details {
        ConnectionDetails::GithubRest(payload) => Some(payload),
        _ => None,
    }
}

pub(super) static DESCRIPTOR: Descriptor = Descriptor {
    kind: ConnectorKind::GithubRest,
    display_name: "GitHubREST",
    type_name: "githubrest",
    transport_type_name: "GithubRest",
    id_prefix: "ds-githubrest",
    code_prefix: "GITHUBREST",
    attributes: ATTRIBUTES,
    response_selector: select,
};
