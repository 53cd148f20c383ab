//! Host-facing schemas rendered from the descriptor table.
//!
//! Responsibilities:
//! - One resource schema and one data-source schema per connector kind.
//! - Schemas for the security-system resource, the listing data sources
//!   and the provider block.
//!
//! Invariants:
//! - Secret attributes are `sensitive` and `write_only`, never `computed`.
//! - Every attribute is exactly one of required, optional or computed-only.

use crate::descriptor::{AttributeSpec, Descriptor, SemanticType};

/// Value shape of a schema attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    String,
    Int64,
    Bool,
    StringList,
    Object(Vec<SchemaAttribute>),
    ListOfObjects(Vec<SchemaAttribute>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaAttribute {
    pub name: String,
    pub schema_type: SchemaType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub write_only: bool,
}

impl SchemaAttribute {
    fn new(name: &str, schema_type: SchemaType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            schema_type,
            description: description.to_string(),
            required: false,
            optional: true,
            computed: false,
            sensitive: false,
            write_only: false,
        }
    }

    fn string(name: &str, description: &str) -> Self {
        Self::new(name, SchemaType::String, description)
    }

    fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    /// Server-set only.
    fn computed(mut self) -> Self {
        self.computed = true;
        self.optional = false;
        self.required = false;
        self
    }

    /// User-settable with a server default.
    fn optional_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self.write_only = true;
        self.computed = false;
        self
    }

    fn from_spec(spec: &AttributeSpec) -> Self {
        let schema_type = match spec.semantic_type {
            SemanticType::String => SchemaType::String,
            SemanticType::Int64 => SchemaType::Int64,
            SemanticType::Bool => SchemaType::Bool,
            SemanticType::TimeoutConfig => SchemaType::Object(timeout_config_attributes()),
        };
        let mut attr = Self::new(spec.logical_name, schema_type, spec.description);
        if spec.required {
            attr = attr.required();
        }
        if spec.secret {
            attr = attr.sensitive();
        } else if spec.computed {
            attr = attr.optional_computed();
        }
        attr
    }
}

/// Schema of one resource, data source or the provider block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub type_name: String,
    pub description: String,
    pub attributes: Vec<SchemaAttribute>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&SchemaAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

fn timeout_config_attributes() -> Vec<SchemaAttribute> {
    [
        ("retry_wait", "Seconds between retries."),
        ("max_retries", "Maximum number of retries."),
        ("retry_wait_max_value", "Upper bound of the retry wait."),
        ("retry_count", "Retry attempts per call."),
        ("read_timeout", "Read timeout in seconds."),
        ("connection_timeout", "Connect timeout in seconds."),
        ("retry_failure_status_code", "HTTP status that triggers a retry."),
    ]
    .into_iter()
    .map(|(name, description)| SchemaAttribute::new(name, SchemaType::Int64, description))
    .collect()
}

fn common_connector_attributes(descriptor: &Descriptor) -> Vec<SchemaAttribute> {
    vec![
        SchemaAttribute::string("id", "Surface identifier, <prefix>-<connection_key>.").computed(),
        SchemaAttribute::new(
            "connection_key",
            SchemaType::Int64,
            "Key the server assigned to the connection.",
        )
        .computed(),
        SchemaAttribute::string("connection_name", "Name of the connection. Cannot be changed.")
            .required(),
        SchemaAttribute::string(
            "connection_type",
            &format!("Connection type, always {}.", descriptor.transport_type_name),
        )
        .optional_computed(),
        SchemaAttribute::string("description", "Description of the connection."),
        SchemaAttribute::string("defaultsavroles", "Default SAV roles for the connection."),
        SchemaAttribute::string("email_template", "Email template for notifications."),
        SchemaAttribute::string("vault_connection", "Vault connection holding the secrets."),
        SchemaAttribute::string("vault_configuration", "Vault configuration JSON."),
        SchemaAttribute::string(
            "save_in_vault",
            "Whether encrypted attributes are stored in the vault.",
        ),
        SchemaAttribute::string("msg", "Message returned by the last API call.").computed(),
        SchemaAttribute::string("error_code", "Error code returned by the last API call.")
            .computed(),
    ]
}

/// Resource schema for one connector kind.
pub fn connector_resource_schema(descriptor: &Descriptor) -> Schema {
    let mut attributes = common_connector_attributes(descriptor);
    attributes.extend(descriptor.attributes.iter().map(SchemaAttribute::from_spec));
    Schema {
        type_name: descriptor.resource_type_name(),
        description: format!("Manages a Saviynt {} connection.", descriptor.display_name),
        attributes,
    }
}

fn read_metadata_attributes() -> Vec<SchemaAttribute> {
    ["msg", "error_code"]
        .into_iter()
        .map(|name| SchemaAttribute::string(name, "Result of the API call.").computed())
        .collect()
}

fn authenticate_attribute() -> SchemaAttribute {
    SchemaAttribute::new(
        "authenticate",
        SchemaType::Bool,
        "Include sensitive listing content in state. When false it is omitted.",
    )
    .required()
}

/// Single-connector data source schema for one kind.
pub fn connector_data_source_schema(descriptor: &Descriptor) -> Schema {
    let nested: Vec<SchemaAttribute> = descriptor
        .attributes
        .iter()
        .filter(|spec| !spec.secret)
        .map(|spec| SchemaAttribute::from_spec(spec).computed())
        .collect();
    let mut attributes = vec![
        SchemaAttribute::string("id", "Surface identifier.").computed(),
        SchemaAttribute::string("connection_name", "Name of the connection to read.")
            .optional_computed(),
        SchemaAttribute::new(
            "connection_key",
            SchemaType::Int64,
            "Key of the connection to read.",
        )
        .optional_computed(),
        authenticate_attribute(),
    ];
    for name in [
        "connection_type",
        "description",
        "defaultsavroles",
        "email_template",
        "created_by",
        "created_on",
        "updated_by",
        "updated_on",
        "status",
    ] {
        attributes.push(SchemaAttribute::string(name, "Connection metadata.").computed());
    }
    attributes.push(
        SchemaAttribute::new(
            "connection_attributes",
            SchemaType::Object(nested),
            "Kind-specific attributes. Secrets are never included.",
        )
        .computed(),
    );
    attributes.extend(read_metadata_attributes());
    Schema {
        type_name: descriptor.data_source_type_name(),
        description: format!("Reads one Saviynt {} connection.", descriptor.display_name),
        attributes,
    }
}

const SECURITY_SYSTEM_CREATE_FIELDS: &[&str] = &[
    "hostname",
    "port",
    "connectionname",
    "connection_type",
    "access_add_workflow",
    "access_remove_workflow",
    "add_service_account_workflow",
    "remove_service_account_workflow",
    "automated_provisioning",
    "use_open_connector",
    "reconciliation_field",
    "provisioning_connection",
    "service_desk_connection",
    "status",
];

const SECURITY_SYSTEM_UPDATE_FIELDS: &[&str] = &[
    "connectionparameters",
    "provisioning_tries",
    "provisioning_comments",
    "proposed_account_owners_workflow",
    "firefighterid_workflow",
    "firefighterid_request_access_workflow",
    "policy_rule",
    "policy_rule_service_account",
    "external_risk_connection_json",
    "manage_entity",
    "persistent_data",
    "default_system",
];

pub fn security_system_resource_schema() -> Schema {
    let mut attributes = vec![
        SchemaAttribute::string("id", "Surface identifier, security-system-<systemname>.")
            .computed(),
        SchemaAttribute::string("systemname", "Name of the security system. Cannot be changed.")
            .required(),
        SchemaAttribute::string("display_name", "Display name of the security system.").required(),
    ];
    attributes.extend(
        SECURITY_SYSTEM_CREATE_FIELDS
            .iter()
            .chain(SECURITY_SYSTEM_UPDATE_FIELDS)
            .map(|name| SchemaAttribute::string(name, "Security system setting.").optional_computed()),
    );
    attributes.push(
        SchemaAttribute::new(
            "instant_provision",
            SchemaType::Bool,
            "Provision immediately. Requires Saviynt newer than 24.3.",
        )
        .optional_computed(),
    );
    attributes.push(
        SchemaAttribute::new(
            "inherent_sod_report_fields",
            SchemaType::StringList,
            "Fields included in the inherent SOD report.",
        )
        .optional_computed(),
    );
    attributes.extend(read_metadata_attributes());
    Schema {
        type_name: "saviynt_security_system_resource".to_string(),
        description: "Manages a Saviynt security system.".to_string(),
        attributes,
    }
}

fn listing_schema(
    type_name: &str,
    description: &str,
    filters: Vec<SchemaAttribute>,
    item: Vec<SchemaAttribute>,
) -> Schema {
    let mut attributes = filters;
    attributes.push(SchemaAttribute::new("max", SchemaType::Int64, "Page size."));
    attributes.push(SchemaAttribute::new("offset", SchemaType::Int64, "Page offset."));
    attributes.push(authenticate_attribute());
    attributes.push(
        SchemaAttribute::new("results", SchemaType::ListOfObjects(item), "Matching records.")
            .computed(),
    );
    for name in ["display_count", "total_count"] {
        attributes.push(SchemaAttribute::new(name, SchemaType::Int64, "Record count.").computed());
    }
    attributes.extend(read_metadata_attributes());
    Schema {
        type_name: type_name.to_string(),
        description: description.to_string(),
        attributes,
    }
}

pub fn connections_data_source_schema() -> Schema {
    let item = [
        "connection_name",
        "connection_type",
        "description",
        "status",
        "defaultsavroles",
        "email_template",
        "created_by",
        "created_on",
        "updated_by",
        "updated_on",
    ]
    .into_iter()
    .map(|name| SchemaAttribute::string(name, "Connection field.").computed())
    .chain(std::iter::once(
        SchemaAttribute::new("connection_key", SchemaType::Int64, "Connection key.").computed(),
    ))
    .collect();
    listing_schema(
        "saviynt_connections_datasource",
        "Lists Saviynt connections.",
        vec![
            SchemaAttribute::string("connection_name", "Filter by connection name."),
            SchemaAttribute::string("connection_type", "Filter by connection type."),
        ],
        item,
    )
}

pub fn security_systems_data_source_schema() -> Schema {
    let item = ["systemname", "display_name"]
        .iter()
        .chain(SECURITY_SYSTEM_CREATE_FIELDS)
        .chain(SECURITY_SYSTEM_UPDATE_FIELDS)
        .chain(&["instant_provision", "created_by", "created_on", "updated_by", "updated_on"])
        .map(|name| SchemaAttribute::string(name, "Security system field.").computed())
        .collect();
    listing_schema(
        "saviynt_security_systems_datasource",
        "Lists Saviynt security systems.",
        vec![
            SchemaAttribute::string("systemname", "Filter by system name."),
            SchemaAttribute::string("connection_name", "Filter by connection name."),
            SchemaAttribute::string("connection_type", "Filter by connection type."),
        ],
        item,
    )
}

/// Schema of the provider block.
pub fn provider_schema() -> Schema {
    Schema {
        type_name: "saviynt".to_string(),
        description: "Saviynt Security Manager provider.".to_string(),
        attributes: vec![
            SchemaAttribute::string("server_url", "Tenant URL. Falls back to SAVIYNT_URL."),
            SchemaAttribute::string("username", "Login user. Falls back to SAVIYNT_USERNAME."),
            SchemaAttribute::string("password", "Login password. Falls back to SAVIYNT_PASSWORD.")
                .sensitive(),
            SchemaAttribute::string(
                "saviynt_version",
                "Server release, e.g. 25.1. Gates version-dependent attributes.",
            ),
            SchemaAttribute::new("timeout", SchemaType::Int64, "Request timeout in seconds."),
            SchemaAttribute::new("skip_verify", SchemaType::Bool, "Skip TLS verification."),
        ],
    }
}
