//! # OpenAPI Document Assembly
//!
//! Groups endpoints by path template and method, then merges them with the
//! static document-level fields supplied by [`DocumentConfig`]: metadata,
//! servers, the bearer security scheme and the shared error components.
//!
//! A repeated `(path, method)` pair replaces the earlier operation
//! (last write wins, no merge).

use crate::collection::CollectionInfo;
use crate::oas::models::{Endpoint, Operation, Parameter, RequestBody, ResponseEntry, Tag};
use crate::oas::naming::find_duplicate_operation_ids;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// Contact metadata for the `info` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Contact name.
    pub name: Option<String>,
    /// Contact URL.
    pub url: Option<String>,
    /// Contact email.
    pub email: Option<String>,
}

/// A `servers` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server URL.
    pub url: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ServerConfig {
    /// Creates a server entry.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    /// Sets the server description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Static document-level fields, passed explicitly into the conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentConfig {
    /// OpenAPI version string.
    pub openapi: String,
    /// Title used when the collection has no name.
    pub title: String,
    /// API version.
    pub version: String,
    /// Optional contact block.
    pub contact: Option<ContactConfig>,
    /// Servers, in order.
    pub servers: Vec<ServerConfig>,
    /// Name of the bearer security scheme.
    pub security_scheme_name: String,
    /// `bearerFormat` of the security scheme.
    pub bearer_format: String,
    /// Description of the security scheme.
    pub security_description: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            openapi: "3.0.3".to_string(),
            title: "API".to_string(),
            version: "1.0.0".to_string(),
            contact: None,
            servers: Vec::new(),
            security_scheme_name: "bearerAuth".to_string(),
            bearer_format: "JWT".to_string(),
            security_description: "Bearer token authentication.".to_string(),
        }
    }
}

impl DocumentConfig {
    /// Sets the fallback title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the API version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the contact block.
    pub fn with_contact(mut self, contact: ContactConfig) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Appends a server.
    pub fn with_server(mut self, server: ServerConfig) -> Self {
        self.servers.push(server);
        self
    }
}

/// The `info` block of the generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Document title.
    pub title: String,
    /// Document description (may be empty).
    pub description: String,
    /// API version.
    pub version: String,
    /// Optional contact block.
    pub contact: Option<ContactConfig>,
}

/// Operations keyed by path template, then by lower-case method.
pub type PathMap = IndexMap<String, IndexMap<String, Operation>>;

/// The assembled OpenAPI document.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
    /// OpenAPI version string.
    pub openapi: String,
    /// Document metadata.
    pub info: DocumentInfo,
    /// Servers, in order.
    pub servers: Vec<ServerConfig>,
    /// Folder tags, in pre-order.
    pub tags: Vec<Tag>,
    /// Operations by path and method.
    pub paths: PathMap,
    /// Static `components` object.
    pub components: Value,
    /// Security scheme required by every operation and at the root.
    pub security_scheme: String,
}

/// Summary counts of a converted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    /// Number of operations (methods summed over paths).
    pub endpoints: usize,
    /// Number of distinct path templates.
    pub paths: usize,
    /// Number of tags.
    pub tags: usize,
}

impl SpecDocument {
    /// Counts operations, paths and tags.
    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            endpoints: self.paths.values().map(IndexMap::len).sum(),
            paths: self.paths.len(),
            tags: self.tags.len(),
        }
    }

    /// Looks up the operation for `path` and `method`.
    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths.get(path)?.get(method)
    }

    /// Renders the document as a JSON value in OpenAPI field order.
    pub fn to_value(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("openapi".to_string(), json!(self.openapi));
        doc.insert("info".to_string(), build_info(&self.info));
        if !self.servers.is_empty() {
            let servers = self.servers.iter().map(build_server).collect::<Vec<_>>();
            doc.insert("servers".to_string(), Value::Array(servers));
        }
        let tags = self
            .tags
            .iter()
            .map(|tag| json!({ "name": tag.name, "description": tag.description }))
            .collect::<Vec<_>>();
        doc.insert("tags".to_string(), Value::Array(tags));

        let mut paths = Map::new();
        for (path, methods) in &self.paths {
            let mut item = Map::new();
            for (method, operation) in methods {
                item.insert(
                    method.clone(),
                    build_operation(operation, &self.security_scheme),
                );
            }
            paths.insert(path.clone(), Value::Object(item));
        }
        doc.insert("paths".to_string(), Value::Object(paths));
        doc.insert("components".to_string(), self.components.clone());
        doc.insert(
            "security".to_string(),
            build_security(&self.security_scheme),
        );
        Value::Object(doc)
    }
}

impl Serialize for SpecDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

/// Assembles the document from extracted endpoints and tags.
pub fn assemble_document(
    info: &CollectionInfo,
    endpoints: Vec<Endpoint>,
    tags: Vec<Tag>,
    config: &DocumentConfig,
) -> SpecDocument {
    for id in find_duplicate_operation_ids(&endpoints) {
        warn!(operation_id = %id, "operation id is used by more than one endpoint");
    }

    let mut paths: PathMap = IndexMap::new();
    for endpoint in endpoints {
        let methods = paths.entry(endpoint.path.clone()).or_default();
        if methods.contains_key(&endpoint.method) {
            debug!(
                path = %endpoint.path,
                method = %endpoint.method,
                "replacing earlier operation with the same path and method"
            );
        }
        methods.insert(endpoint.method, endpoint.operation);
    }

    SpecDocument {
        openapi: config.openapi.clone(),
        info: DocumentInfo {
            title: info.name.clone().unwrap_or_else(|| config.title.clone()),
            description: info.description.clone().unwrap_or_default(),
            version: config.version.clone(),
            contact: config.contact.clone(),
        },
        servers: config.servers.clone(),
        tags,
        paths,
        components: build_components(config),
        security_scheme: config.security_scheme_name.clone(),
    }
}

fn build_info(info: &DocumentInfo) -> Value {
    let mut obj = Map::new();
    obj.insert("title".to_string(), json!(info.title));
    obj.insert("description".to_string(), json!(info.description));
    obj.insert("version".to_string(), json!(info.version));
    if let Some(contact) = &info.contact {
        let mut contact_obj = Map::new();
        if let Some(name) = &contact.name {
            contact_obj.insert("name".to_string(), json!(name));
        }
        if let Some(url) = &contact.url {
            contact_obj.insert("url".to_string(), json!(url));
        }
        if let Some(email) = &contact.email {
            contact_obj.insert("email".to_string(), json!(email));
        }
        if !contact_obj.is_empty() {
            obj.insert("contact".to_string(), Value::Object(contact_obj));
        }
    }
    Value::Object(obj)
}

fn build_server(server: &ServerConfig) -> Value {
    let mut obj = Map::new();
    obj.insert("url".to_string(), json!(server.url));
    if let Some(desc) = &server.description {
        obj.insert("description".to_string(), json!(desc));
    }
    Value::Object(obj)
}

fn build_security(scheme: &str) -> Value {
    json!([{ scheme: [] }])
}

fn build_operation(operation: &Operation, security_scheme: &str) -> Value {
    let mut op = Map::new();
    op.insert("tags".to_string(), json!(operation.tags));
    op.insert("summary".to_string(), json!(operation.summary));
    op.insert("description".to_string(), json!(operation.description));
    op.insert("operationId".to_string(), json!(operation.operation_id));
    let params = operation
        .parameters
        .iter()
        .map(build_parameter)
        .collect::<Vec<_>>();
    op.insert("parameters".to_string(), Value::Array(params));
    if let Some(body) = &operation.request_body {
        op.insert("requestBody".to_string(), build_request_body(body));
    }

    let mut responses = Map::new();
    for (status, entry) in &operation.responses {
        responses.insert(status.clone(), build_response_entry(entry));
    }
    op.insert("responses".to_string(), Value::Object(responses));
    op.insert("security".to_string(), build_security(security_scheme));
    Value::Object(op)
}

fn build_parameter(param: &Parameter) -> Value {
    let mut obj = Map::new();
    obj.insert("name".to_string(), json!(param.name));
    obj.insert("in".to_string(), json!(param.location.as_str()));
    obj.insert("required".to_string(), json!(param.required));
    obj.insert("description".to_string(), json!(param.description));
    obj.insert("schema".to_string(), json!({ "type": "string" }));
    if let Some(example) = &param.example {
        obj.insert("example".to_string(), json!(example));
    }
    Value::Object(obj)
}

fn build_request_body(body: &RequestBody) -> Value {
    let mut media = Map::new();
    media.insert("schema".to_string(), body.schema.to_value());
    if let Some(example) = &body.example {
        media.insert("example".to_string(), example.clone());
    }

    let mut content = Map::new();
    content.insert(body.format.media_type().to_string(), Value::Object(media));

    let mut obj = Map::new();
    obj.insert("required".to_string(), json!(body.required));
    obj.insert("content".to_string(), Value::Object(content));
    Value::Object(obj)
}

fn build_response_entry(entry: &ResponseEntry) -> Value {
    let mut media = Map::new();
    media.insert("schema".to_string(), entry.schema.to_value());
    if let Some(example) = &entry.example {
        media.insert("example".to_string(), example.clone());
    }
    json!({
        "description": entry.description,
        "content": { "application/json": media }
    })
}

/// Static `components`: security scheme, shared `Error` schema and the
/// reusable error responses.
fn build_components(config: &DocumentConfig) -> Value {
    let error_ref = json!({ "$ref": "#/components/schemas/Error" });
    let error_response = |description: &str| {
        json!({
            "description": description,
            "content": { "application/json": { "schema": error_ref } }
        })
    };

    let mut bad_request = error_response("Bad request parameters");
    bad_request["content"]["application/json"]["example"] = json!({
        "error": {
            "code": 400301,
            "message": "invalid uuid format",
            "detail": "see https://en.wikipedia.org/wiki/Universally_unique_identifier"
        }
    });

    json!({
        "securitySchemes": {
            config.security_scheme_name.as_str(): {
                "type": "http",
                "scheme": "bearer",
                "bearerFormat": config.bearer_format,
                "description": config.security_description
            }
        },
        "schemas": {
            "Error": {
                "type": "object",
                "required": ["error"],
                "properties": {
                    "error": {
                        "type": "object",
                        "required": ["code", "message"],
                        "properties": {
                            "code": { "type": "integer", "description": "Error code" },
                            "message": { "type": "string", "description": "Error message" },
                            "detail": { "type": "string", "description": "Error details" }
                        }
                    }
                }
            }
        },
        "responses": {
            "BadRequest": bad_request,
            "Unauthorized": error_response("Unauthorized"),
            "Forbidden": error_response("Access denied"),
            "NotFound": error_response("Object not found"),
            "PaymentRequired": error_response("Payment required")
        }
    })
}
