//! # Collection Model
//!
//! Typed representation of a hierarchical API collection: folders of HTTP
//! request definitions carrying example bodies and example responses.
//!
//! Raw collection JSON is decoded once, at ingestion, into these types. The
//! folder/request split and the body encoding are explicit variants, so the
//! converter dispatches by pattern matching instead of probing fields.

mod shims;

use crate::error::{AppError, AppResult};
use serde_json::Value;

/// Prefix marking a templated path segment (e.g. `:id`).
pub const PATH_VARIABLE_MARKER: char = ':';

/// A parsed collection: document-level info plus the root node list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    /// Document-level metadata.
    pub info: CollectionInfo,
    /// Root nodes, in source order.
    pub items: Vec<CollectionNode>,
}

/// Document-level collection metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionInfo {
    /// Human-readable collection name.
    pub name: Option<String>,
    /// Collection description (markdown allowed).
    pub description: Option<String>,
}

/// A node of the collection tree.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionNode {
    /// A folder grouping further nodes.
    Folder(Folder),
    /// A single HTTP request definition.
    Request(RequestItem),
}

/// A folder of nodes. Contributes to the tag path, never to the URL path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Folder {
    /// Folder name.
    pub name: String,
    /// Optional folder description.
    pub description: Option<String>,
    /// Child nodes, in source order.
    pub children: Vec<CollectionNode>,
}

impl Folder {
    /// Creates an empty folder with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            children: Vec::new(),
        }
    }

    /// Sets the folder description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: impl Into<CollectionNode>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// Tears nested folders down with a work list instead of recursive drops,
/// so arbitrarily deep hand-built trees do not exhaust the stack.
impl Drop for Folder {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let CollectionNode::Folder(mut folder) = node {
                pending.append(&mut folder.children);
            }
        }
    }
}

impl From<Folder> for CollectionNode {
    fn from(folder: Folder) -> Self {
        CollectionNode::Folder(folder)
    }
}

/// A request leaf.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestItem {
    /// Human-readable request name. Empty names are stored as `None`.
    pub name: Option<String>,
    /// Optional request description.
    pub description: Option<String>,
    /// HTTP method as written in the source (any case).
    pub method: Option<String>,
    /// Structured URL, when the source has one.
    pub url: Option<Url>,
    /// Example request body.
    pub body: Option<Body>,
    /// Example responses, in source order.
    pub responses: Vec<ResponseExample>,
}

impl RequestItem {
    /// Creates a request with the given method and URL.
    pub fn new(method: impl Into<String>, url: Url) -> Self {
        Self {
            method: Some(method.into()),
            url: Some(url),
            ..Default::default()
        }
    }

    /// Sets the request name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the request description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends an example response.
    pub fn with_response(mut self, response: ResponseExample) -> Self {
        self.responses.push(response);
        self
    }
}

impl From<RequestItem> for CollectionNode {
    fn from(request: RequestItem) -> Self {
        CollectionNode::Request(request)
    }
}

/// Structured request URL.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Url {
    /// Path segments without separators; templated ones start with `:`.
    pub path_segments: Vec<String>,
    /// Declared path variables.
    pub path_variables: Vec<PathVariable>,
    /// Declared query parameters.
    pub query_params: Vec<QueryParam>,
}

impl Url {
    /// Builds a URL from its path segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path_segments: segments.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Appends a declared path variable.
    pub fn with_variable(mut self, variable: PathVariable) -> Self {
        self.path_variables.push(variable);
        self
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, query: QueryParam) -> Self {
        self.query_params.push(query);
        self
    }
}

/// A declared path variable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathVariable {
    /// Variable name (without the `:` marker).
    pub name: String,
    /// Example value.
    pub value: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

impl PathVariable {
    /// Creates a path variable with an example value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            description: None,
        }
    }
}

/// A declared query parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryParam {
    /// Parameter key. Missing or empty keys are ignored by the extractor.
    pub key: Option<String>,
    /// Example value.
    pub value: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the parameter is switched off in the source.
    pub disabled: bool,
}

impl QueryParam {
    /// Creates an enabled query parameter.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Marks the parameter as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Example request body, by encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Raw text (usually JSON).
    Raw(String),
    /// `multipart/form-data` fields.
    FormData(Vec<Field>),
    /// `application/x-www-form-urlencoded` fields.
    UrlEncoded(Vec<Field>),
}

/// A form field of a `FormData` or `UrlEncoded` body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field {
    /// Field name.
    pub key: String,
    /// Example value. File fields usually have none.
    pub value: Option<String>,
    /// Whether the field is switched off in the source.
    pub disabled: bool,
    /// Whether the field uploads a file.
    pub is_file: bool,
}

impl Field {
    /// Creates a text field.
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Creates a file upload field.
    pub fn file(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_file: true,
            ..Default::default()
        }
    }

    /// Marks the field as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// A saved example response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseExample {
    /// HTTP status code.
    pub status_code: Option<u16>,
    /// Example name, used as the response description.
    pub name: Option<String>,
    /// Example payload.
    pub body: Option<ResponseBody>,
}

impl ResponseExample {
    /// Creates an example with a textual body.
    pub fn new(status_code: u16, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            name: Some(name.into()),
            body: Some(ResponseBody::Text(body.into())),
        }
    }
}

/// Payload of an example response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Serialized text, parsed as JSON when converted.
    Text(String),
    /// An already-structured JSON value.
    Structured(Value),
}

impl Collection {
    /// Parses a collection from JSON text.
    ///
    /// Fails with [`AppError::Json`] on malformed JSON and with
    /// [`AppError::InvalidCollection`] when the document is not a collection
    /// tree (e.g. the root `item` list is missing).
    pub fn from_json_str(input: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Parses a collection from an already-decoded JSON value.
    pub fn from_value(value: Value) -> AppResult<Self> {
        if !value.is_object() {
            return Err(AppError::InvalidCollection(
                "collection root must be a JSON object".to_string(),
            ));
        }
        match value.get("item") {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(AppError::InvalidCollection(
                    "root `item` must be a list".to_string(),
                ))
            }
            None => {
                return Err(AppError::InvalidCollection(
                    "collection is missing the root `item` list".to_string(),
                ))
            }
        }

        let shim: shims::ShimCollection = serde_json::from_value(value)
            .map_err(|e| AppError::InvalidCollection(e.to_string()))?;
        Ok(shim.into_collection())
    }
}
