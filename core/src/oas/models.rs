//! # OpenAPI Models
//!
//! Intermediate Representation (IR) of the generated document: endpoints,
//! their operations, parameters, bodies and responses.
//!
//! These values are built by the extractors and rendered to JSON by
//! [`crate::oas::document`].

use crate::oas::schema::Schema;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Where a parameter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// A `{name}` placeholder of the path template.
    Path,
    /// A query-string parameter.
    Query,
}

impl ParamLocation {
    /// The OpenAPI `in` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string-typed operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Path or query.
    pub location: ParamLocation,
    /// Path parameters are always required, query parameters never.
    pub required: bool,
    /// Human-readable description (may be empty).
    pub description: String,
    /// Example value.
    pub example: Option<String>,
}

/// Request/response body encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// `application/json`
    Json,
    /// `text/plain`, for raw bodies that are not JSON.
    Text,
    /// `multipart/form-data`
    Multipart,
    /// `application/x-www-form-urlencoded`
    Form,
}

impl BodyFormat {
    /// The media type key used under `content`.
    pub fn media_type(&self) -> &'static str {
        match self {
            BodyFormat::Json => "application/json",
            BodyFormat::Text => "text/plain",
            BodyFormat::Multipart => "multipart/form-data",
            BodyFormat::Form => "application/x-www-form-urlencoded",
        }
    }
}

/// An operation's request body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    /// Whether the body is required. Always true for extracted bodies.
    pub required: bool,
    /// Body encoding.
    pub format: BodyFormat,
    /// Body schema.
    pub schema: Schema,
    /// Example payload (raw bodies only).
    pub example: Option<Value>,
}

/// One entry of an operation's `responses` map.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEntry {
    /// Response description.
    pub description: String,
    /// JSON schema of the payload.
    pub schema: Schema,
    /// Example payload.
    pub example: Option<Value>,
}

/// Responses keyed by status code, in insertion order.
pub type Responses = IndexMap<String, ResponseEntry>;

/// The operation descriptor emitted under `paths.<template>.<method>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Tag names (folder path components).
    pub tags: Vec<String>,
    /// Short summary.
    pub summary: String,
    /// Long description (may be empty).
    pub description: String,
    /// Operation identifier. Not guaranteed unique across a document.
    pub operation_id: String,
    /// Path parameters followed by query parameters.
    pub parameters: Vec<Parameter>,
    /// Request body, if the request has one.
    pub request_body: Option<RequestBody>,
    /// Response map.
    pub responses: Responses,
}

/// One `(path template, method)` operation extracted from a request leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    /// Path template, e.g. `/videos/{id}`.
    pub path: String,
    /// Lower-case HTTP method.
    pub method: String,
    /// The operation descriptor.
    pub operation: Operation,
}

/// A tag entry of the document's root `tags` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Accumulated folder path, e.g. `Videos/Uploads`.
    pub name: String,
    /// Folder description or a synthesized default.
    pub description: String,
}

impl Tag {
    /// Creates a tag.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_types() {
        assert_eq!(BodyFormat::Json.media_type(), "application/json");
        assert_eq!(BodyFormat::Text.media_type(), "text/plain");
        assert_eq!(BodyFormat::Multipart.media_type(), "multipart/form-data");
        assert_eq!(
            BodyFormat::Form.media_type(),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn test_param_location_display() {
        assert_eq!(ParamLocation::Path.to_string(), "path");
        assert_eq!(ParamLocation::Query.to_string(), "query");
    }
}
