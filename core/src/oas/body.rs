//! # Body Extraction
//!
//! Derives a request-body schema from one of the three body encodings.
//! A raw body that is not JSON degrades to a plain-text body; the parse
//! error is logged and otherwise swallowed.

use crate::collection::{Body, Field};
use crate::oas::models::{BodyFormat, RequestBody};
use crate::oas::schema::{infer_schema, Schema, StringSchema};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

/// Description attached to file upload properties.
pub const FILE_FIELD_DESCRIPTION: &str = "File to upload";

/// Extracts the request body, if any.
pub fn extract_request_body(body: Option<&Body>) -> Option<RequestBody> {
    let body = body?;

    let extracted = match body {
        Body::Raw(text) => raw_body(text),
        Body::FormData(fields) => RequestBody {
            required: true,
            format: BodyFormat::Multipart,
            schema: form_schema(fields, true),
            example: None,
        },
        Body::UrlEncoded(fields) => RequestBody {
            required: true,
            format: BodyFormat::Form,
            schema: form_schema(fields, false),
            example: None,
        },
    };
    Some(extracted)
}

fn raw_body(text: &str) -> RequestBody {
    match serde_json::from_str::<Value>(text) {
        Ok(parsed) => RequestBody {
            required: true,
            format: BodyFormat::Json,
            schema: infer_schema(&parsed),
            example: Some(parsed),
        },
        Err(e) => {
            debug!(error = %e, "raw request body is not JSON, using text/plain");
            RequestBody {
                required: true,
                format: BodyFormat::Text,
                schema: Schema::string(),
                example: Some(Value::String(text.to_string())),
            }
        }
    }
}

/// Object schema for form fields. File handling only applies to multipart.
fn form_schema(fields: &[Field], allow_files: bool) -> Schema {
    let mut properties = IndexMap::new();
    let mut required = Vec::new();

    for field in fields.iter().filter(|f| !f.disabled) {
        let property = if allow_files && field.is_file {
            StringSchema::binary(FILE_FIELD_DESCRIPTION)
        } else {
            StringSchema {
                example: field.value.clone().filter(|v| !v.is_empty()),
                ..Default::default()
            }
        };
        properties.insert(field.key.clone(), Schema::String(property));

        let has_value = field.value.as_deref().is_some_and(|v| !v.is_empty());
        if has_value && !required.contains(&field.key) {
            required.push(field.key.clone());
        }
    }

    Schema::object(properties, required)
}
