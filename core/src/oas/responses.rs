//! # Response Extraction
//!
//! Builds the response map of one endpoint from its saved examples and
//! backfills the standard error responses.
//!
//! Insertion order: the default `200` entry, then declared examples in
//! source order, then missing standard error codes (400, 401, 403, 404).
//! Declared examples always win over synthesized entries.

use crate::collection::{ResponseBody, ResponseExample};
use crate::oas::models::{ResponseEntry, Responses};
use crate::oas::schema::{infer_schema, Schema};
use indexmap::IndexMap;
use serde_json::{json, Value};
use tracing::debug;

/// Status codes backfilled with the error envelope when not declared.
pub const STANDARD_ERROR_CODES: [u16; 4] = [400, 401, 403, 404];

/// Builds the response map for an endpoint.
pub fn extract_responses(examples: &[ResponseExample]) -> Responses {
    let mut responses = IndexMap::new();
    responses.insert(
        "200".to_string(),
        ResponseEntry {
            description: "Successful response".to_string(),
            schema: Schema::untyped_object(),
            example: None,
        },
    );

    for example in examples {
        let (Some(code), Some(body)) = (example.status_code, example.body.as_ref()) else {
            continue;
        };
        let status = code.to_string();
        let (schema, example_value) = match parse_body(body) {
            Ok(value) => {
                let schema = infer_schema(&value);
                (schema, Some(value).filter(is_truthy))
            }
            Err(e) => {
                debug!(status = %status, error = %e, "response example is not JSON, using untyped object");
                (Schema::untyped_object(), None)
            }
        };

        let description = example
            .name
            .clone()
            .unwrap_or_else(|| format!("HTTP {}", status));
        responses.insert(
            status,
            ResponseEntry {
                description,
                schema,
                example: example_value,
            },
        );
    }

    for code in STANDARD_ERROR_CODES {
        let status = code.to_string();
        if responses.contains_key(&status) {
            continue;
        }
        if let Some(entry) = default_error_response(code) {
            responses.insert(status, entry);
        }
    }

    responses
}

/// The synthesized entry for a standard error code.
pub fn default_error_response(code: u16) -> Option<ResponseEntry> {
    let entry = match code {
        400 => ResponseEntry {
            description: "Bad request parameters".to_string(),
            schema: error_envelope_schema(true),
            example: Some(json!({
                "error": {
                    "code": 400301,
                    "message": "invalid uuid format",
                    "detail": "see https://en.wikipedia.org/wiki/Universally_unique_identifier"
                }
            })),
        },
        401 => ResponseEntry {
            description: "Unauthorized".to_string(),
            schema: error_envelope_schema(false),
            example: None,
        },
        403 => ResponseEntry {
            description: "Access denied".to_string(),
            schema: error_envelope_schema(false),
            example: None,
        },
        404 => ResponseEntry {
            description: "Object not found".to_string(),
            schema: error_envelope_schema(false),
            example: None,
        },
        _ => return None,
    };
    Some(entry)
}

/// `{error: {code: integer, message: string, detail?: string}}`
pub fn error_envelope_schema(with_detail: bool) -> Schema {
    let mut error = IndexMap::new();
    error.insert("code".to_string(), Schema::Integer(None));
    error.insert("message".to_string(), Schema::string());
    if with_detail {
        error.insert("detail".to_string(), Schema::string());
    }

    let mut envelope = IndexMap::new();
    envelope.insert("error".to_string(), Schema::object(error, Vec::new()));
    Schema::object(envelope, Vec::new())
}

fn parse_body(body: &ResponseBody) -> Result<Value, serde_json::Error> {
    match body {
        ResponseBody::Structured(value) => Ok(value.clone()),
        ResponseBody::Text(text) => serde_json::from_str(text),
    }
}

/// Falsy examples (`null`, `false`, `0`, `""`) are not emitted.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
