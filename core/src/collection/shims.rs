//! # Collection Shims
//!
//! Intermediate deserialization layer. These structs mirror the raw
//! collection JSON (Postman v2.x layout) and are converted into the typed
//! model right after decoding. Source quirks are absorbed here: numeric
//! scalars, object-shaped descriptions, string URLs and string paths.
//!
//! Only the root `item` list is checked strictly (in
//! [`super::Collection::from_value`]). Below it, a value of the wrong shape
//! is dropped with a `debug!` event and the rest of the tree still decodes:
//! a non-list `response` or `query` reads as empty, a malformed node is
//! skipped, and `disabled` accepts `"true"`/`"false"` strings.

use super::{
    Body, Collection, CollectionInfo, CollectionNode, Field, Folder, PathVariable, QueryParam,
    RequestItem, ResponseBody, ResponseExample, Url,
};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

#[derive(Deserialize)]
pub(crate) struct ShimCollection {
    #[serde(default, deserialize_with = "lenient")]
    info: Option<ShimInfo>,
    #[serde(default, deserialize_with = "lenient_list")]
    item: Option<Vec<ShimItem>>,
}

#[derive(Deserialize, Default)]
struct ShimInfo {
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "description_text")]
    description: Option<String>,
}

#[derive(Deserialize)]
struct ShimItem {
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "description_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    item: Option<Vec<ShimItem>>,
    #[serde(default, deserialize_with = "lenient")]
    request: Option<ShimRequestOrUrl>,
    #[serde(default, deserialize_with = "lenient_list")]
    response: Option<Vec<ShimResponse>>,
}

/// A request is either a full object or a bare URL string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ShimRequestOrUrl {
    Request(ShimRequest),
    Url(IgnoredAny),
}

#[derive(Deserialize)]
struct ShimRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    method: Option<String>,
    #[serde(default, deserialize_with = "description_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    url: Option<ShimUrlOrRaw>,
    #[serde(default, deserialize_with = "lenient")]
    body: Option<ShimBody>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShimUrlOrRaw {
    Url(ShimUrl),
    Raw(IgnoredAny),
}

#[derive(Deserialize)]
struct ShimUrl {
    #[serde(default, deserialize_with = "lenient")]
    path: Option<ShimPath>,
    #[serde(default, deserialize_with = "lenient_list")]
    variable: Option<Vec<ShimVariable>>,
    #[serde(default, deserialize_with = "lenient_list")]
    query: Option<Vec<ShimQuery>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShimPath {
    Segments(Vec<Value>),
    Raw(String),
}

#[derive(Deserialize)]
struct ShimVariable {
    #[serde(default, deserialize_with = "lenient_text")]
    key: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    value: Option<String>,
    #[serde(default, deserialize_with = "description_text")]
    description: Option<String>,
}

#[derive(Deserialize)]
struct ShimQuery {
    #[serde(default, deserialize_with = "lenient_text")]
    key: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    value: Option<String>,
    #[serde(default, deserialize_with = "description_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    disabled: bool,
}

#[derive(Deserialize)]
struct ShimBody {
    #[serde(default, deserialize_with = "lenient_text")]
    mode: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    raw: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    formdata: Option<Vec<ShimField>>,
    #[serde(default, deserialize_with = "lenient_list")]
    urlencoded: Option<Vec<ShimField>>,
}

#[derive(Deserialize)]
struct ShimField {
    #[serde(default, deserialize_with = "lenient_text")]
    key: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    value: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    disabled: bool,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct ShimResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    body: Option<Value>,
}

impl ShimCollection {
    pub(crate) fn into_collection(self) -> Collection {
        let info = self.info.unwrap_or_default();
        Collection {
            info: CollectionInfo {
                name: non_empty(info.name),
                description: non_empty(info.description),
            },
            items: convert_items(self.item.unwrap_or_default()),
        }
    }
}

fn convert_items(items: Vec<ShimItem>) -> Vec<CollectionNode> {
    items.into_iter().filter_map(ShimItem::into_node).collect()
}

impl ShimItem {
    fn into_node(self) -> Option<CollectionNode> {
        if let Some(children) = self.item {
            return Some(CollectionNode::Folder(Folder {
                name: self.name.unwrap_or_default(),
                description: non_empty(self.description),
                children: convert_items(children),
            }));
        }

        let Some(request) = self.request else {
            debug!(name = ?self.name, "ignoring node that is neither a folder nor a request");
            return None;
        };

        let (method, url, body, request_description) = match request {
            ShimRequestOrUrl::Request(req) => (
                non_empty(req.method),
                req.url.map(ShimUrlOrRaw::into_url),
                req.body.and_then(ShimBody::into_body),
                non_empty(req.description),
            ),
            // A bare URL string has no structured path.
            ShimRequestOrUrl::Url(_) => (None, Some(Url::default()), None, None),
        };

        let responses = self
            .response
            .unwrap_or_default()
            .into_iter()
            .map(ShimResponse::into_example)
            .collect();

        Some(CollectionNode::Request(RequestItem {
            name: non_empty(self.name),
            description: non_empty(self.description).or(request_description),
            method,
            url,
            body,
            responses,
        }))
    }
}

impl ShimUrlOrRaw {
    fn into_url(self) -> Url {
        match self {
            ShimUrlOrRaw::Url(url) => url.into_url(),
            ShimUrlOrRaw::Raw(_) => Url::default(),
        }
    }
}

impl ShimUrl {
    fn into_url(self) -> Url {
        let path_segments = match self.path {
            Some(ShimPath::Segments(segments)) => {
                segments.into_iter().filter_map(segment_text).collect()
            }
            Some(ShimPath::Raw(raw)) => split_raw_path(&raw),
            None => Vec::new(),
        };

        let path_variables = self
            .variable
            .unwrap_or_default()
            .into_iter()
            .filter_map(|var| {
                let name = non_empty(var.key)?;
                Some(PathVariable {
                    name,
                    value: var.value,
                    description: non_empty(var.description),
                })
            })
            .collect();

        let query_params = self
            .query
            .unwrap_or_default()
            .into_iter()
            .map(|q| QueryParam {
                key: q.key,
                value: q.value,
                description: non_empty(q.description),
                disabled: q.disabled,
            })
            .collect();

        Url {
            path_segments,
            path_variables,
            query_params,
        }
    }
}

impl ShimBody {
    fn into_body(self) -> Option<Body> {
        match self.mode.as_deref() {
            Some("raw") => self.raw.filter(|raw| !raw.is_empty()).map(Body::Raw),
            Some("formdata") => self.formdata.map(|f| Body::FormData(convert_fields(f))),
            Some("urlencoded") => self.urlencoded.map(|f| Body::UrlEncoded(convert_fields(f))),
            other => {
                debug!(mode = ?other, "unsupported body mode, no request body emitted");
                None
            }
        }
    }
}

fn convert_fields(fields: Vec<ShimField>) -> Vec<Field> {
    fields
        .into_iter()
        .map(|f| Field {
            key: f.key.unwrap_or_default(),
            value: f.value,
            disabled: f.disabled,
            is_file: f.kind.as_deref() == Some("file"),
        })
        .collect()
}

impl ShimResponse {
    fn into_example(self) -> ResponseExample {
        let status_code = self
            .code
            .and_then(scalar_text)
            .and_then(|code| code.trim().parse::<u16>().ok())
            .filter(|code| *code != 0);

        let body = match self.body {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if text.is_empty() => None,
            Some(Value::String(text)) => Some(ResponseBody::Text(text)),
            Some(other) => Some(ResponseBody::Structured(other)),
        };

        ResponseExample {
            status_code,
            name: non_empty(self.name),
            body,
        }
    }
}

fn split_raw_path(raw: &str) -> Vec<String> {
    let trimmed = raw.trim_start_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').map(str::to_string).collect()
}

fn segment_text(segment: Value) -> Option<String> {
    match segment {
        Value::Object(mut obj) => obj.remove("value").and_then(scalar_text),
        other => scalar_text(other),
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Decodes an optional value, dropping it when it has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(decode))
}

/// Non-list values read as absent; malformed elements are dropped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(items.into_iter().filter_map(decode).collect()),
        Some(Value::Null) | None => None,
        Some(other) => {
            debug!(value = %other, "expected a list, ignoring value");
            None
        }
    })
}

fn decode<T: DeserializeOwned>(value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            debug!(error = %e, "dropping malformed collection entry");
            None
        }
    }
}

/// Booleans, `"true"`/`"false"` strings and `0`/`1` numbers.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => flag,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_text))
}

/// Descriptions are either plain strings or `{ "content": ..., "type": ... }`.
fn description_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Object(mut obj)) => obj.remove("content").and_then(scalar_text),
        _ => None,
    })
}
