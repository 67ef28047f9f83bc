//! # Endpoint Walker
//!
//! Depth-first traversal of the collection tree. Folders extend the
//! accumulated tag path; request leaves become [`Endpoint`]s.
//!
//! The walk keeps its own stack of sibling iterators, so tree depth is
//! bounded by memory rather than by the thread stack.

use crate::collection::{CollectionNode, RequestItem};
use crate::oas::body::extract_request_body;
use crate::oas::models::{Endpoint, Operation};
use crate::oas::naming::generate_operation_id;
use crate::oas::params::{extract_path_params, extract_query_params};
use crate::oas::paths::path_template;
use crate::oas::responses::extract_responses;
use tracing::debug;

/// Method used when a request does not declare one.
pub const DEFAULT_METHOD: &str = "get";

/// Extracts every endpoint of the tree, in depth-first source order.
pub fn extract_endpoints(nodes: &[CollectionNode]) -> Vec<Endpoint> {
    let mut endpoints = Vec::new();
    let mut stack = vec![(nodes.iter(), String::new())];

    while let Some((siblings, tag_path)) = stack.last_mut() {
        match siblings.next() {
            None => {
                stack.pop();
            }
            Some(CollectionNode::Request(request)) => {
                endpoints.extend(build_endpoint(request, tag_path));
            }
            Some(CollectionNode::Folder(folder)) => {
                let nested = join_tag_path(tag_path, &folder.name);
                stack.push((folder.children.iter(), nested));
            }
        }
    }
    endpoints
}

/// `<accumulated>/<name>`, or just `<name>` at the root.
pub(crate) fn join_tag_path(accumulated: &str, name: &str) -> String {
    if accumulated.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", accumulated, name)
    }
}

/// Builds the endpoint of one request leaf.
///
/// Returns `None` when the request has no URL or no path segments.
pub fn build_endpoint(request: &RequestItem, tag_path: &str) -> Option<Endpoint> {
    let Some(url) = request
        .url
        .as_ref()
        .filter(|url| !url.path_segments.is_empty())
    else {
        debug!(name = ?request.name, "skipping request without URL path");
        return None;
    };

    let method = request
        .method
        .as_deref()
        .unwrap_or(DEFAULT_METHOD)
        .to_lowercase();
    let path = path_template(&url.path_segments);

    let mut parameters = extract_path_params(url);
    parameters.extend(extract_query_params(url));

    let tags = tag_path
        .split('/')
        .filter(|component| !component.is_empty())
        .map(str::to_string)
        .collect();

    let name = request.name.as_deref();
    let summary = name
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} {}", method.to_uppercase(), path));
    let description = request
        .description
        .as_deref()
        .or(name)
        .unwrap_or_default()
        .to_string();
    let operation_id = generate_operation_id(&method, &path, name);

    Some(Endpoint {
        operation: Operation {
            tags,
            summary,
            description,
            operation_id,
            parameters,
            request_body: extract_request_body(request.body.as_ref()),
            responses: extract_responses(&request.responses),
        },
        path,
        method,
    })
}
