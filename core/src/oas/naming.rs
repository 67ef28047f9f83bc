//! # Naming Utilities
//!
//! Derives operation identifiers from request names, or from the HTTP
//! method and path template when the request is unnamed.
//!
//! Identifiers are deterministic but not deduplicated: two requests with the
//! same name get the same id. [`find_duplicate_operation_ids`] reports such
//! collisions without changing them.

use crate::oas::models::Endpoint;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Derives the operation id for an endpoint.
///
/// * Named: `"Get Video By ID!!"` -> `get_video_by_id`.
/// * Unnamed: `POST /videos/{id}/thumbnails` -> `post_videos_thumbnails`.
pub fn generate_operation_id(method: &str, path: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => {
            let id = slugify(name);
            if id.is_empty() {
                format!("{}_{}", method, replace_non_alphanumeric(path))
            } else {
                id
            }
        }
        None => {
            let parts = path
                .split('/')
                .filter(|segment| !segment.is_empty() && !segment.starts_with('{'))
                .map(|segment| replace_non_alphanumeric(&segment.to_lowercase()))
                .collect::<Vec<_>>();
            format!("{}_{}", method, parts.join("_"))
        }
    }
}

/// Lower-cases `name` and collapses every run outside `[a-z0-9]` into `_`.
fn slugify(name: &str) -> String {
    static NON_SLUG_RE: OnceLock<Regex> = OnceLock::new();
    let re = NON_SLUG_RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex"));

    let lowered = name.to_lowercase();
    re.replace_all(&lowered, "_").trim_matches('_').to_string()
}

/// Replaces each non-ASCII-alphanumeric character with `_` (no collapsing).
fn replace_non_alphanumeric(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Returns operation ids used by more than one endpoint, in first-seen order.
pub fn find_duplicate_operation_ids<'a, I>(endpoints: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Endpoint>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for endpoint in endpoints {
        let id = endpoint.operation.operation_id.as_str();
        let count = counts.entry(id).or_insert(0);
        if *count == 0 {
            order.push(id);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter(|id| counts.get(id).copied().unwrap_or(0) > 1)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::{Operation, Responses};

    #[test]
    fn test_named_operation_ids() {
        assert_eq!(
            generate_operation_id("get", "/videos/{id}", Some("Get Video By ID!!")),
            "get_video_by_id"
        );
        assert_eq!(
            generate_operation_id("get", "/x", Some("  List -- all   videos ")),
            "list_all_videos"
        );
        assert_eq!(generate_operation_id("get", "/x", Some("v2")), "v2");
    }

    #[test]
    fn test_name_without_alphanumerics_falls_back_to_path() {
        assert_eq!(
            generate_operation_id("get", "/videos/{id}", Some("Получить видео")),
            "get__videos__id_"
        );
        assert_eq!(generate_operation_id("delete", "/a-b", Some("!!!")), "delete__a_b");
    }

    #[test]
    fn test_unnamed_operation_ids() {
        assert_eq!(
            generate_operation_id("post", "/videos/{id}/thumbnails", None),
            "post_videos_thumbnails"
        );
        assert_eq!(
            generate_operation_id("get", "/v1/live-events/{event_id}", None),
            "get_v1_live_events"
        );
        assert_eq!(generate_operation_id("get", "/Projects", None), "get_projects");
        assert_eq!(generate_operation_id("get", "/{id}", None), "get_");
    }

    fn endpoint(path: &str, id: &str) -> Endpoint {
        Endpoint {
            path: path.to_string(),
            method: "get".to_string(),
            operation: Operation {
                tags: Vec::new(),
                summary: String::new(),
                description: String::new(),
                operation_id: id.to_string(),
                parameters: Vec::new(),
                request_body: None,
                responses: Responses::new(),
            },
        }
    }

    #[test]
    fn test_duplicate_detection() {
        let endpoints = vec![
            endpoint("/a", "list"),
            endpoint("/b", "get"),
            endpoint("/c", "list"),
            endpoint("/d", "get"),
            endpoint("/e", "unique"),
        ];
        assert_eq!(find_duplicate_operation_ids(&endpoints), vec!["list", "get"]);
        assert!(find_duplicate_operation_ids(&endpoints[..2]).is_empty());
    }
}
