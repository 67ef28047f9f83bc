//! # Path Normalization
//!
//! Converts collection path segments (`videos/:id`) into OpenAPI path
//! templates (`videos/{id}`).

use crate::collection::PATH_VARIABLE_MARKER;

/// Joins `segments` with `/`, turning `:name` segments into `{name}`.
///
/// Other segments pass through verbatim, empty ones included. The result
/// has no leading slash; see [`path_template`].
pub fn convert_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|segment| {
            let segment = segment.as_ref();
            match segment.strip_prefix(PATH_VARIABLE_MARKER) {
                Some(name) => format!("{{{}}}", name),
                None => segment.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The absolute path template for `segments`, prefixed with a single `/`.
pub fn path_template<S: AsRef<str>>(segments: &[S]) -> String {
    format!("/{}", convert_path(segments))
}
