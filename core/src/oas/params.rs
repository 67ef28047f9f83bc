//! # Parameter Extraction
//!
//! Derives path and query parameter descriptors from a collection URL.
//!
//! Path parameters come from the URL's declared variable list, not from the
//! `{...}` placeholders of the path template. The two sources are not
//! cross-checked.

use crate::collection::Url;
use crate::oas::models::{ParamLocation, Parameter};

/// One required path parameter per declared path variable.
pub fn extract_path_params(url: &Url) -> Vec<Parameter> {
    url.path_variables
        .iter()
        .map(|var| Parameter {
            name: var.name.clone(),
            location: ParamLocation::Path,
            required: true,
            description: var
                .description
                .clone()
                .unwrap_or_else(|| format!("Path parameter: {}", var.name)),
            example: var.value.clone(),
        })
        .collect()
}

/// One optional query parameter per enabled entry with a non-empty key.
pub fn extract_query_params(url: &Url) -> Vec<Parameter> {
    url.query_params
        .iter()
        .filter(|q| !q.disabled)
        .filter_map(|q| {
            let name = q.key.as_deref().filter(|k| !k.is_empty())?;
            Some(Parameter {
                name: name.to_string(),
                location: ParamLocation::Query,
                required: false,
                description: q.description.clone().unwrap_or_default(),
                example: q.value.clone().filter(|v| !v.is_empty()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{PathVariable, QueryParam};

    #[test]
    fn test_path_params_follow_declared_variables() {
        // The template placeholder is `{id}` but the declared variable wins.
        let url = Url::from_segments(["videos", ":id"])
            .with_variable(PathVariable::new("video_id", "42"));

        let params = extract_path_params(&url);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "video_id");
        assert_eq!(params[0].location, ParamLocation::Path);
        assert!(params[0].required);
        assert_eq!(params[0].description, "Path parameter: video_id");
        assert_eq!(params[0].example.as_deref(), Some("42"));
    }

    #[test]
    fn test_path_param_keeps_declared_description() {
        let mut var = PathVariable::new("id", "1");
        var.description = Some("Video identifier".into());
        let url = Url::from_segments([":id"]).with_variable(var);

        assert_eq!(extract_path_params(&url)[0].description, "Video identifier");
    }

    #[test]
    fn test_no_declared_variables_means_no_path_params() {
        let url = Url::from_segments(["videos", ":id"]);
        assert!(extract_path_params(&url).is_empty());
    }

    #[test]
    fn test_query_params_skip_disabled_and_keyless() {
        let url = Url::from_segments(["videos"])
            .with_query(QueryParam::new("page", "2"))
            .with_query(QueryParam::new("per_page", "10").disabled())
            .with_query(QueryParam::new("", "ignored"))
            .with_query(QueryParam {
                key: Some("order".into()),
                value: Some(String::new()),
                description: Some("Sort order".into()),
                disabled: false,
            });

        let params = extract_query_params(&url);
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["page", "order"]);

        assert!(!params[0].required);
        assert_eq!(params[0].location, ParamLocation::Query);
        assert_eq!(params[0].example.as_deref(), Some("2"));
        assert_eq!(params[0].description, "");

        assert_eq!(params[1].example, None);
        assert_eq!(params[1].description, "Sort order");
    }
}
