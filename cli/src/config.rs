//! # Config Loading
//!
//! Reads a [`DocumentConfig`] from a JSON or YAML file, chosen by extension.

use crate::error::CliResult;
use collection_core::DocumentConfig;
use std::fs;
use std::path::Path;

/// Loads the document config. `.yaml`/`.yml` files are YAML, anything else JSON.
pub fn load_config(path: &Path) -> CliResult<DocumentConfig> {
    let content = fs::read_to_string(path)?;
    let config = if is_yaml(path) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(config)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_load_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.yml");
        fs::write(
            &path,
            "title: Kinescope API\nversion: 2.1.0\nservers:\n  - url: https://api.kinescope.io\n    description: Production server\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.title, "Kinescope API");
        assert_eq!(config.version, "2.1.0");
        assert_eq!(config.servers.len(), 1);
        assert_eq!(config.openapi, "3.0.3");
    }

    #[test]
    fn test_load_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, r#"{"securitySchemeName": "apiKey", "bearerFormat": "opaque"}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.security_scheme_name, "apiKey");
        assert_eq!(config.bearer_format, "opaque");
        assert_eq!(config.title, "API");
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_config(&dir.path().join("absent.json")),
            Err(CliError::Io(_))
        ));

        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(load_config(&path), Err(CliError::Json(_))));
    }
}
