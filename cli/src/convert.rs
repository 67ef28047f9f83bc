//! # Convert Command
//!
//! Loads a collection file, converts it and writes the document as JSON
//! and (optionally) YAML.

use crate::config::load_config;
use crate::error::CliResult;
use collection_core::oas::ServerConfig;
use collection_core::{convert_json_str, DocumentConfig, DocumentStats, SpecDocument};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments for the convert command.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the collection JSON file.
    #[clap(env = "COLLECTION_PATH")]
    pub input: PathBuf,

    /// Document config file (JSON, or YAML for `.yaml`/`.yml`).
    #[clap(long, env = "COLLECTION2OPENAPI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overrides the fallback document title.
    #[clap(long)]
    pub title: Option<String>,

    /// Overrides the API version.
    #[clap(long)]
    pub api_version: Option<String>,

    /// Server URL. Repeat for several; replaces configured servers.
    #[clap(long = "server")]
    pub servers: Vec<String>,

    /// Directory the documents are written to.
    #[clap(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// File stem of the written documents.
    #[clap(long, default_value = "openapi")]
    pub output_name: String,

    /// Skip the YAML output.
    #[clap(long)]
    pub no_yaml: bool,
}

/// Executes the conversion and returns the document stats.
pub fn execute(args: &ConvertArgs) -> CliResult<DocumentStats> {
    let config = resolve_config(args)?;

    info!(input = %args.input.display(), "reading collection");
    let raw = fs::read_to_string(&args.input)?;
    let document = convert_json_str(&raw, &config)?;

    fs::create_dir_all(&args.output_dir)?;
    let json_path = args.output_dir.join(format!("{}.json", args.output_name));
    write_json(&document, &json_path)?;
    println!("Wrote {}", json_path.display());

    if !args.no_yaml {
        let yaml_path = args.output_dir.join(format!("{}.yaml", args.output_name));
        write_yaml(&document, &yaml_path)?;
        println!("Wrote {}", yaml_path.display());
    }

    let stats = document.stats();
    println!(
        "Endpoints: {}, paths: {}, tags: {}",
        stats.endpoints, stats.paths, stats.tags
    );
    Ok(stats)
}

/// Config file (or defaults) with command-line overrides applied.
fn resolve_config(args: &ConvertArgs) -> CliResult<DocumentConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => DocumentConfig::default(),
    };
    if let Some(title) = &args.title {
        config.title = title.clone();
    }
    if let Some(version) = &args.api_version {
        config.version = version.clone();
    }
    if !args.servers.is_empty() {
        config.servers = args.servers.iter().map(ServerConfig::new).collect();
    }
    Ok(config)
}

fn write_json(document: &SpecDocument, path: &Path) -> CliResult<()> {
    let mut content = serde_json::to_string_pretty(document)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

fn write_yaml(document: &SpecDocument, path: &Path) -> CliResult<()> {
    let content = serde_yaml::to_string(document)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use serde_json::Value;

    const COLLECTION: &str = r#"{
      "info": { "name": "Videos API" },
      "item": [
        { "name": "Videos", "item": [
          { "name": "List videos", "request": { "method": "GET", "url": { "path": ["videos"] } } },
          { "name": "Delete video", "request": {
              "method": "DELETE",
              "url": { "path": ["videos", ":id"], "variable": [{ "key": "id", "value": "v1" }] }
          } }
        ] }
      ]
    }"#;

    fn args(dir: &Path) -> ConvertArgs {
        let input = dir.join("collection.json");
        fs::write(&input, COLLECTION).unwrap();
        ConvertArgs {
            input,
            config: None,
            title: None,
            api_version: None,
            servers: Vec::new(),
            output_dir: dir.join("out"),
            output_name: "openapi".to_string(),
            no_yaml: false,
        }
    }

    #[test]
    fn test_writes_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path());

        let stats = execute(&args).unwrap();
        assert_eq!(
            stats,
            DocumentStats {
                endpoints: 2,
                paths: 2,
                tags: 1
            }
        );

        let json: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("out/openapi.json")).unwrap())
                .unwrap();
        assert_eq!(json["info"]["title"], "Videos API");
        assert_eq!(json["paths"]["/videos/{id}"]["delete"]["operationId"], "delete_video");

        let yaml: Value = serde_yaml::from_str(
            &fs::read_to_string(dir.path().join("out/openapi.yaml")).unwrap(),
        )
        .unwrap();
        assert_eq!(yaml, json);
    }

    #[test]
    fn test_overrides_and_no_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("doc.yaml");
        fs::write(&config_path, "version: 0.9.0\ntitle: From file\n").unwrap();

        let mut args = args(dir.path());
        args.config = Some(config_path);
        args.api_version = Some("3.2.1".to_string());
        args.servers = vec!["https://api.example.com".to_string()];
        args.output_name = "videos".to_string();
        args.no_yaml = true;

        execute(&args).unwrap();
        assert!(!dir.path().join("out/videos.yaml").exists());

        let json: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("out/videos.json")).unwrap())
                .unwrap();
        assert_eq!(json["info"]["version"], "3.2.1");
        assert_eq!(json["servers"][0]["url"], "https://api.example.com");
    }

    #[test]
    fn test_invalid_collection_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path());
        fs::write(&args.input, r#"{"info": {}}"#).unwrap();

        assert!(matches!(execute(&args), Err(CliError::Core(_))));
        assert!(!dir.path().join("out/openapi.json").exists());
    }
}
