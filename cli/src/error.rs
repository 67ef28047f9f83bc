//! # CLI Errors
//!
//! Error types for the CLI crate.

use collection_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Conversion failure from the core library.
    #[display("Conversion failed: {}", _0)]
    Core(AppError),

    /// YAML (de)serialization failure.
    #[display("YAML Error: {}", _0)]
    Yaml(serde_yaml::Error),

    /// JSON (de)serialization failure.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),
}

impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
