//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Only the ingestion boundary can fail. Defects inside individual requests
//! (unparseable bodies, missing URLs) are degraded or skipped by the
//! converter and never reach this type.

use derive_more::{Display, From};

/// The Global Error Enum.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// The input text is not valid JSON.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// The input is JSON but does not describe a collection tree.
    #[from(ignore)]
    #[display("Invalid Collection: {_0}")]
    InvalidCollection(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
    }

    #[test]
    fn test_invalid_collection_display() {
        let app_err = AppError::InvalidCollection("missing `item`".into());
        assert_eq!(format!("{}", app_err), "Invalid Collection: missing `item`");
    }
}
