#![deny(missing_docs)]

//! # Collection Core
//!
//! Converts hierarchical API collections (folders of example HTTP requests)
//! into OpenAPI 3.0 documents.
//!
//! ```
//! use collection_core::{convert_json_str, DocumentConfig};
//!
//! let raw = r#"{"info": {"name": "Demo"}, "item": [
//!     {"name": "List users", "request": {"method": "GET", "url": {"path": ["users"]}}}
//! ]}"#;
//! let doc = convert_json_str(raw, &DocumentConfig::default()).unwrap();
//! assert_eq!(doc.stats().endpoints, 1);
//! ```

/// Shared error types.
pub mod error;

/// Collection model and ingestion.
pub mod collection;

/// OpenAPI generation.
pub mod oas;

/// Pipeline entry points.
pub mod convert;

pub use collection::Collection;
pub use convert::{convert_collection, convert_json_str};
pub use error::{AppError, AppResult};
pub use oas::{DocumentConfig, DocumentStats, SpecDocument};
