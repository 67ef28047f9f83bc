//! # Conversion Entry Points
//!
//! Runs the whole pipeline: endpoint walk, tag extraction and document
//! assembly. Conversion of an already-parsed [`Collection`] cannot fail.

use crate::collection::Collection;
use crate::error::AppResult;
use crate::oas::{assemble_document, extract_endpoints, extract_tags, DocumentConfig, SpecDocument};
use tracing::info;

/// Converts a parsed collection into an OpenAPI document.
pub fn convert_collection(collection: &Collection, config: &DocumentConfig) -> SpecDocument {
    let endpoints = extract_endpoints(&collection.items);
    let tags = extract_tags(&collection.items);
    let document = assemble_document(&collection.info, endpoints, tags, config);

    let stats = document.stats();
    info!(
        endpoints = stats.endpoints,
        paths = stats.paths,
        tags = stats.tags,
        "converted collection"
    );
    document
}

/// Parses collection JSON text and converts it.
pub fn convert_json_str(input: &str, config: &DocumentConfig) -> AppResult<SpecDocument> {
    let collection = Collection::from_json_str(input)?;
    Ok(convert_collection(&collection, config))
}
