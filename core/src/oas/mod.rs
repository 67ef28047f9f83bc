//! # OpenAPI Generation Module
//!
//! - **schema**: JSON Schema inference from example values.
//! - **paths**: Segment list to path template conversion.
//! - **params**: Path and query parameter extraction.
//! - **body**: Request body extraction per encoding.
//! - **responses**: Response map construction and error backfill.
//! - **naming**: Operation id generation.
//! - **walker**: Collection tree traversal into endpoints.
//! - **tags**: Folder tag extraction.
//! - **document**: Final document assembly and rendering.

pub mod body;
pub mod document;
pub mod models;
pub mod naming;
pub mod params;
pub mod paths;
pub mod responses;
pub mod schema;
pub mod tags;
pub mod walker;

pub use document::{
    assemble_document, ContactConfig, DocumentConfig, DocumentStats, ServerConfig, SpecDocument,
};
pub use models::{
    BodyFormat, Endpoint, Operation, ParamLocation, Parameter, RequestBody, ResponseEntry,
    Responses, Tag,
};
pub use schema::{infer_schema, Schema};
pub use tags::extract_tags;
pub use walker::extract_endpoints;
