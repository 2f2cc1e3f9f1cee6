//! Document query layer
//!
//! Turns a fetched document into raw version strings:
//!
//! ```text
//! bytes ──▶ serde_yaml::Value ──▶ normalize ──▶ query ──▶ extract_versions
//! ```
//!
//! # Modules
//!
//! - [`normalize`]: String-keyed conversion of decoded YAML/JSON
//! - [`query`]: JSONPath subset evaluation
//! - [`extract`]: Flattening query results into version strings
//! - [`error`]: Query error type

pub mod error;
pub mod extract;
pub mod normalize;
pub mod query;

pub use error::QueryError;
pub use extract::extract_versions;
pub use normalize::normalize;
pub use query::{JsonPath, query};

/// Decode `bytes` as YAML (which also covers JSON), normalize it and return
/// the version strings selected by `path`.
pub fn versions_from_bytes(bytes: &[u8], path: &str) -> Result<Vec<String>, DocumentError> {
    let decoded: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
    let document = normalize(decoded)?;
    let nodes = query(&document, path)?;
    Ok(extract_versions(&nodes)?)
}

/// Failure while turning a fetched body into version strings
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Decode(#[from] serde_yaml::Error),

    #[error(transparent)]
    Query(#[from] QueryError),
}
