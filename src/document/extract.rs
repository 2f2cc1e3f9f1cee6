use serde_json::Value;

use crate::document::error::QueryError;
use crate::document::query::render;

/// Flatten query results into raw version strings.
///
/// Strings are taken as-is. Maps contribute their keys, which covers documents
/// that key release metadata by version (`{"1.2.0": {...}}`). Order follows the
/// input and duplicates are kept.
pub fn extract_versions(nodes: &[Value]) -> Result<Vec<String>, QueryError> {
    let mut versions = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Value::String(s) => versions.push(s.clone()),
            Value::Object(map) => versions.extend(map.keys().cloned()),
            other => {
                return Err(QueryError::UnexpectedNode {
                    node: render(other),
                });
            }
        }
    }
    Ok(versions)
}
