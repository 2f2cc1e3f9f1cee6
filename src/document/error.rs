use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("jsonpath: invalid expression {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("jsonpath: {path:?}: returned nothing: {document}")]
    NoMatch { path: String, document: String },

    #[error("unexpected type of result from jsonpath: {path:?}: {node}")]
    UnexpectedResult { path: String, node: String },

    #[error("jsonpath: unexpected type of result: {node}")]
    UnexpectedNode { node: String },

    #[error("map key cannot be converted to a string: {key}")]
    InvalidKey { key: String },
}
