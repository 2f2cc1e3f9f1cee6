use thiserror::Error;

use crate::document::error::QueryError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Command `{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to decode document: {0}")]
    Decode(#[from] serde_yaml::Error),

    #[error("Failed to resolve content: {0}")]
    Resolve(String),
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{provider} provider failed for {location}: {source}")]
    Fetch {
        provider: &'static str,
        location: String,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("parsing version: index {index}: {raw:?}: {source}")]
    Parse {
        index: usize,
        raw: String,
        #[source]
        source: semver::Error,
    },

    #[error("no semver matching {constraint:?} found in {versions:?}")]
    NoMatchingVersion {
        constraint: String,
        versions: Vec<String>,
    },
}

impl TrackerError {
    pub(crate) fn fetch(
        provider: &'static str,
        location: impl Into<String>,
        source: impl Into<FetchError>,
    ) -> Self {
        Self::Fetch {
            provider,
            location: location.into(),
            source: source.into(),
        }
    }
}
