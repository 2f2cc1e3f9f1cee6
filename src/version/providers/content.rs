//! Provider querying a document obtained through a content resolver

use std::sync::Arc;

use tracing::debug;

use crate::config::JsonPathSource;
use crate::document::{DocumentError, versions_from_bytes};
use crate::fetch::ContentResolver;
use crate::version::error::TrackerError;
use crate::version::provider::ReleaseProvider;

/// Resolves `source` to a local file, decodes it and runs the `versions` query
pub struct ContentQueryProvider {
    resolver: Arc<dyn ContentResolver>,
    origin: JsonPathSource,
}

impl ContentQueryProvider {
    pub fn new(resolver: Arc<dyn ContentResolver>, origin: JsonPathSource) -> Self {
        Self { resolver, origin }
    }
}

#[async_trait::async_trait]
impl ReleaseProvider for ContentQueryProvider {
    fn kind(&self) -> &'static str {
        "jsonPath"
    }

    fn location(&self) -> &str {
        &self.origin.source
    }

    fn description(&self) -> Option<&str> {
        self.origin.description.as_deref()
    }

    async fn fetch_versions(&self) -> Result<Vec<String>, TrackerError> {
        let path = self
            .resolver
            .resolve(&self.origin.source)
            .await
            .map_err(|e| TrackerError::fetch(self.kind(), &self.origin.source, e))?;

        debug!("reading {} for {}", path.display(), self.origin.source);

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| TrackerError::fetch(self.kind(), path.display().to_string(), e))?;

        versions_from_bytes(&bytes, &self.origin.versions).map_err(|e| match e {
            DocumentError::Decode(e) => TrackerError::fetch(self.kind(), &self.origin.source, e),
            DocumentError::Query(e) => TrackerError::Query(e),
        })
    }
}
