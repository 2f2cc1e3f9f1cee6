//! Content resolution for local sources

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::fetch::ContentResolver;
use crate::version::error::FetchError;

/// Resolves plain paths and `file://` URLs against a work directory.
///
/// Remote archives and VCS references need a resolver that fetches and
/// caches them; this one only accepts content already on disk.
pub struct LocalContentResolver {
    work_dir: PathBuf,
}

impl LocalContentResolver {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    fn local_path(&self, source: &str) -> Result<PathBuf, FetchError> {
        let path = source.strip_prefix("file://").unwrap_or(source);
        if path.contains("://") {
            return Err(FetchError::Resolve(format!(
                "unsupported source {:?}: only local paths can be resolved",
                source
            )));
        }

        let path = Path::new(path);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.work_dir.join(path))
        }
    }
}

#[async_trait::async_trait]
impl ContentResolver for LocalContentResolver {
    async fn resolve(&self, source: &str) -> Result<PathBuf, FetchError> {
        let path = self.local_path(source)?;
        debug!("resolved {} to {}", source, path.display());

        if !tokio::fs::try_exists(&path).await? {
            return Err(FetchError::Resolve(format!(
                "{} does not exist",
                path.display()
            )));
        }

        Ok(path)
    }
}
