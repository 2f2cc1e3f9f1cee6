//! Provider trait for producing releases from one kind of origin

use tracing::info;

use crate::version::error::TrackerError;
use crate::version::types::{Release, versions_to_releases};

/// Produces releases from a single origin
#[async_trait::async_trait]
pub trait ReleaseProvider: Send + Sync {
    /// Configuration key of the origin (e.g. "githubReleases")
    fn kind(&self) -> &'static str;

    /// Where versions are fetched from: a URL, a command or a source location
    fn location(&self) -> &str;

    /// Description attached to every release this provider returns
    fn description(&self) -> Option<&str> {
        None
    }

    /// Fetches the raw version candidates in the order the origin lists them
    async fn fetch_versions(&self) -> Result<Vec<String>, TrackerError>;

    /// Fetches the candidates and parses every one of them
    ///
    /// # Returns
    /// * `Ok(Vec<Release>)` - One release per candidate, in fetch order
    /// * `Err(TrackerError)` - If fetching fails or any candidate is not semver
    async fn list_releases(&self) -> Result<Vec<Release>, TrackerError> {
        let raw_versions = self.fetch_versions().await?;
        info!(
            "{} provider returned {} versions from {}",
            self.kind(),
            raw_versions.len(),
            self.location()
        );
        versions_to_releases(&raw_versions, self.description())
    }
}
