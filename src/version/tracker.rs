//! Latest release resolution for a release channel

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{ReleaseChannel, TrackerConfig, VersionSource};
use crate::fetch::{
    CommandRunner, ContentResolver, HttpGetter, LocalContentResolver, ProcessRunner,
    ReqwestGetter,
};
use crate::version::error::TrackerError;
use crate::version::provider::ReleaseProvider;
use crate::version::providers::{
    ContentQueryProvider, GitTagsProvider, HttpQueryProvider,
};
use crate::version::semver::{Constraint, compare_precedence};
use crate::version::types::Release;

/// Resolves releases of one release channel
///
/// Every call selects the channel's provider, performs exactly one fetch and
/// builds fresh [`Release`] values. Nothing is cached between calls.
pub struct ReleaseTracker {
    channel: ReleaseChannel,
    config: TrackerConfig,
    runner: Arc<dyn CommandRunner>,
    getter: Arc<dyn HttpGetter>,
    resolver: Arc<dyn ContentResolver>,
}

impl ReleaseTracker {
    /// Creates a tracker using the default process, HTTP and local file
    /// collaborators configured from `config`.
    pub fn new(channel: ReleaseChannel, config: TrackerConfig) -> Result<Self, TrackerError> {
        debug!(
            "release tracker init: workdir={} github_host={} docker_hub_url={}",
            config.work_dir.display(),
            config.github_host,
            config.docker_hub_url
        );

        let getter = ReqwestGetter::new(&config.user_agent)
            .map_err(|e| TrackerError::fetch("http", "client", e))?;

        Ok(Self {
            runner: Arc::new(ProcessRunner::new(&config.work_dir)),
            getter: Arc::new(getter),
            resolver: Arc::new(LocalContentResolver::new(&config.work_dir)),
            channel,
            config,
        })
    }

    /// Creates a tracker with caller-supplied collaborators
    pub fn with_collaborators(
        channel: ReleaseChannel,
        config: TrackerConfig,
        runner: Arc<dyn CommandRunner>,
        getter: Arc<dyn HttpGetter>,
        resolver: Arc<dyn ContentResolver>,
    ) -> Self {
        Self {
            channel,
            config,
            runner,
            getter,
            resolver,
        }
    }

    pub fn channel(&self) -> &ReleaseChannel {
        &self.channel
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Build the provider for the channel's single configured origin.
    ///
    /// Only validates configuration; no I/O happens here.
    pub fn provider(&self) -> Result<Box<dyn ReleaseProvider>, TrackerError> {
        let source = self.channel.versions_from.select()?;
        debug!("selected {} versions provider", source.kind());

        let provider: Box<dyn ReleaseProvider> = match source {
            VersionSource::JsonPath(origin) => {
                Box::new(ContentQueryProvider::new(self.resolver.clone(), origin))
            }
            VersionSource::DockerImageTags(origin) => Box::new(HttpQueryProvider::docker_image_tags(
                self.getter.clone(),
                &origin,
                &self.config.docker_hub_url,
            )),
            VersionSource::GitTags(origin) => {
                Box::new(GitTagsProvider::new(self.runner.clone(), &origin.source))
            }
            VersionSource::GitHubReleases(origin) => Box::new(HttpQueryProvider::github_releases(
                self.getter.clone(),
                &origin,
                &self.config.github_host,
            )),
        };

        Ok(provider)
    }

    /// All releases of the channel, sorted ascending by precedence.
    ///
    /// Releases with equal precedence keep the order the origin listed them.
    pub async fn list_releases(&self) -> Result<Vec<Release>, TrackerError> {
        let provider = self.provider()?;
        let mut releases = provider.list_releases().await?;
        releases.sort_by(|a, b| compare_precedence(&a.version, &b.version));
        Ok(releases)
    }

    /// The highest release satisfying `constraint`.
    ///
    /// An empty constraint means `> 0.0.0`. When nothing matches, the error
    /// lists every version that was found.
    pub async fn latest(&self, constraint: &str) -> Result<Release, TrackerError> {
        let constraint = Constraint::parse(constraint)?;
        let releases = self.list_releases().await?;

        let latest = select_latest(&releases, &constraint).cloned();

        match latest {
            Some(release) => {
                info!(
                    "latest release matching {:?} is {}",
                    constraint.as_str(),
                    release.raw
                );
                Ok(release)
            }
            None => Err(TrackerError::NoMatchingVersion {
                constraint: constraint.as_str().to_string(),
                versions: releases.into_iter().map(|r| r.raw).collect(),
            }),
        }
    }
}

/// First release of maximal precedence among those matching `constraint`
pub fn select_latest<'a>(releases: &'a [Release], constraint: &Constraint) -> Option<&'a Release> {
    let mut latest: Option<&Release> = None;
    for release in releases.iter().filter(|r| constraint.matches(&r.version)) {
        let is_newer = latest.is_none_or(|current| {
            compare_precedence(&release.version, &current.version) == Ordering::Greater
        });
        if is_newer {
            latest = Some(release);
        }
    }
    latest
}
