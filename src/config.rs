use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::document::JsonPath;
use crate::version::error::TrackerError;

// =============================================================================
// Defaults
// =============================================================================

/// Default GitHub API host for `githubReleases`
pub const DEFAULT_GITHUB_HOST: &str = "api.github.com";

/// Default Docker Hub base URL for `dockerImageTags`
pub const DEFAULT_DOCKER_HUB_URL: &str = "https://registry.hub.docker.com";

/// User agent sent with HTTP requests (GitHub rejects requests without one)
pub const DEFAULT_USER_AGENT: &str = "release-tracker";

/// Config file read by the binary when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "release-channel.yaml";

// =============================================================================
// Release channel file
// =============================================================================

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub release_channel: ReleaseChannel,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReleaseChannel {
    pub versions_from: VersionsFrom,
}

/// Where versions come from. Exactly one entry may have a non-empty `source`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct VersionsFrom {
    #[serde(rename = "jsonPath")]
    pub json_path: JsonPathSource,
    #[serde(rename = "gitTags")]
    pub git_tags: GitTagsSource,
    #[serde(rename = "githubReleases")]
    pub github_releases: GitHubReleasesSource,
    #[serde(rename = "dockerImageTags")]
    pub docker_image_tags: DockerImageTagsSource,
}

/// A document resolved from `source` and queried with the `versions` path
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct JsonPathSource {
    pub source: String,
    pub versions: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GitTagsSource {
    pub source: String,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GitHubReleasesSource {
    pub host: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DockerImageTagsSource {
    pub source: String,
}

/// A validated choice of exactly one origin
#[derive(Debug, Clone, PartialEq)]
pub enum VersionSource {
    JsonPath(JsonPathSource),
    GitTags(GitTagsSource),
    GitHubReleases(GitHubReleasesSource),
    DockerImageTags(DockerImageTagsSource),
}

impl VersionSource {
    /// The configuration key naming this origin
    pub fn kind(&self) -> &'static str {
        match self {
            VersionSource::JsonPath(_) => "jsonPath",
            VersionSource::GitTags(_) => "gitTags",
            VersionSource::GitHubReleases(_) => "githubReleases",
            VersionSource::DockerImageTags(_) => "dockerImageTags",
        }
    }
}

impl VersionsFrom {
    /// Pick the single configured origin.
    ///
    /// Fails when no origin or more than one origin has a source, or when a
    /// `jsonPath` origin has no usable `versions` query.
    pub fn select(&self) -> Result<VersionSource, TrackerError> {
        let mut populated = Vec::new();

        if has_source(&self.json_path.source) {
            populated.push(VersionSource::JsonPath(self.json_path.clone()));
        }
        if has_source(&self.docker_image_tags.source) {
            populated.push(VersionSource::DockerImageTags(
                self.docker_image_tags.clone(),
            ));
        }
        if has_source(&self.git_tags.source) {
            populated.push(VersionSource::GitTags(self.git_tags.clone()));
        }
        if has_source(&self.github_releases.source) {
            populated.push(VersionSource::GitHubReleases(self.github_releases.clone()));
        }

        if populated.len() > 1 {
            let kinds: Vec<&str> = populated.iter().map(VersionSource::kind).collect();
            return Err(TrackerError::Config(format!(
                "multiple versions providers specified: {}",
                kinds.join(", ")
            )));
        }

        let source = populated
            .pop()
            .ok_or_else(|| TrackerError::Config("no versions provider specified".to_string()))?;

        if let VersionSource::JsonPath(origin) = &source {
            if origin.versions.trim().is_empty() {
                return Err(TrackerError::Config(format!(
                    "jsonPath source {:?} has no versions query",
                    origin.source
                )));
            }
            JsonPath::parse(&origin.versions).map_err(|e| TrackerError::Config(e.to_string()))?;
        }

        Ok(source)
    }
}

fn has_source(source: &str) -> bool {
    !source.trim().is_empty()
}

/// Read and decode a release channel file.
pub fn load_config(path: &Path) -> Result<Config, TrackerError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TrackerError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    parse_config(&content, path)
}

/// Decode release channel YAML. `path` is only used in error messages.
pub fn parse_config(content: &str, path: &Path) -> Result<Config, TrackerError> {
    serde_yaml::from_str(content)
        .map_err(|e| TrackerError::Config(format!("failed to parse {}: {}", path.display(), e)))
}

// =============================================================================
// Tracker runtime settings
// =============================================================================

/// Runtime settings for a tracker and its default collaborators
///
/// | field            | default                            |
/// |------------------|------------------------------------|
/// | `work_dir`       | `.`                                |
/// | `github_host`    | `api.github.com`                   |
/// | `docker_hub_url` | `https://registry.hub.docker.com`  |
/// | `user_agent`     | `release-tracker`                  |
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub work_dir: PathBuf,
    pub github_host: String,
    pub docker_hub_url: String,
    pub user_agent: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            github_host: DEFAULT_GITHUB_HOST.to_string(),
            docker_hub_url: DEFAULT_DOCKER_HUB_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl TrackerConfig {
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::default()
    }
}

/// Builder for [`TrackerConfig`]; unset fields take the documented defaults
#[derive(Debug, Clone, Default)]
pub struct TrackerConfigBuilder {
    work_dir: Option<PathBuf>,
    github_host: Option<String>,
    docker_hub_url: Option<String>,
    user_agent: Option<String>,
}

impl TrackerConfigBuilder {
    pub fn work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(work_dir.into());
        self
    }

    pub fn github_host(mut self, host: impl Into<String>) -> Self {
        self.github_host = Some(host.into());
        self
    }

    pub fn docker_hub_url(mut self, url: impl Into<String>) -> Self {
        self.docker_hub_url = Some(url.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> TrackerConfig {
        let defaults = TrackerConfig::default();
        TrackerConfig {
            work_dir: self.work_dir.unwrap_or(defaults.work_dir),
            github_host: self.github_host.unwrap_or(defaults.github_host),
            docker_hub_url: self.docker_hub_url.unwrap_or(defaults.docker_hub_url),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        }
    }
}
