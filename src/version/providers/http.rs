//! Providers querying a document fetched over HTTP

use std::sync::Arc;

use crate::config::{DockerImageTagsSource, GitHubReleasesSource};
use crate::document::{DocumentError, versions_from_bytes};
use crate::fetch::HttpGetter;
use crate::version::error::TrackerError;
use crate::version::provider::ReleaseProvider;

/// Query selecting release tags from the GitHub Releases API
pub const GITHUB_RELEASES_QUERY: &str = "$[*].tag_name";

/// Query selecting tag names from the Docker Hub tags API
pub const DOCKER_IMAGE_TAGS_QUERY: &str = "$.results[*].name";

/// GETs a URL and runs a fixed query over the response body
pub struct HttpQueryProvider {
    getter: Arc<dyn HttpGetter>,
    kind: &'static str,
    url: String,
    query: String,
}

impl HttpQueryProvider {
    pub fn new(getter: Arc<dyn HttpGetter>, kind: &'static str, url: String, query: &str) -> Self {
        Self {
            getter,
            kind,
            url,
            query: query.to_string(),
        }
    }

    /// `https://{host}/repos/{source}/releases`; `default_host` is used when
    /// the source does not name one.
    pub fn github_releases(
        getter: Arc<dyn HttpGetter>,
        origin: &GitHubReleasesSource,
        default_host: &str,
    ) -> Self {
        let host = origin
            .host
            .as_deref()
            .filter(|host| !host.trim().is_empty())
            .unwrap_or(default_host);
        let url = format!("https://{}/repos/{}/releases", host, origin.source);
        Self::new(getter, "githubReleases", url, GITHUB_RELEASES_QUERY)
    }

    /// `{base_url}/v2/repositories/{source}/tags/`; a trailing `/` on
    /// `base_url` is dropped.
    pub fn docker_image_tags(
        getter: Arc<dyn HttpGetter>,
        origin: &DockerImageTagsSource,
        base_url: &str,
    ) -> Self {
        let url = format!(
            "{}/v2/repositories/{}/tags/",
            base_url.trim_end_matches('/'),
            origin.source
        );
        Self::new(getter, "dockerImageTags", url, DOCKER_IMAGE_TAGS_QUERY)
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[async_trait::async_trait]
impl ReleaseProvider for HttpQueryProvider {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch_versions(&self) -> Result<Vec<String>, TrackerError> {
        let body = self
            .getter
            .get(&self.url)
            .await
            .map_err(|e| TrackerError::fetch(self.kind, &self.url, e))?;

        versions_from_bytes(body.as_bytes(), &self.query).map_err(|e| match e {
            DocumentError::Decode(e) => TrackerError::fetch(self.kind, &self.url, e),
            DocumentError::Query(e) => TrackerError::Query(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DOCKER_HUB_URL;
    use crate::config::DEFAULT_GITHUB_HOST;
    use crate::document::QueryError;
    use crate::fetch::MockHttpGetter;
    use crate::version::error::FetchError;

    fn getter_returning(url: &'static str, body: &'static str) -> MockHttpGetter {
        let mut getter = MockHttpGetter::new();
        getter
            .expect_get()
            .withf(move |requested| requested == url)
            .times(1)
            .returning(move |_| Ok(body.to_string()));
        getter
    }

    #[test]
    fn github_releases_uses_default_host() {
        let provider = HttpQueryProvider::github_releases(
            Arc::new(MockHttpGetter::new()),
            &GitHubReleasesSource {
                host: None,
                source: "cli/cli".to_string(),
            },
            DEFAULT_GITHUB_HOST,
        );

        assert_eq!(
            provider.location(),
            "https://api.github.com/repos/cli/cli/releases"
        );
        assert_eq!(provider.query(), "$[*].tag_name");
        assert_eq!(provider.kind(), "githubReleases");
    }

    #[test]
    fn github_releases_prefers_configured_host() {
        let provider = HttpQueryProvider::github_releases(
            Arc::new(MockHttpGetter::new()),
            &GitHubReleasesSource {
                host: Some("github.example.com/api/v3".to_string()),
                source: "platform/tools".to_string(),
            },
            DEFAULT_GITHUB_HOST,
        );

        assert_eq!(
            provider.location(),
            "https://github.example.com/api/v3/repos/platform/tools/releases"
        );
    }

    #[test]
    fn docker_image_tags_builds_hub_url() {
        let provider = HttpQueryProvider::docker_image_tags(
            Arc::new(MockHttpGetter::new()),
            &DockerImageTagsSource {
                source: "library/alpine".to_string(),
            },
            DEFAULT_DOCKER_HUB_URL,
        );

        assert_eq!(
            provider.location(),
            "https://registry.hub.docker.com/v2/repositories/library/alpine/tags/"
        );
        assert_eq!(provider.query(), "$.results[*].name");
    }

    #[test]
    fn docker_image_tags_drops_trailing_slash_of_base_url() {
        let provider = HttpQueryProvider::docker_image_tags(
            Arc::new(MockHttpGetter::new()),
            &DockerImageTagsSource {
                source: "library/alpine".to_string(),
            },
            "http://localhost:5000/",
        );

        assert_eq!(
            provider.location(),
            "http://localhost:5000/v2/repositories/library/alpine/tags/"
        );
    }

    #[tokio::test]
    async fn github_releases_extracts_tag_names() {
        let getter = getter_returning(
            "https://api.github.com/repos/cli/cli/releases",
            r#"[
                {"tag_name": "v2.40.0", "published_at": "2024-01-15T00:00:00Z"},
                {"tag_name": "v2.39.2", "published_at": "2024-01-01T00:00:00Z"}
            ]"#,
        );
        let provider = HttpQueryProvider::github_releases(
            Arc::new(getter),
            &GitHubReleasesSource {
                host: None,
                source: "cli/cli".to_string(),
            },
            DEFAULT_GITHUB_HOST,
        );

        assert_eq!(
            provider.fetch_versions().await.unwrap(),
            vec!["v2.40.0", "v2.39.2"]
        );
    }

    #[tokio::test]
    async fn docker_image_tags_extracts_names() {
        let getter = getter_returning(
            "https://registry.hub.docker.com/v2/repositories/library/alpine/tags/",
            r#"{"count": 2, "results": [{"name": "v1.0.0"}, {"name": "v1.1.0"}]}"#,
        );
        let provider = HttpQueryProvider::docker_image_tags(
            Arc::new(getter),
            &DockerImageTagsSource {
                source: "library/alpine".to_string(),
            },
            DEFAULT_DOCKER_HUB_URL,
        );

        let releases = provider.list_releases().await.unwrap();

        let raw: Vec<&str> = releases.iter().map(|r| r.raw.as_str()).collect();
        assert_eq!(raw, vec!["v1.0.0", "v1.1.0"]);
        assert_eq!(releases[1].version, semver::Version::new(1, 1, 0));
        assert_eq!(releases[1].description, None);
    }

    #[tokio::test]
    async fn fetch_versions_fails_for_repo_without_releases() {
        let getter = getter_returning("https://api.github.com/repos/some/repo/releases", "[]");
        let provider = HttpQueryProvider::github_releases(
            Arc::new(getter),
            &GitHubReleasesSource {
                host: None,
                source: "some/repo".to_string(),
            },
            DEFAULT_GITHUB_HOST,
        );

        assert!(matches!(
            provider.fetch_versions().await,
            Err(TrackerError::Query(QueryError::NoMatch { .. }))
        ));
    }

    #[tokio::test]
    async fn fetch_versions_wraps_getter_errors_with_url() {
        let mut getter = MockHttpGetter::new();
        getter.expect_get().returning(|url| {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        });
        let provider = HttpQueryProvider::github_releases(
            Arc::new(getter),
            &GitHubReleasesSource {
                host: None,
                source: "nonexistent/repo".to_string(),
            },
            DEFAULT_GITHUB_HOST,
        );

        match provider.fetch_versions().await.unwrap_err() {
            TrackerError::Fetch {
                provider,
                location,
                source: FetchError::Status { status, .. },
            } => {
                assert_eq!(provider, "githubReleases");
                assert_eq!(location, "https://api.github.com/repos/nonexistent/repo/releases");
                assert_eq!(status, 404);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
