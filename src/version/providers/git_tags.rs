//! Git remote tags provider

use std::sync::Arc;

use crate::fetch::CommandRunner;
use crate::version::error::TrackerError;
use crate::version::provider::ReleaseProvider;
use crate::version::providers::command::run_command;

const TAG_REF_PREFIX: &str = "refs/tags/";
const PEELED_SUFFIX: &str = "^{}";

/// Lists tags of `git://{source}.git` with `git ls-remote --tags`
pub struct GitTagsProvider {
    runner: Arc<dyn CommandRunner>,
    url: String,
}

impl GitTagsProvider {
    pub fn new(runner: Arc<dyn CommandRunner>, source: &str) -> Self {
        Self {
            runner,
            url: format!("git://{}.git", source),
        }
    }
}

#[async_trait::async_trait]
impl ReleaseProvider for GitTagsProvider {
    fn kind(&self) -> &'static str {
        "gitTags"
    }

    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch_versions(&self) -> Result<Vec<String>, TrackerError> {
        let args = vec![
            "ls-remote".to_string(),
            "--tags".to_string(),
            self.url.clone(),
        ];
        let stdout = run_command(self.runner.as_ref(), self.kind(), &self.url, "git", &args).await?;

        Ok(parse_ls_remote_tags(&stdout))
    }
}

/// Extract tag names from `git ls-remote --tags` output.
///
/// Each line is `<sha>\trefs/tags/<name>`. Annotated tags also appear as a
/// peeled `refs/tags/<name>^{}` line, which is dropped.
fn parse_ls_remote_tags(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter(|reference| !reference.ends_with(PEELED_SUFFIX))
        .map(|reference| {
            reference
                .strip_prefix(TAG_REF_PREFIX)
                .unwrap_or(reference)
                .to_string()
        })
        .collect()
}
