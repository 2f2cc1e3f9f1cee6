//! Fake collaborators for driving a tracker without network or processes

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use release_tracker::config::{ReleaseChannel, TrackerConfig, VersionsFrom};
use release_tracker::fetch::{CommandOutput, CommandRunner, ContentResolver, HttpGetter};
use release_tracker::version::error::FetchError;
use release_tracker::version::tracker::ReleaseTracker;

/// HTTP getter serving canned bodies and recording requested URLs
#[derive(Default)]
pub struct FakeHttpGetter {
    bodies: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FakeHttpGetter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpGetter for FakeHttpGetter {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Command runner returning a fixed output for every invocation
pub struct FakeCommandRunner {
    output: CommandOutput,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeCommandRunner {
    pub fn new(code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            output: CommandOutput {
                code: Some(code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        Ok(self.output.clone())
    }
}

/// Content resolver mapping every source to one fixed path
pub struct FixedContentResolver {
    path: PathBuf,
}

impl FixedContentResolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentResolver for FixedContentResolver {
    async fn resolve(&self, _source: &str) -> Result<PathBuf, FetchError> {
        Ok(self.path.clone())
    }
}

/// Tracker over `versions_from` whose collaborators are all fakes
pub fn create_test_tracker(
    versions_from: VersionsFrom,
    runner: Arc<dyn CommandRunner>,
    getter: Arc<dyn HttpGetter>,
    resolver: Arc<dyn ContentResolver>,
) -> ReleaseTracker {
    ReleaseTracker::with_collaborators(
        ReleaseChannel { versions_from },
        TrackerConfig::default(),
        runner,
        getter,
        resolver,
    )
}

pub fn unused_runner() -> Arc<dyn CommandRunner> {
    Arc::new(FakeCommandRunner::new(1, "", "runner should not be called"))
}

pub fn unused_getter() -> Arc<dyn HttpGetter> {
    Arc::new(FakeHttpGetter::new())
}

pub fn unused_resolver() -> Arc<dyn ContentResolver> {
    Arc::new(FixedContentResolver::new("/nonexistent"))
}
