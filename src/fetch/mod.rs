//! Outbound I/O collaborators used by the release providers
//!
//! Each trait covers one kind of I/O so that providers can be exercised
//! against fakes. The default implementations are:
//!
//! - [`ReqwestGetter`]: plain HTTP GET via reqwest
//! - [`ProcessRunner`]: child processes via `tokio::process`
//! - [`LocalContentResolver`]: local files relative to a work directory

pub mod command;
pub mod content;
pub mod http;

use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;

use crate::version::error::FetchError;

pub use command::{CommandOutput, ProcessRunner};
pub use content::LocalContentResolver;
pub use http::ReqwestGetter;

/// Fetches a URL and returns the response body
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait HttpGetter: Send + Sync {
    async fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Runs a program to completion and captures its output
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`. A non-zero exit is reported through
    /// [`CommandOutput::code`], not as an error.
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, FetchError>;
}

/// Turns a source location into a local file holding its content
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ContentResolver: Send + Sync {
    async fn resolve(&self, source: &str) -> Result<PathBuf, FetchError>;
}
