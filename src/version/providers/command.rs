//! Shell command output provider

use std::sync::Arc;

use tracing::debug;

use crate::fetch::CommandRunner;
use crate::version::error::{FetchError, TrackerError};
use crate::version::provider::ReleaseProvider;

/// Runs a shell command and treats every non-blank stdout line as a version
pub struct CommandProvider {
    runner: Arc<dyn CommandRunner>,
    shell: String,
    command: String,
}

impl CommandProvider {
    pub fn new(runner: Arc<dyn CommandRunner>, shell: &str, command: &str) -> Self {
        Self {
            runner,
            shell: shell.to_string(),
            command: command.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ReleaseProvider for CommandProvider {
    fn kind(&self) -> &'static str {
        "command"
    }

    fn location(&self) -> &str {
        &self.command
    }

    async fn fetch_versions(&self) -> Result<Vec<String>, TrackerError> {
        let args = vec!["-c".to_string(), self.command.clone()];
        let stdout = run_command(
            self.runner.as_ref(),
            self.kind(),
            &self.command,
            &self.shell,
            &args,
        )
        .await?;

        Ok(non_blank_lines(&stdout))
    }
}

/// Run a command and return its stdout.
///
/// Stderr is logged, not treated as failure. A non-zero exit is a
/// [`FetchError::CommandFailed`] attributed to `kind` and `location`.
pub(crate) async fn run_command(
    runner: &dyn CommandRunner,
    kind: &'static str,
    location: &str,
    program: &str,
    args: &[String],
) -> Result<String, TrackerError> {
    let output = runner
        .run(program, args)
        .await
        .map_err(|e| TrackerError::fetch(kind, location, e))?;

    if !output.stderr.trim().is_empty() {
        debug!("{} stderr: {}", program, output.stderr.trim_end());
    }

    if !output.success() {
        return Err(TrackerError::fetch(
            kind,
            location,
            FetchError::CommandFailed {
                command: format!("{} {}", program, args.join(" ")),
                status: output.status_text(),
                stderr: output.stderr.trim_end().to_string(),
            },
        ));
    }

    Ok(output.stdout)
}

fn non_blank_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
