//! Child process runner

use std::path::PathBuf;

use tokio::process::Command;
use tracing::debug;

use crate::fetch::CommandRunner;
use crate::version::error::FetchError;

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal)
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human-readable exit status for error messages
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "signal".to_string(),
        }
    }
}

/// Runs commands as child processes inside a fixed working directory
pub struct ProcessRunner {
    work_dir: PathBuf,
}

impl ProcessRunner {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }
}

#[async_trait::async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, FetchError> {
        debug!("running {} {:?} in {}", program, args, self.work_dir.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .await?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
