use async_trait::async_trait;
use std::io::ErrorKind;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// stdout followed by stderr, for marker searches that don't care which
    /// stream a tool chose.
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{0}: command not found")]
    NotFound(String),

    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs external programs. Swapped for a scripted fake in tests.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError>;
}

/// [`ProcessRunner`] backed by `tokio::process`.
///
/// Arguments go straight into argv; nothing passes through a shell.
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessRunner for CommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        debug!(program, ?args, timeout_secs = timeout.as_secs(), "spawning");

        let child = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(timeout, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(ProcessError::NotFound(program.to_string()));
            }
            Ok(Err(e)) => {
                return Err(ProcessError::Spawn {
                    program: program.to_string(),
                    source: e,
                });
            }
            Err(_) => return Err(ProcessError::Timeout(timeout)),
        };

        let result = ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(program, code = ?result.code, "process finished");

        Ok(result)
    }
}
