//! Shared plumbing for providers that shell out to an installed CLI.
//!
//! A local tool is "installed" when `<program> --version` prints a version
//! at or above the provider's minimum, and "authenticated" when a cheap probe
//! invocation prints a provider-specific marker. The marker check is a
//! heuristic over human-readable output and lives in [`AuthProbe`] so each
//! provider can swap it without touching selection.

use crate::ai::process::{ProcessError, ProcessRunner};
use crate::ai::version::{meets_minimum, parse_version};
use crate::ai::ProviderStatus;
use crate::error::{GenError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Per-call time limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub version: Duration,
    pub auth: Duration,
    pub generate: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            version: Duration::from_secs(5),
            auth: Duration::from_secs(10),
            generate: Duration::from_secs(30),
        }
    }
}

/// Authentication heuristic: run `args`, look for `marker` in the output.
#[derive(Debug, Clone)]
pub struct AuthProbe {
    pub args: Vec<String>,
    pub marker: String,
}

impl AuthProbe {
    pub fn new(args: &[&str], marker: &str) -> Self {
        Self {
            args: args.iter().map(|a| a.to_string()).collect(),
            marker: marker.to_string(),
        }
    }

    pub fn matches(&self, output: &str) -> bool {
        output.contains(&self.marker)
    }
}

/// An external executable plus what it takes to call it ready.
pub struct LocalTool {
    provider: String,
    program: String,
    min_version: String,
    auth: AuthProbe,
    timeouts: Timeouts,
    runner: Arc<dyn ProcessRunner>,
}

impl LocalTool {
    pub fn new(
        provider: &str,
        program: &str,
        min_version: &str,
        auth: AuthProbe,
        timeouts: Timeouts,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            provider: provider.to_string(),
            program: program.to_string(),
            min_version: min_version.to_string(),
            auth,
            timeouts,
            runner,
        }
    }

    /// Installation check, then the authentication heuristic.
    pub async fn status(&self) -> ProviderStatus {
        if let Err(status) = self.check_installation().await {
            return status;
        }
        self.check_authentication().await
    }

    async fn check_installation(&self) -> std::result::Result<(), ProviderStatus> {
        let args = vec!["--version".to_string()];
        let output = match self.runner.run(&self.program, &args, self.timeouts.version).await {
            Ok(output) => output,
            Err(ProcessError::NotFound(_)) => {
                debug!(provider = %self.provider, program = %self.program, "not on PATH");
                return Err(ProviderStatus::NotInstalled);
            }
            Err(e) => {
                warn!(provider = %self.provider, error = %e, "version probe failed");
                return Err(ProviderStatus::Error(format!("version check failed: {}", e)));
            }
        };

        if !output.success {
            debug!(provider = %self.provider, code = ?output.code, "version probe exited non-zero");
            return Err(ProviderStatus::NotInstalled);
        }

        match parse_version(&output.combined()) {
            Some(version) if meets_minimum(version, &self.min_version) => {
                debug!(provider = %self.provider, version, "installed");
                Ok(())
            }
            Some(version) => {
                debug!(
                    provider = %self.provider,
                    version,
                    minimum = %self.min_version,
                    "installed version is too old"
                );
                Err(ProviderStatus::NotInstalled)
            }
            None => {
                debug!(provider = %self.provider, "no version in --version output");
                Err(ProviderStatus::NotInstalled)
            }
        }
    }

    async fn check_authentication(&self) -> ProviderStatus {
        match self
            .runner
            .run(&self.program, &self.auth.args, self.timeouts.auth)
            .await
        {
            Ok(output) if self.auth.matches(&output.combined()) => ProviderStatus::Ready,
            Ok(output) => {
                debug!(provider = %self.provider, code = ?output.code, "auth marker missing");
                ProviderStatus::NotAuthenticated
            }
            Err(ProcessError::NotFound(_)) => ProviderStatus::NotInstalled,
            Err(e) => {
                warn!(provider = %self.provider, error = %e, "auth probe failed");
                ProviderStatus::Error(format!("authentication check failed: {}", e))
            }
        }
    }

    /// Run a generation call and return its stdout.
    ///
    /// Spawn failures, timeouts and non-zero exits all become
    /// [`GenError::GenerationFailed`].
    pub async fn invoke(&self, args: &[String]) -> Result<String> {
        let output = self
            .runner
            .run(&self.program, args, self.timeouts.generate)
            .await
            .map_err(|e| GenError::generation(&self.provider, e.to_string()))?;

        if !output.success {
            let stderr = output.stderr.trim();
            let message = if stderr.is_empty() {
                format!("exited with status {}", exit_label(output.code))
            } else {
                stderr.to_string()
            };
            return Err(GenError::generation(&self.provider, message));
        }

        Ok(output.stdout)
    }
}

fn exit_label(code: Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "unknown (killed by signal)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::process::fake::ScriptedRunner;

    fn tool(runner: Arc<ScriptedRunner>) -> LocalTool {
        LocalTool::new(
            "demo",
            "demo",
            "1.0.0",
            AuthProbe::new(&["-p", "hi"], "Loaded cached credentials."),
            Timeouts::default(),
            runner,
        )
    }

    #[tokio::test]
    async fn test_ready() {
        let runner = Arc::new(
            ScriptedRunner::new()
                .then_ok("1.4.0\n", "")
                .then_ok("Hello!", "Loaded cached credentials."),
        );
        assert_eq!(tool(runner.clone()).status().await, ProviderStatus::Ready);
        assert_eq!(runner.call_count(), 2);
    }

    #[tokio::test]
    async fn test_not_installed_skips_auth_probe() {
        let runner = Arc::new(ScriptedRunner::new().then_err(ProcessError::NotFound("demo".into())));
        assert_eq!(tool(runner.clone()).status().await, ProviderStatus::NotInstalled);
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_old_or_unparseable_version() {
        let runner = Arc::new(ScriptedRunner::new().then_ok("0.9.9", ""));
        assert_eq!(tool(runner).status().await, ProviderStatus::NotInstalled);

        let runner = Arc::new(ScriptedRunner::new().then_ok("dev build", ""));
        assert_eq!(tool(runner).status().await, ProviderStatus::NotInstalled);
    }

    #[tokio::test]
    async fn test_not_authenticated() {
        let runner = Arc::new(
            ScriptedRunner::new()
                .then_ok("1.0.0", "")
                .then_exit(1, "Please run `demo login`"),
        );
        assert_eq!(tool(runner).status().await, ProviderStatus::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_probe_timeout_is_error_status() {
        let runner = Arc::new(
            ScriptedRunner::new().then_err(ProcessError::Timeout(Duration::from_secs(5))),
        );
        match tool(runner).status().await {
            ProviderStatus::Error(message) => assert!(message.contains("timed out")),
            other => panic!("expected error status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invoke_maps_failures() {
        let runner = Arc::new(ScriptedRunner::new().then_exit(2, "quota exceeded\n"));
        let err = tool(runner).invoke(&[]).await.unwrap_err();
        assert_eq!(err.to_string(), "demo failed: quota exceeded");

        let runner = Arc::new(ScriptedRunner::new().then_exit(2, ""));
        let err = tool(runner).invoke(&[]).await.unwrap_err();
        assert_eq!(err.to_string(), "demo failed: exited with status 2");

        let runner = Arc::new(
            ScriptedRunner::new().then_err(ProcessError::Timeout(Duration::from_secs(30))),
        );
        let err = tool(runner).invoke(&[]).await.unwrap_err();
        assert_eq!(err.to_string(), "demo failed: timed out after 30s");
    }
}
